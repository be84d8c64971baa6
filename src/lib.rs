//! # CrowdCheck Core Library
//!
//! Domain core for crowd-sourced article credibility assessment:
//! - Credibility rating model and weighted aggregation
//! - Community consensus classification
//! - Quiz model and generated-quiz wire parsing
//! - Quiz session state machine (navigation, answers, scoring)
//! - Misinformation flags
//! - Article and user statistics, ranking
//! - Configuration loading
//!
//! This crate is pure domain logic: no HTTP, no database, no LLM calls.
//! The surrounding application layer owns all I/O and invokes these
//! operations over consistent snapshots of its data.

pub mod config;
pub mod consensus;
pub mod error;
pub mod flag;
pub mod quiz;
pub mod rating;
pub mod session;
pub mod stats;

pub use config::ScoringConfig;
pub use consensus::{classify, Consensus, ConsensusThresholds};
pub use error::{Error, Result};
pub use quiz::{Question, Quiz, QuizOption};
pub use rating::{aggregate, CredibilityAggregate, Rating};
pub use session::{QuizResult, QuizSession};
