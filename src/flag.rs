//! Crowd-sourced misinformation flags
//!
//! Beyond the per-quiz credibility rating, readers can flag an article
//! outright, naming the kind of problem, a severity, and their reasoning.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity bounds (inclusive)
pub const SEVERITY_MIN: u8 = 1;
pub const SEVERITY_MAX: u8 = 5;

/// Required reasoning length in characters
pub const REASONING_MIN_CHARS: usize = 20;
pub const REASONING_MAX_CHARS: usize = 1000;

/// Maximum evidence length in characters
pub const EVIDENCE_MAX_CHARS: usize = 2000;

/// Category of the reported problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    /// Fabricated reporting presented as fact
    FakeNews,

    /// True facts framed to mislead
    Misleading,

    /// Satire mistaken (or shared) as news
    Satire,

    /// Headline misrepresents the content
    Clickbait,
}

impl FlagKind {
    /// Parse kind from string (from database or API payloads)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fake_news" | "fake-news" | "fakenews" => Some(FlagKind::FakeNews),
            "misleading" => Some(FlagKind::Misleading),
            "satire" => Some(FlagKind::Satire),
            "clickbait" => Some(FlagKind::Clickbait),
            _ => None,
        }
    }

    /// Convert to canonical database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            FlagKind::FakeNews => "fake_news",
            FlagKind::Misleading => "misleading",
            FlagKind::Satire => "satire",
            FlagKind::Clickbait => "clickbait",
        }
    }

    /// Get human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FlagKind::FakeNews => "Fake News",
            FlagKind::Misleading => "Misleading",
            FlagKind::Satire => "Satire",
            FlagKind::Clickbait => "Clickbait",
        }
    }

    /// Get all flag kinds
    ///
    /// Useful for UI dropdowns and validation
    pub fn all_variants() -> &'static [FlagKind] {
        &[
            FlagKind::FakeNews,
            FlagKind::Misleading,
            FlagKind::Satire,
            FlagKind::Clickbait,
        ]
    }
}

impl std::fmt::Display for FlagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One reader's misinformation report against an article
///
/// Immutable after creation. Admin verification happens in the
/// application layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisinformationFlag {
    pub article_id: Uuid,
    pub user_id: Uuid,
    pub kind: FlagKind,
    /// 1 = minor concern ... 5 = dangerous fabrication
    pub severity: u8,
    /// The reader's explanation, 20-1000 characters
    pub reasoning: String,
    /// Optional links or references
    pub evidence: Option<String>,
}

impl MisinformationFlag {
    /// Create a validated flag
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` when severity is outside 1-5, the
    /// reasoning is shorter than 20 or longer than 1000 characters, or
    /// the evidence exceeds 2000 characters.
    pub fn new(
        article_id: Uuid,
        user_id: Uuid,
        kind: FlagKind,
        severity: u8,
        reasoning: impl Into<String>,
        evidence: Option<String>,
    ) -> Result<Self> {
        if !(SEVERITY_MIN..=SEVERITY_MAX).contains(&severity) {
            return Err(Error::InvalidInput(format!(
                "flag severity {} outside {}-{}",
                severity, SEVERITY_MIN, SEVERITY_MAX
            )));
        }

        let reasoning = reasoning.into();
        let reasoning_len = reasoning.chars().count();
        if !(REASONING_MIN_CHARS..=REASONING_MAX_CHARS).contains(&reasoning_len) {
            return Err(Error::InvalidInput(format!(
                "flag reasoning length {} outside {}-{} characters",
                reasoning_len, REASONING_MIN_CHARS, REASONING_MAX_CHARS
            )));
        }

        if let Some(ref evidence) = evidence {
            if evidence.chars().count() > EVIDENCE_MAX_CHARS {
                return Err(Error::InvalidInput(format!(
                    "flag evidence exceeds {} characters",
                    EVIDENCE_MAX_CHARS
                )));
            }
        }

        Ok(Self {
            article_id,
            user_id,
            kind,
            severity,
            reasoning,
            evidence,
        })
    }
}
