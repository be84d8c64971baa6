//! Article and user statistics
//!
//! Pure folds over completed-response collections. Nothing here caches
//! running totals: every statistic is recomputed on demand from the
//! authoritative response slice the caller snapshots, so concurrent
//! writers cannot cause silent drift.

use crate::consensus::{classify_with, Consensus, ConsensusThresholds};
use crate::rating::{aggregate, Rating};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// One completed quiz response: the quiz outcome plus the credibility
/// assessment the reader attached to it. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub user_id: Uuid,
    pub article_id: Uuid,
    pub rating: Rating,
    /// Whether the reader flagged the article as misinformation outright
    pub flagged_as_misinformation: bool,
    pub correct_answers: usize,
    pub total_questions: usize,
    pub completed_at: DateTime<Utc>,
}

/// Aggregated crowd view of one article
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleStatistics {
    pub total_responses: usize,
    /// Weighted credibility score; `None` until the first response
    pub credibility_score: Option<f64>,
    /// Mean self-reported confidence; `None` until the first response
    pub avg_confidence: Option<f64>,
    pub misinformation_flags: usize,
    pub credible_flags: usize,
    pub consensus: Consensus,
}

impl ArticleStatistics {
    /// Fold a snapshot of an article's responses with default thresholds
    pub fn from_responses(responses: &[ResponseRecord]) -> Self {
        Self::from_responses_with(responses, &ConsensusThresholds::default())
    }

    /// Fold a snapshot of an article's responses with explicit thresholds
    pub fn from_responses_with(
        responses: &[ResponseRecord],
        thresholds: &ConsensusThresholds,
    ) -> Self {
        let ratings: Vec<Rating> = responses.iter().map(|r| r.rating).collect();
        let credibility_score = aggregate(&ratings).ok();

        let avg_confidence = if responses.is_empty() {
            None
        } else {
            let total: f64 = responses
                .iter()
                .map(|r| f64::from(r.rating.confidence()))
                .sum();
            Some(total / responses.len() as f64)
        };

        let misinformation_flags = responses
            .iter()
            .filter(|r| r.flagged_as_misinformation)
            .count();
        let consensus = classify_with(credibility_score, thresholds);

        debug!(
            responses = responses.len(),
            consensus = consensus.to_db_string(),
            "recomputed article statistics"
        );

        Self {
            total_responses: responses.len(),
            credibility_score,
            avg_confidence,
            misinformation_flags,
            credible_flags: responses.len() - misinformation_flags,
            consensus,
        }
    }
}

/// Contribution ladder for crowd-sourcing participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionLevel {
    Beginner,
    Intermediate,
    Expert,
}

/// Quiz counts at which the next contribution level starts
const INTERMEDIATE_MIN_QUIZZES: usize = 5;
const EXPERT_MIN_QUIZZES: usize = 20;

impl ContributionLevel {
    /// Level for a given number of completed quizzes
    pub fn for_quiz_count(quizzes_taken: usize) -> Self {
        if quizzes_taken >= EXPERT_MIN_QUIZZES {
            ContributionLevel::Expert
        } else if quizzes_taken >= INTERMEDIATE_MIN_QUIZZES {
            ContributionLevel::Intermediate
        } else {
            ContributionLevel::Beginner
        }
    }

    /// Get human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ContributionLevel::Beginner => "Beginner",
            ContributionLevel::Intermediate => "Intermediate",
            ContributionLevel::Expert => "Expert",
        }
    }
}

impl std::fmt::Display for ContributionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Aggregated history of one participant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStatistics {
    pub total_quizzes_taken: usize,
    pub total_correct_answers: usize,
    pub total_answers: usize,
    /// Percentage of all answered questions answered correctly
    pub accuracy_rate: f64,
    pub contribution_level: ContributionLevel,
}

impl UserStatistics {
    /// Fold a snapshot of one user's completed responses
    pub fn from_responses(responses: &[ResponseRecord]) -> Self {
        let total_correct_answers: usize = responses.iter().map(|r| r.correct_answers).sum();
        let total_answers: usize = responses.iter().map(|r| r.total_questions).sum();
        let accuracy_rate = if total_answers > 0 {
            total_correct_answers as f64 / total_answers as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_quizzes_taken: responses.len(),
            total_correct_answers,
            total_answers,
            accuracy_rate,
            contribution_level: ContributionLevel::for_quiz_count(responses.len()),
        }
    }
}

/// One article's statistics keyed for ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedArticle {
    pub article_id: Uuid,
    pub stats: ArticleStatistics,
}

/// Articles with the highest credibility scores, best first
///
/// Articles with fewer than `min_responses` responses (or no score at
/// all) are excluded so a single enthusiastic reader cannot top the
/// ranking. At most `limit` entries are returned.
pub fn most_credible(
    articles: &[RankedArticle],
    min_responses: usize,
    limit: usize,
) -> Vec<&RankedArticle> {
    let mut ranked: Vec<&RankedArticle> = articles
        .iter()
        .filter(|a| a.stats.credibility_score.is_some() && a.stats.total_responses >= min_responses)
        .collect();
    ranked.sort_by(|a, b| {
        let score_a = a.stats.credibility_score.unwrap_or(f64::MIN);
        let score_b = b.stats.credibility_score.unwrap_or(f64::MIN);
        score_b.total_cmp(&score_a)
    });
    ranked.truncate(limit);
    ranked
}

/// Articles with the most misinformation flags, most-flagged first
///
/// At most `limit` entries are returned.
pub fn most_flagged(articles: &[RankedArticle], limit: usize) -> Vec<&RankedArticle> {
    let mut ranked: Vec<&RankedArticle> = articles
        .iter()
        .filter(|a| a.stats.misinformation_flags > 0)
        .collect();
    ranked.sort_by(|a, b| b.stats.misinformation_flags.cmp(&a.stats.misinformation_flags));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: u8, confidence: u8, flagged: bool, correct: usize, total: usize) -> ResponseRecord {
        ResponseRecord {
            user_id: Uuid::new_v4(),
            article_id: Uuid::new_v4(),
            rating: Rating::new(value, confidence).unwrap(),
            flagged_as_misinformation: flagged,
            correct_answers: correct,
            total_questions: total,
            completed_at: Utc::now(),
        }
    }

    fn stats_with(score_rating: u8, responses: usize, flagged: usize) -> ArticleStatistics {
        let records: Vec<ResponseRecord> = (0..responses)
            .map(|i| record(score_rating, 3, i < flagged, 3, 5))
            .collect();
        ArticleStatistics::from_responses(&records)
    }

    #[test]
    fn test_article_statistics_empty() {
        let stats = ArticleStatistics::from_responses(&[]);
        assert_eq!(stats.total_responses, 0);
        assert_eq!(stats.credibility_score, None);
        assert_eq!(stats.avg_confidence, None);
        assert_eq!(stats.misinformation_flags, 0);
        assert_eq!(stats.credible_flags, 0);
        assert_eq!(stats.consensus, Consensus::Unrated);
    }

    #[test]
    fn test_article_statistics_fold() {
        let records = [
            record(5, 5, false, 4, 5),
            record(4, 3, false, 3, 5),
            record(1, 2, true, 2, 5),
        ];
        let stats = ArticleStatistics::from_responses(&records);

        assert_eq!(stats.total_responses, 3);
        assert_eq!(stats.misinformation_flags, 1);
        assert_eq!(stats.credible_flags, 2);

        let expected_score = ((5.0 * 5.0 + 4.0 * 3.0 + 1.0 * 2.0) / 10.0) * 20.0;
        assert!((stats.credibility_score.unwrap() - expected_score).abs() < 1e-9);

        let expected_confidence = (5.0 + 3.0 + 2.0) / 3.0;
        assert!((stats.avg_confidence.unwrap() - expected_confidence).abs() < 1e-9);

        assert_eq!(stats.consensus, Consensus::HighCredibility);
    }

    #[test]
    fn test_article_statistics_custom_thresholds() {
        let records = [record(4, 3, false, 3, 5)]; // score 80
        let strict = ConsensusThresholds {
            high: 90.0,
            disputed: 50.0,
        };
        let stats = ArticleStatistics::from_responses_with(&records, &strict);
        assert_eq!(stats.consensus, Consensus::Disputed);
    }

    #[test]
    fn test_user_statistics_empty() {
        let stats = UserStatistics::from_responses(&[]);
        assert_eq!(stats.total_quizzes_taken, 0);
        assert_eq!(stats.accuracy_rate, 0.0);
        assert_eq!(stats.contribution_level, ContributionLevel::Beginner);
    }

    #[test]
    fn test_user_statistics_accuracy() {
        let records = [
            record(3, 3, false, 4, 5),
            record(3, 3, false, 2, 5),
        ];
        let stats = UserStatistics::from_responses(&records);
        assert_eq!(stats.total_quizzes_taken, 2);
        assert_eq!(stats.total_correct_answers, 6);
        assert_eq!(stats.total_answers, 10);
        assert!((stats.accuracy_rate - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_contribution_level_bands() {
        assert_eq!(
            ContributionLevel::for_quiz_count(0),
            ContributionLevel::Beginner
        );
        assert_eq!(
            ContributionLevel::for_quiz_count(4),
            ContributionLevel::Beginner
        );
        assert_eq!(
            ContributionLevel::for_quiz_count(5),
            ContributionLevel::Intermediate
        );
        assert_eq!(
            ContributionLevel::for_quiz_count(19),
            ContributionLevel::Intermediate
        );
        assert_eq!(
            ContributionLevel::for_quiz_count(20),
            ContributionLevel::Expert
        );
    }

    #[test]
    fn test_most_credible_ordering_and_gate() {
        let articles = vec![
            RankedArticle {
                article_id: Uuid::new_v4(),
                stats: stats_with(5, 4, 0), // score 100, enough responses
            },
            RankedArticle {
                article_id: Uuid::new_v4(),
                stats: stats_with(4, 3, 0), // score 80
            },
            RankedArticle {
                article_id: Uuid::new_v4(),
                stats: stats_with(5, 2, 0), // score 100 but under-responded
            },
            RankedArticle {
                article_id: Uuid::new_v4(),
                stats: ArticleStatistics::from_responses(&[]), // unrated
            },
        ];

        let ranked = most_credible(&articles, 3, 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].article_id, articles[0].article_id);
        assert_eq!(ranked[1].article_id, articles[1].article_id);
    }

    #[test]
    fn test_most_credible_respects_limit() {
        let articles: Vec<RankedArticle> = (0..5)
            .map(|_| RankedArticle {
                article_id: Uuid::new_v4(),
                stats: stats_with(4, 3, 0),
            })
            .collect();
        assert_eq!(most_credible(&articles, 1, 2).len(), 2);
    }

    #[test]
    fn test_most_flagged_ordering() {
        let articles = vec![
            RankedArticle {
                article_id: Uuid::new_v4(),
                stats: stats_with(2, 4, 1),
            },
            RankedArticle {
                article_id: Uuid::new_v4(),
                stats: stats_with(1, 5, 5),
            },
            RankedArticle {
                article_id: Uuid::new_v4(),
                stats: stats_with(5, 3, 0), // never flagged, excluded
            },
        ];

        let ranked = most_flagged(&articles, 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].article_id, articles[1].article_id);
        assert_eq!(ranked[1].article_id, articles[0].article_id);
    }
}
