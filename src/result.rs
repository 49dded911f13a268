//! Assessment result types

use serde::{Deserialize, Serialize};

/// Highest score an assessment can give
pub const MAX_SCORE: u8 = 9;

/// Display bucket for a score
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    /// Not assessable (score 0)
    #[default]
    None,
    /// Needs work (1-4)
    Bad,
    /// Acceptable (5-7)
    Ok,
    /// Good (8-9)
    Good,
}

impl Rating {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Rating::None,
            1..=4 => Rating::Bad,
            5..=7 => Rating::Ok,
            _ => Rating::Good,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::None => write!(f, "none"),
            Rating::Bad => write!(f, "bad"),
            Rating::Ok => write!(f, "ok"),
            Rating::Good => write!(f, "good"),
        }
    }
}

impl std::str::FromStr for Rating {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "na" => Ok(Rating::None),
            "bad" | "problem" => Ok(Rating::Bad),
            "ok" | "improvement" => Ok(Rating::Ok),
            "good" => Ok(Rating::Good),
            _ => Err(()),
        }
    }
}

/// Which results count as valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidityPolicy {
    /// Valid when the score is not zero
    #[default]
    NonZeroScore,
    /// Valid when the assessment reported a score at all
    HasScore,
}

impl std::fmt::Display for ValidityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidityPolicy::NonZeroScore => write!(f, "non-zero-score"),
            ValidityPolicy::HasScore => write!(f, "has-score"),
        }
    }
}

impl std::str::FromStr for ValidityPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "non-zero-score" | "nonzero" => Ok(ValidityPolicy::NonZeroScore),
            "has-score" => Ok(ValidityPolicy::HasScore),
            _ => Err(()),
        }
    }
}

/// Output of one applicable assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Identifier of the assessment that produced this result
    pub id: String,
    /// Score 0-9, 0 = not meaningfully assessable
    pub score: u8,
    /// Feedback text (may be empty)
    pub text: String,
    /// Whether the assessment reported a score
    pub has_score: bool,
}

impl AssessmentResult {
    /// Create a scored result; scores above [`MAX_SCORE`] are clamped
    pub fn new(id: &str, score: u8, text: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            score: score.min(MAX_SCORE),
            text: text.into(),
            has_score: true,
        }
    }

    /// Create a result that carries no score
    pub fn unscored(id: &str) -> Self {
        Self {
            id: id.to_string(),
            score: 0,
            text: String::new(),
            has_score: false,
        }
    }

    pub fn with_score(mut self, score: u8) -> Self {
        self.score = score.min(MAX_SCORE);
        self.has_score = true;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn rating(&self) -> Rating {
        Rating::from_score(self.score)
    }

    pub fn is_valid(&self, policy: ValidityPolicy) -> bool {
        match policy {
            ValidityPolicy::NonZeroScore => self.score != 0,
            ValidityPolicy::HasScore => self.has_score,
        }
    }
}

/// Ordered results of one assessment run
///
/// Results appear in registry order and are never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    results: Vec<AssessmentResult>,
    policy: ValidityPolicy,
}

impl ResultSet {
    pub fn new(results: Vec<AssessmentResult>, policy: ValidityPolicy) -> Self {
        Self { results, policy }
    }

    /// Every result of an applicable assessment
    pub fn all(&self) -> &[AssessmentResult] {
        &self.results
    }

    /// Results that are valid under the set's policy, same relative order
    pub fn valid(&self) -> Vec<&AssessmentResult> {
        self.results
            .iter()
            .filter(|r| r.is_valid(self.policy))
            .collect()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn valid_ids(&self) -> Vec<&str> {
        self.valid().into_iter().map(|r| r.id.as_str()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&AssessmentResult> {
        self.results.iter().find(|r| r.id == id)
    }

    pub fn policy(&self) -> ValidityPolicy {
        self.policy
    }

    /// Same results viewed under another policy
    pub fn with_policy(mut self, policy: ValidityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Valid results grouped by rating, as (bad, ok, good) counts
    pub fn rating_counts(&self) -> (usize, usize, usize) {
        self.valid()
            .iter()
            .fold((0, 0, 0), |(bad, ok, good), r| match r.rating() {
                Rating::Bad => (bad + 1, ok, good),
                Rating::Ok => (bad, ok + 1, good),
                Rating::Good => (bad, ok, good + 1),
                Rating::None => (bad, ok, good),
            })
    }
}
