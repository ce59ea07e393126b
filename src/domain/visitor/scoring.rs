//! Survey score value objects and the derived overall score and NPS bucket.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A single survey answer on the 1 to 5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a score, returning error if outside 1..=5.
    pub fn try_new(field: &str, value: i64) -> Result<Self, ValidationError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Score(value as u8))
        } else {
            Err(ValidationError::out_of_range(
                field,
                Self::MIN as i32,
                Self::MAX as i32,
                value.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            ))
        }
    }

    /// Parses a submitted form value.
    pub fn parse(field: &str, raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        let value = raw
            .parse::<i64>()
            .map_err(|_| ValidationError::invalid_format(field, "must be a whole number"))?;
        Self::try_new(field, value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Net Promoter bucket derived from the recommendation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NpsBucket {
    Promoter,
    Passive,
    Detractor,
}

impl NpsBucket {
    pub fn from_recommendation(score: Score) -> Self {
        match score.value() {
            5 => NpsBucket::Promoter,
            4 => NpsBucket::Passive,
            _ => NpsBucket::Detractor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NpsBucket::Promoter => "Promoter",
            NpsBucket::Passive => "Passive",
            NpsBucket::Detractor => "Detractor",
        }
    }
}

impl fmt::Display for NpsBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four answers of a post-event survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurveyScores {
    pub satisfaction: Score,
    pub usefulness: Score,
    pub instructor: Score,
    pub recommendation: Score,
}

impl SurveyScores {
    /// Mean of the four answers, rounded half up.
    pub fn overall(&self) -> u8 {
        let sum = self.satisfaction.value() as u16
            + self.usefulness.value() as u16
            + self.instructor.value() as u16
            + self.recommendation.value() as u16;
        ((sum + 2) / 4) as u8
    }

    pub fn nps_bucket(&self) -> NpsBucket {
        NpsBucket::from_recommendation(self.recommendation)
    }
}
