//! Visitor self-service submissions: raw form input and its validated form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::scoring::{Score, SurveyScores};
use crate::domain::foundation::ValidationError;

/// Parses a `YYYY-MM-DD` date. A trailing time part (`T...`) is ignored.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| ValidationError::invalid_format(field, "expected a date as YYYY-MM-DD"))
}

/// Parses a positive integer identifier.
pub fn parse_id(field: &str, raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::invalid_format(field, "must be a positive whole number")),
    }
}

fn required_text(field: &str, raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        Err(ValidationError::empty_field(field))
    } else {
        Ok(value.to_string())
    }
}

/// A positive amount with at most two decimal places, kept in decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonationAmount(String);

impl DonationAmount {
    pub fn parse(field: &str, raw: &str) -> Result<Self, ValidationError> {
        let cleaned: String = raw
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();
        if cleaned.is_empty() {
            return Err(ValidationError::empty_field(field));
        }

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (cleaned.as_str(), ""),
        };
        let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !digits_only(whole) || !digits_only(fraction) || fraction.len() > 2
        {
            return Err(ValidationError::invalid_format(
                field,
                "must be an amount such as 25 or 25.50",
            ));
        }
        if whole.chars().chain(fraction.chars()).all(|c| c == '0') {
            return Err(ValidationError::invalid_format(field, "must be greater than zero"));
        }

        let whole = whole.trim_start_matches('0');
        let whole = if whole.is_empty() { "0" } else { whole };
        let normalized = if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, fraction)
        };
        Ok(DonationAmount(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DonationAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Survey form as posted by the visitor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurveyForm {
    #[serde(default)]
    pub participantid: String,
    #[serde(default)]
    pub eventid: String,
    #[serde(default)]
    pub eventdatetimestart: String,
    #[serde(default)]
    pub surveysatisfactionscore: String,
    #[serde(default)]
    pub surveyusefulnessscore: String,
    #[serde(default)]
    pub surveyinstructorscore: String,
    #[serde(default)]
    pub surveyrecommendationscore: String,
    #[serde(default)]
    pub surveycomments: String,
    #[serde(default)]
    pub surveysubmissiondate: String,
}

/// A validated survey response, not yet tied to a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveySubmission {
    pub participant_id: i64,
    pub event_id: i64,
    pub occurrence_date: NaiveDate,
    pub scores: SurveyScores,
    pub comments: Option<String>,
    pub submitted_on: NaiveDate,
}

impl SurveyForm {
    /// Validates the form. A blank submission date means `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<SurveySubmission, ValidationError> {
        let scores = SurveyScores {
            satisfaction: Score::parse("surveysatisfactionscore", &self.surveysatisfactionscore)?,
            usefulness: Score::parse("surveyusefulnessscore", &self.surveyusefulnessscore)?,
            instructor: Score::parse("surveyinstructorscore", &self.surveyinstructorscore)?,
            recommendation: Score::parse(
                "surveyrecommendationscore",
                &self.surveyrecommendationscore,
            )?,
        };
        let submitted_on = if self.surveysubmissiondate.trim().is_empty() {
            today
        } else {
            parse_date("surveysubmissiondate", &self.surveysubmissiondate)?
        };
        let comments = Some(self.surveycomments.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(SurveySubmission {
            participant_id: parse_id("participantid", &self.participantid)?,
            event_id: parse_id("eventid", &self.eventid)?,
            occurrence_date: parse_date("eventdatetimestart", &self.eventdatetimestart)?,
            scores,
            comments,
            submitted_on,
        })
    }
}

/// Milestone form as posted by the visitor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MilestoneForm {
    #[serde(default)]
    pub participantemail: String,
    #[serde(default)]
    pub milestonetitle: String,
    #[serde(default)]
    pub milestonedate: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneSubmission {
    pub email: String,
    pub title: String,
    pub date: NaiveDate,
}

impl MilestoneForm {
    pub fn validate(&self) -> Result<MilestoneSubmission, ValidationError> {
        Ok(MilestoneSubmission {
            email: required_text("participantemail", &self.participantemail)?,
            title: required_text("milestonetitle", &self.milestonetitle)?,
            date: parse_date("milestonedate", &self.milestonedate)?,
        })
    }
}

/// Donation form as posted by the visitor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonationForm {
    #[serde(default)]
    pub participantemail: String,
    #[serde(default)]
    pub donationamount: String,
    #[serde(default)]
    pub donationdate: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationSubmission {
    pub email: String,
    pub amount: DonationAmount,
    pub date: NaiveDate,
}

impl DonationForm {
    pub fn validate(&self) -> Result<DonationSubmission, ValidationError> {
        Ok(DonationSubmission {
            email: required_text("participantemail", &self.participantemail)?,
            amount: DonationAmount::parse("donationamount", &self.donationamount)?,
            date: parse_date("donationdate", &self.donationdate)?,
        })
    }
}
