// Readings screen domain models
use super::pond::Severity;
use super::telemetry::Parameter;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingCard {
    pub parameter: Parameter,
    pub title: String,
    pub unit: String,
    pub value: f64,
    pub precision: i32,
    pub status: Severity,
    pub trend: Trend,
}

impl ReadingCard {
    pub fn new(parameter: Parameter, value: f64, precision: i32, trend: Trend) -> Self {
        Self {
            parameter,
            title: parameter.title().to_string(),
            unit: parameter.unit().to_string(),
            value,
            precision,
            status: Severity::Optimal,
            trend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub time: String,
    pub value: f64,
}

impl HistoryPoint {
    pub fn new(time: &str, value: f64) -> Self {
        Self {
            time: time.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Like,
    Dislike,
}

impl Feedback {
    /// Picking the active choice again clears it.
    pub fn toggle(current: Option<Feedback>, choice: Feedback) -> Option<Feedback> {
        if current == Some(choice) {
            None
        } else {
            Some(choice)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feedback choice {0:?}")]
pub struct FeedbackParseError(String);

impl FromStr for Feedback {
    type Err = FeedbackParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Feedback::Like),
            "dislike" => Ok(Feedback::Dislike),
            other => Err(FeedbackParseError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingsOverview {
    pub pond_name: String,
    pub cards: Vec<ReadingCard>,
    pub history_parameter: Parameter,
    pub history: Vec<HistoryPoint>,
    pub recommendation: String,
}
