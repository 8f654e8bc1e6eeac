use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Self-reported mood on the 1..=5 check-in scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MoodLevel {
    VeryUnhappy,
    Unhappy,
    Neutral,
    Happy,
    VeryHappy,
}

impl MoodLevel {
    pub const ALL: [Self; 5] =
        [Self::VeryUnhappy, Self::Unhappy, Self::Neutral, Self::Happy, Self::VeryHappy];

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryUnhappy => "Very Unhappy",
            Self::Unhappy => "Unhappy",
            Self::Neutral => "Neutral",
            Self::Happy => "Happy",
            Self::VeryHappy => "Very Happy",
        }
    }

    pub fn score(self) -> u8 {
        match self {
            Self::VeryUnhappy => 1,
            Self::Unhappy => 2,
            Self::Neutral => 3,
            Self::Happy => 4,
            Self::VeryHappy => 5,
        }
    }
}

impl TryFrom<u8> for MoodLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::VeryUnhappy),
            2 => Ok(Self::Unhappy),
            3 => Ok(Self::Neutral),
            4 => Ok(Self::Happy),
            5 => Ok(Self::VeryHappy),
            other => Err(DomainError::ScaleOutOfRange { scale: "mood", value: other }),
        }
    }
}

impl From<MoodLevel> for u8 {
    fn from(level: MoodLevel) -> Self {
        level.score()
    }
}

/// Self-reported energy on the 1..=5 check-in scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum EnergyLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl EnergyLevel {
    pub const ALL: [Self; 5] = [Self::VeryLow, Self::Low, Self::Moderate, Self::High, Self::VeryHigh];

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low Energy",
            Self::Low => "Low Energy",
            Self::Moderate => "Moderate Energy",
            Self::High => "High Energy",
            Self::VeryHigh => "Very High Energy",
        }
    }

    pub fn score(self) -> u8 {
        match self {
            Self::VeryLow => 1,
            Self::Low => 2,
            Self::Moderate => 3,
            Self::High => 4,
            Self::VeryHigh => 5,
        }
    }
}

impl TryFrom<u8> for EnergyLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::VeryLow),
            2 => Ok(Self::Low),
            3 => Ok(Self::Moderate),
            4 => Ok(Self::High),
            5 => Ok(Self::VeryHigh),
            other => Err(DomainError::ScaleOutOfRange { scale: "energy", value: other }),
        }
    }
}

impl From<EnergyLevel> for u8 {
    fn from(level: EnergyLevel) -> Self {
        level.score()
    }
}

/// One daily check-in. Never mutated once handed to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthLogEntry {
    pub id: String,
    /// RFC 3339 timestamp of the check-in.
    pub date: String,
    pub mood: MoodLevel,
    pub energy: EnergyLevel,
    /// Blood sugar in mg/dL, when the user measured it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_sugar: Option<u32>,
    #[serde(default)]
    pub notes: String,
}

impl HealthLogEntry {
    /// Stamps a fresh check-in with a new id and the current UTC time.
    pub fn check_in(
        mood: MoodLevel,
        energy: EnergyLevel,
        blood_sugar: Option<u32>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            mood,
            energy,
            blood_sugar,
            notes: notes.into(),
        }
    }
}
