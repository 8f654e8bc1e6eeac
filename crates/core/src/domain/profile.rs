use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Static onboarding profile supplied by the caller for one synthesis call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    /// Height in centimetres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    pub occupation: String,
}

impl UserProfile {
    /// Applies the onboarding rules and reports every violated field at once.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Vec::new();

        if self.name.trim().is_empty() {
            problems.push("name is required");
        }
        if self.age == 0 {
            problems.push("age must be greater than zero");
        }
        if !is_positive(self.height) {
            problems.push("height must be greater than zero");
        }
        if !is_positive(self.weight) {
            problems.push("weight must be greater than zero");
        }
        if self.occupation.trim().is_empty() {
            problems.push("occupation is required");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidProfile(problems.join("; ")))
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
