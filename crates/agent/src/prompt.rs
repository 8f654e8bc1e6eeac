//! Builds the coaching prompt and the output schema sent to the model.

use serde_json::{json, Value};
use wellnest_core::{HealthLogEntry, UserProfile};

use crate::llm::GenerationRequest;

pub const HEALTH_TIPS_FIELD: &str = "healthTips";
pub const WELLNESS_FIELD: &str = "mentalWellnessSuggestions";
pub const CATEGORIES_FIELD: &str = "productCategories";

/// Items requested per list. Communicated in the instructions only.
pub const ITEMS_PER_LIST: usize = 3;

pub fn compose_request(profile: &UserProfile, entry: &HealthLogEntry) -> GenerationRequest {
    GenerationRequest { prompt: compose_prompt(profile, entry), response_schema: response_schema() }
}

pub fn compose_prompt(profile: &UserProfile, entry: &HealthLogEntry) -> String {
    let mut check_in = vec![
        format!("- Mood: {} (on a scale of 1-5)", entry.mood.label()),
        format!("- Energy Level: {} (on a scale of 1-5)", entry.energy.label()),
    ];
    if let Some(blood_sugar) = entry.blood_sugar {
        check_in.push(format!("- Blood Sugar: {blood_sugar} mg/dL"));
    }
    check_in.push(format!("- Notes: \"{}\"", entry.notes));

    format!(
        "Based on the following user profile and their latest health check-in, act as a compassionate and knowledgeable wellness coach.
Provide actionable health tips and mental wellness suggestions.
Also, provide a list of relevant product *categories* that could help the user.

User Profile:
- Age: {age}
- Height: {height} cm
- Weight: {weight} kg
- Occupation: {occupation}

Today's Check-in:
{check_in}

Your response must be a JSON object.
Provide {ITEMS_PER_LIST} items for each list: {HEALTH_TIPS_FIELD}, {WELLNESS_FIELD}, and {CATEGORIES_FIELD}.
The categories should be general (e.g., \"Sleep Aid\", \"Vitamin D Supplement\", \"Stress Relief Toy\").",
        age = profile.age,
        height = profile.height,
        weight = profile.weight,
        occupation = profile.occupation,
        check_in = check_in.join("\n"),
    )
}

/// Object with exactly three array-of-string properties.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            HEALTH_TIPS_FIELD: {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Actionable physical health tips."
            },
            WELLNESS_FIELD: {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Suggestions for improving mental well-being."
            },
            CATEGORIES_FIELD: {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "General categories for relevant health and wellness products."
            }
        },
        "required": [HEALTH_TIPS_FIELD, WELLNESS_FIELD, CATEGORIES_FIELD]
    })
}

#[cfg(test)]
mod tests {
    use wellnest_core::{EnergyLevel, HealthLogEntry, MoodLevel, UserProfile};

    use super::{compose_prompt, compose_request, response_schema};

    fn profile() -> UserProfile {
        UserProfile {
            name: "Jane".to_string(),
            age: 30,
            height: 165.0,
            weight: 60.0,
            occupation: "Developer".to_string(),
        }
    }

    fn entry(mood: MoodLevel, energy: EnergyLevel, blood_sugar: Option<u32>) -> HealthLogEntry {
        HealthLogEntry {
            id: "log-1".to_string(),
            date: "2024-05-01T08:00:00.000Z".to_string(),
            mood,
            energy,
            blood_sugar,
            notes: "stressed".to_string(),
        }
    }

    #[test]
    fn every_scale_value_renders_its_label() {
        for mood in MoodLevel::ALL {
            for energy in EnergyLevel::ALL {
                let prompt = compose_prompt(&profile(), &entry(mood, energy, None));
                assert!(prompt.contains(&format!("- Mood: {} (on a scale of 1-5)", mood.label())));
                assert!(
                    prompt.contains(&format!("- Energy Level: {} (on a scale of 1-5)", energy.label()))
                );
                assert!(!prompt.contains(&format!("- Mood: {} ", mood.score())));
            }
        }
    }

    #[test]
    fn profile_fields_appear_without_the_name() {
        let prompt = compose_prompt(&profile(), &entry(MoodLevel::Unhappy, EnergyLevel::High, None));

        assert!(prompt.contains("compassionate and knowledgeable wellness coach"));
        assert!(prompt.contains("- Age: 30"));
        assert!(prompt.contains("- Height: 165 cm"));
        assert!(prompt.contains("- Weight: 60 kg"));
        assert!(prompt.contains("- Occupation: Developer"));
        assert!(prompt.contains("- Notes: \"stressed\""));
        assert!(!prompt.contains("Jane"));
    }

    #[test]
    fn blood_sugar_line_only_when_present() {
        let without = compose_prompt(&profile(), &entry(MoodLevel::Happy, EnergyLevel::Low, None));
        assert!(!without.contains("Blood Sugar"));

        let with = compose_prompt(&profile(), &entry(MoodLevel::Happy, EnergyLevel::Low, Some(95)));
        assert!(with.contains("- Blood Sugar: 95 mg/dL"));

        let stripped: String = with
            .lines()
            .filter(|line| !line.starts_with("- Blood Sugar"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(stripped, without);
    }

    #[test]
    fn zero_blood_sugar_is_still_reported() {
        let prompt = compose_prompt(&profile(), &entry(MoodLevel::Happy, EnergyLevel::Low, Some(0)));
        assert!(prompt.contains("- Blood Sugar: 0 mg/dL"));
    }

    #[test]
    fn instructions_ask_for_three_items_per_list() {
        let prompt = compose_prompt(&profile(), &entry(MoodLevel::Neutral, EnergyLevel::Moderate, None));
        assert!(prompt.contains(
            "Provide 3 items for each list: healthTips, mentalWellnessSuggestions, and productCategories."
        ));
    }

    #[test]
    fn schema_declares_three_string_arrays() {
        let schema = response_schema();
        let properties = schema["properties"].as_object().expect("properties object");

        assert_eq!(properties.len(), 3);
        for field in ["healthTips", "mentalWellnessSuggestions", "productCategories"] {
            assert_eq!(properties[field]["type"], "ARRAY");
            assert_eq!(properties[field]["items"]["type"], "STRING");
        }
        assert_eq!(schema["required"].as_array().map(Vec::len), Some(3));
        assert!(schema.get("maxItems").is_none());
    }

    #[test]
    fn request_is_a_pure_function_of_inputs() {
        let entry = entry(MoodLevel::VeryHappy, EnergyLevel::VeryHigh, Some(110));
        assert_eq!(compose_request(&profile(), &entry), compose_request(&profile(), &entry));
    }
}
