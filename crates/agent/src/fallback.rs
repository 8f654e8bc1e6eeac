use wellnest_core::{AiResponse, ProductRecommendation, RecommendationSource};

const HEALTH_TIPS: [&str; 3] = [
    "Stay hydrated by drinking plenty of water.",
    "Aim for 7-8 hours of quality sleep per night.",
    "Incorporate a 30-minute walk into your daily routine.",
];

const WELLNESS_SUGGESTIONS: [&str; 3] = [
    "Practice mindfulness or meditation for 5-10 minutes.",
    "Connect with a friend or loved one.",
    "Jot down three things you're grateful for.",
];

// (name, description, category, source, link)
const PRODUCTS: [(&str, &str, &str, RecommendationSource, &str); 3] = [
    (
        "Yoga Mat",
        "For stretching and light exercise at home.",
        "Fitness",
        RecommendationSource::Internal,
        "#",
    ),
    (
        "Search for Yoga Mats",
        "Find yoga mats online.",
        "Fitness",
        RecommendationSource::External,
        "https://www.google.com/search?q=Yoga+Mat&tbm=shop",
    ),
    (
        "Journal",
        "To practice gratitude and process thoughts.",
        "Mental Wellness",
        RecommendationSource::Internal,
        "#",
    ),
];

/// Fixed recommendation set returned whenever the model-backed path fails.
pub fn fallback_response() -> AiResponse {
    AiResponse {
        health_tips: HEALTH_TIPS.iter().map(|tip| tip.to_string()).collect(),
        mental_wellness_suggestions: WELLNESS_SUGGESTIONS
            .iter()
            .map(|suggestion| suggestion.to_string())
            .collect(),
        product_recommendations: PRODUCTS
            .iter()
            .map(|(name, description, category, source, link)| ProductRecommendation {
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                source: *source,
                link: link.to_string(),
            })
            .collect(),
    }
}
