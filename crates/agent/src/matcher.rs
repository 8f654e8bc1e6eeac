use wellnest_core::{Catalog, CatalogEntry, ProductId, ProductRecommendation, RecommendationSource};

const SHOPPING_SEARCH_URL: &str = "https://www.google.com/search";

/// Reconciles model-suggested categories against the local catalog.
#[derive(Clone, Copy, Debug)]
pub struct CatalogMatcher<'a> {
    catalog: &'a Catalog,
}

impl<'a> CatalogMatcher<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// For each category in order: the matching catalog entry (if any), then
    /// one web-search recommendation. Nothing is deduplicated across categories.
    pub fn recommend(&self, categories: &[String]) -> Vec<ProductRecommendation> {
        let mut recommendations = Vec::with_capacity(categories.len() * 2);

        for category in categories {
            if let Some(entry) = self.catalog.find_by_category(category) {
                recommendations.push(internal_recommendation(entry));
            }
            recommendations.push(external_recommendation(category));
        }

        recommendations
    }
}

fn internal_recommendation(entry: &CatalogEntry) -> ProductRecommendation {
    ProductRecommendation {
        name: entry.name.clone(),
        description: entry.description.clone(),
        category: entry.category.clone(),
        source: RecommendationSource::Internal,
        link: internal_link(&entry.id),
    }
}

fn external_recommendation(category: &str) -> ProductRecommendation {
    ProductRecommendation {
        name: format!("Shop for {category}"),
        description: format!("Find {} on Google Shopping.", category.to_lowercase()),
        category: category.to_string(),
        source: RecommendationSource::External,
        link: shopping_search_link(category),
    }
}

pub fn internal_link(product_id: &ProductId) -> String {
    format!("/product/{product_id}")
}

pub fn shopping_search_link(query: &str) -> String {
    format!("{SHOPPING_SEARCH_URL}?q={}&tbm=shop", urlencoding::encode(query))
}
