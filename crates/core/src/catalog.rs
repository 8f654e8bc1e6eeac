use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::CatalogConfig;
use crate::domain::product::{CatalogEntry, ProductId};
use crate::errors::DomainError;

/// Read-only product catalog, loaded once and shared across synthesis calls.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_category: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut by_category = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            // first entry wins when categories collide
            by_category.entry(normalize_category(&entry.category)).or_insert(position);
        }

        Self { entries, by_category }
    }

    /// The curated products shipped with the application.
    pub fn builtin() -> Self {
        let entries = BUILTIN_PRODUCTS
            .iter()
            .map(|(id, name, description, category)| CatalogEntry {
                id: ProductId((*id).to_string()),
                name: (*name).to_string(),
                description: (*description).to_string(),
                category: (*category).to_string(),
            })
            .collect();

        Self::new(entries)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DomainError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(raw)
            .map_err(|error| DomainError::InvalidCatalog(format!("malformed catalog: {error}")))?;

        for entry in &entries {
            if entry.id.0.trim().is_empty()
                || entry.name.trim().is_empty()
                || entry.category.trim().is_empty()
            {
                return Err(DomainError::InvalidCatalog(format!(
                    "entry `{}` must have a non-blank id, name and category",
                    entry.id
                )));
            }
        }

        Ok(Self::new(entries))
    }

    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let raw = fs::read_to_string(path).map_err(|error| {
            DomainError::InvalidCatalog(format!("could not read `{}`: {error}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    /// Loads the configured catalog file, or the built-in catalog when none is set.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, DomainError> {
        match &config.path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| &entry.id == product_id)
    }

    /// Case-insensitive exact match on the category label.
    pub fn find_by_category(&self, category: &str) -> Option<&CatalogEntry> {
        self.by_category
            .get(&normalize_category(category))
            .and_then(|position| self.entries.get(*position))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_category(category: &str) -> String {
    category.to_lowercase()
}

const BUILTIN_PRODUCTS: [(&str, &str, &str, &str); 7] = [
    (
        "p1",
        "Premium Yoga Mat",
        "A non-slip, eco-friendly mat for your daily yoga and stretching routines.",
        "Fitness Gear",
    ),
    (
        "p2",
        "Guided Gratitude Journal",
        "A structured journal to help you focus on positivity and mindfulness.",
        "Mental Wellness",
    ),
    (
        "p3",
        "Calming Herbal Tea Blend",
        "A caffeine-free blend of chamomile and lavender to promote relaxation.",
        "Nutrition",
    ),
    (
        "p4",
        "Vitamin D3 Supplement",
        "Supports bone health and immune function, especially on cloudy days.",
        "Vitamin D Supplement",
    ),
    (
        "p5",
        "Weighted Blanket",
        "Provides gentle, calming pressure to help reduce anxiety and improve sleep.",
        "Sleep Aid",
    ),
    (
        "p6",
        "Acupressure Mat",
        "A mat with plastic spikes to help relieve muscle tension and stress.",
        "Stress Relief Toy",
    ),
    (
        "p7",
        "Omega-3 Fish Oil",
        "Supports heart and brain health with essential fatty acids.",
        "Joint Supplement",
    ),
];

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::Catalog;
    use crate::config::CatalogConfig;
    use crate::domain::product::{CatalogEntry, ProductId};
    use crate::errors::DomainError;

    fn entry(id: &str, category: &str) -> CatalogEntry {
        CatalogEntry {
            id: ProductId(id.to_string()),
            name: format!("product {id}"),
            description: "test product".to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn builtin_catalog_has_seven_unique_categories() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.by_category.len(), 7);
        assert_eq!(
            catalog.find(&ProductId("p5".to_string())).map(|entry| entry.name.as_str()),
            Some("Weighted Blanket")
        );
    }

    #[test]
    fn category_lookup_ignores_case() {
        let catalog = Catalog::builtin();

        let matched = catalog.find_by_category("sleep aid").map(|entry| entry.id.0.as_str());
        assert_eq!(matched, Some("p5"));
        assert_eq!(
            catalog.find_by_category("VITAMIN D SUPPLEMENT").map(|entry| entry.id.0.as_str()),
            Some("p4")
        );
        assert!(catalog.find_by_category("Unknown").is_none());
    }

    #[test]
    fn category_lookup_does_not_match_substrings() {
        let catalog = Catalog::builtin();
        assert!(catalog.find_by_category("Sleep").is_none());
        assert!(catalog.find_by_category("Sleep Aid Plus").is_none());
    }

    #[test]
    fn duplicate_categories_keep_first_entry() {
        let catalog = Catalog::new(vec![entry("a", "Sleep Aid"), entry("b", "sleep aid")]);

        assert_eq!(catalog.find_by_category("SLEEP AID").map(|entry| entry.id.0.as_str()), Some("a"));
    }

    #[test]
    fn json_catalog_loads_from_file() -> Result<(), String> {
        let dir = TempDir::new().map_err(|err| err.to_string())?;
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"[{"id":"x1","name":"Foam Roller","description":"Recovery aid.","category":"Recovery"}]"#,
        )
        .map_err(|err| err.to_string())?;

        let catalog = Catalog::load(&path).map_err(|err| err.to_string())?;
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.find_by_category("recovery").map(|entry| entry.name.as_str()),
            Some("Foam Roller")
        );
        Ok(())
    }

    #[test]
    fn json_catalog_rejects_blank_categories() {
        let result =
            Catalog::from_json_str(r#"[{"id":"x1","name":"Thing","description":"","category":" "}]"#);
        assert!(matches!(result, Err(DomainError::InvalidCatalog(_))));
    }

    #[test]
    fn unset_catalog_path_uses_builtin_products() {
        let catalog = Catalog::from_config(&CatalogConfig::default()).expect("builtin catalog");
        assert_eq!(catalog.len(), 7);
    }

    #[test]
    fn missing_catalog_file_is_reported() {
        let result = Catalog::load(std::path::Path::new("/nonexistent/wellnest-catalog.json"));
        assert!(matches!(result, Err(DomainError::InvalidCatalog(message)) if message.contains("could not read")));
    }
}
