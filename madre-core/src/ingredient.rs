//! Ingredient reference data
//!
//! Ingredients are supplied by the surrounding application and only looked
//! up by id; the engine never creates or mutates them. `Catalog` wraps the
//! caller's slice and centralizes the classification rules (wet, salt,
//! default flour) so every component applies them identically.

use serde::{Deserialize, Serialize};

/// A single ingredient record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique id within the catalog
    pub id: i64,
    /// Display name
    pub name: String,
    /// Water-like (water, milk, oil) as opposed to flour-like
    #[serde(default)]
    pub wet: bool,
}

impl Ingredient {
    pub fn new(id: i64, name: impl Into<String>, wet: bool) -> Self {
        Self { id, name: name.into(), wet }
    }
}

/// Read-only lookup over the caller-supplied ingredient list
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    entries: &'a [Ingredient],
}

impl<'a> Catalog<'a> {
    pub fn new(entries: &'a [Ingredient]) -> Self {
        Self { entries }
    }

    /// Look up an ingredient by id
    pub fn find(&self, id: i64) -> Option<&'a Ingredient> {
        self.entries.iter().find(|i| i.id == id)
    }

    /// Display name for an id, with a placeholder for ids the catalog
    /// doesn't know
    pub fn name_of(&self, id: i64) -> String {
        match self.find(id) {
            Some(ingredient) => ingredient.name.clone(),
            None => format!("Ingredient #{}", id),
        }
    }

    /// Salt is a dry ingredient identified by name
    pub fn is_salt(name: &str) -> bool {
        name.trim().eq_ignore_ascii_case("salt")
    }

    /// Default flour: the first non-wet entry whose name contains "flour"
    ///
    /// Used as the fallback target when a mix step declares no flours.
    pub fn default_flour(&self) -> Option<&'a Ingredient> {
        self.entries
            .iter()
            .find(|i| !i.wet && i.name.to_lowercase().contains("flour"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_entries() -> Vec<Ingredient> {
        vec![
            Ingredient::new(1, "Water", true),
            Ingredient::new(2, "Bread Flour", false),
            Ingredient::new(3, "Whole Wheat Flour", false),
            Ingredient::new(4, "Salt", false),
        ]
    }

    #[test]
    fn test_find() {
        let entries = catalog_entries();
        let catalog = Catalog::new(&entries);
        assert_eq!(catalog.find(2).map(|i| i.name.as_str()), Some("Bread Flour"));
        assert!(catalog.find(99).is_none());
    }

    #[test]
    fn test_name_of_unknown_id() {
        let entries = catalog_entries();
        let catalog = Catalog::new(&entries);
        assert_eq!(catalog.name_of(99), "Ingredient #99");
    }

    #[test]
    fn test_is_salt() {
        assert!(Catalog::is_salt("Salt"));
        assert!(Catalog::is_salt("  salt "));
        assert!(!Catalog::is_salt("Salted Butter"));
    }

    #[test]
    fn test_default_flour_skips_wet() {
        let entries = vec![
            Ingredient::new(1, "Flour Water Mix", true),
            Ingredient::new(2, "Rye Flour", false),
        ];
        let catalog = Catalog::new(&entries);
        assert_eq!(catalog.default_flour().map(|i| i.id), Some(2));
    }

    #[test]
    fn test_default_flour_missing() {
        let entries = vec![Ingredient::new(1, "Water", true)];
        let catalog = Catalog::new(&entries);
        assert!(catalog.default_flour().is_none());
    }
}
