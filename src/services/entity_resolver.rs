//! Batched get-or-create resolution for catalog sub-entities.
//!
//! The resolver turns a set of tag names (genres, platforms, publishers,
//! developers) into database ids, creating rows for names that do not
//! exist yet. It never issues one query per name: the whole batch is
//! handled in a fetch / conflict-ignoring insert / re-fetch cycle.

use crate::db::Store;
use crate::domain::EntityKind;
use crate::slug::slugify;
use anyhow::Result;
use chrono::Utc;
use std::collections::HashMap;
use tracing::warn;

/// Resolves catalog sub-entity names to ids, creating missing rows.
pub struct EntityResolver {
    store: Store,
}

impl EntityResolver {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Maps each name to the id of its tag row, creating rows as needed.
    ///
    /// Concurrent resolvers may race on the same names; the insert ignores
    /// conflicts and the following re-fetch picks up whichever row won. A
    /// name can also lose a *slug* race against a different name, in which
    /// case one more insert is attempted with a timestamp-suffixed slug.
    /// Names that still cannot be resolved are logged and omitted from the
    /// result rather than failing the whole batch.
    pub async fn resolve(
        &self,
        kind: EntityKind,
        names: &[String],
    ) -> Result<HashMap<String, i32>> {
        if names.is_empty() {
            return Ok(HashMap::new());
        }

        let mut resolved = self.fetch(kind, names).await?;

        let missing = Self::missing(names, &resolved);
        if missing.is_empty() {
            return Ok(resolved);
        }

        let rows: Vec<(String, String)> = missing
            .iter()
            .map(|name| ((*name).clone(), Self::slug_for(name)))
            .collect();
        self.store.insert_entities_ignore_conflicts(kind, &rows).await?;
        resolved = self.fetch(kind, names).await?;

        // Anything still missing lost a slug collision against a distinct
        // name; retry once with a disambiguated slug.
        let still_missing = Self::missing(names, &resolved);
        if !still_missing.is_empty() {
            let suffix = Utc::now().timestamp_millis();
            let rows: Vec<(String, String)> = still_missing
                .iter()
                .map(|name| ((*name).clone(), format!("{}-{suffix}", Self::slug_for(name))))
                .collect();
            self.store.insert_entities_ignore_conflicts(kind, &rows).await?;
            resolved = self.fetch(kind, names).await?;
        }

        for name in Self::missing(names, &resolved) {
            warn!("Could not resolve {kind} entity {name:?}, skipping");
        }

        Ok(resolved)
    }

    async fn fetch(&self, kind: EntityKind, names: &[String]) -> Result<HashMap<String, i32>> {
        let rows = self.store.find_entities_by_names(kind, names).await?;
        Ok(rows.into_iter().map(|(id, name)| (name, id)).collect())
    }

    fn missing(names: &[String], resolved: &HashMap<String, i32>) -> Vec<String> {
        names
            .iter()
            .filter(|name| !resolved.contains_key(*name))
            .cloned()
            .collect()
    }

    // Tag names with no slugifiable characters keep the name verbatim.
    fn slug_for(name: &str) -> String {
        let slug = slugify(name);
        if slug.is_empty() {
            name.to_string()
        } else {
            slug
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_for_falls_back_on_unslugifiable_names() {
        assert_eq!(EntityResolver::slug_for("Role-Playing"), "role-playing");
        assert_eq!(EntityResolver::slug_for("★☆★"), "★☆★");
    }

    #[test]
    fn missing_preserves_input_order() {
        let names = vec!["RPG".to_string(), "Indie".to_string(), "Racing".to_string()];
        let resolved: HashMap<String, i32> = [("Indie".to_string(), 7)].into_iter().collect();
        assert_eq!(
            EntityResolver::missing(&names, &resolved),
            vec!["RPG".to_string(), "Racing".to_string()]
        );
    }
}
