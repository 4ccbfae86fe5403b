use serde::{Deserialize, Serialize};

/// A named sub-record reference inside an ingestion payload.
///
/// The provider nests genre/platform/publisher/developer references as
/// objects; only the name matters to the catalog core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

impl NamedRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Raw game record handed to the catalog core by the (external) provider
/// client, already validated and authorized by the excluded layers.
///
/// `external_id` is the provider's stable identifier; `slug` is an optional
/// caller-supplied identifier used as a fallback slug base when the name
/// slugifies to nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameRecord {
    pub external_id: Option<i64>,
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f32>,
    pub metacritic_score: Option<i32>,
    pub released_date: Option<String>,
    pub playtime: Option<i32>,
    pub genres: Vec<NamedRef>,
    pub platforms: Vec<NamedRef>,
    pub publishers: Vec<NamedRef>,
    pub developers: Vec<NamedRef>,
}

impl GameRecord {
    /// Distinct non-empty names for one nested category, first occurrence
    /// order preserved. Dedup is case-sensitive exact match.
    #[must_use]
    pub fn distinct_names(refs: &[NamedRef]) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        refs.iter()
            .map(|r| r.name.trim())
            .filter(|name| !name.is_empty())
            .filter(|name| seen.insert(name.to_string()))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_names_dedups_and_drops_empties() {
        let refs = vec![
            NamedRef::new("RPG"),
            NamedRef::new(""),
            NamedRef::new("RPG"),
            NamedRef::new("  "),
            NamedRef::new("Roguelike"),
        ];
        assert_eq!(GameRecord::distinct_names(&refs), vec!["RPG", "Roguelike"]);
    }

    #[test]
    fn record_deserializes_provider_shape() {
        let record: GameRecord = serde_json::from_str(
            r#"{
                "externalId": 500,
                "name": "Foo",
                "metacriticScore": 84,
                "genres": [{"name": "RPG"}]
            }"#,
        )
        .unwrap();
        assert_eq!(record.external_id, Some(500));
        assert_eq!(record.metacritic_score, Some(84));
        assert_eq!(record.genres, vec![NamedRef::new("RPG")]);
        assert!(record.platforms.is_empty());
    }
}
