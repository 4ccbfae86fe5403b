//! `SeaORM` implementation of the `IngestService` trait.

use crate::db::{GameInsertOutcome, Store};
use crate::domain::{EntityKind, GameId};
use crate::models::{GameRecord, NamedRef};
use crate::services::entity_resolver::EntityResolver;
use crate::services::{IngestError, IngestService};
use tracing::{debug, warn};

/// Upper bound on lookup/insert cycles when racing concurrent ingestions.
const MAX_UPSERT_ATTEMPTS: usize = 3;

/// SeaORM-based implementation of the `IngestService` trait.
pub struct SeaOrmIngestService {
    store: Store,
    resolver: EntityResolver,
}

impl SeaOrmIngestService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        let resolver = EntityResolver::new(store.clone());
        Self { store, resolver }
    }

    /// Lookup-then-insert loop for the canonical Game row.
    ///
    /// Losing an insert race means another ingestion just created a matching
    /// row, so the loop re-runs the lookups instead of failing.
    async fn resolve_or_create(&self, record: &GameRecord) -> Result<i32, IngestError> {
        for _ in 0..MAX_UPSERT_ATTEMPTS {
            if let Some(external_id) = record.external_id
                && let Some(game) = self.store.find_game_by_external_id(external_id).await?
            {
                return Ok(game.id);
            }

            if let Some(game) = self.store.find_game_by_name(&record.name).await? {
                if let Some(external_id) = record.external_id
                    && game.external_id.is_none()
                {
                    self.store
                        .backfill_game_external_id(game.id, external_id)
                        .await?;
                }
                return Ok(game.id);
            }

            match self.store.insert_game(record).await? {
                GameInsertOutcome::Created(id) => return Ok(id),
                GameInsertOutcome::LostRace => {
                    debug!("Lost insert race for game {:?}, retrying lookup", record.name);
                }
            }
        }

        Err(IngestError::Database(format!(
            "gave up ingesting {:?} after {MAX_UPSERT_ATTEMPTS} contended attempts",
            record.name
        )))
    }

    /// Links the four tag categories in parallel.
    async fn link_associations(&self, game_id: i32, record: &GameRecord) {
        tokio::join!(
            self.link_category(game_id, EntityKind::Genre, &record.genres),
            self.link_category(game_id, EntityKind::Platform, &record.platforms),
            self.link_category(game_id, EntityKind::Publisher, &record.publishers),
            self.link_category(game_id, EntityKind::Developer, &record.developers),
        );
    }

    /// Resolves one category's names and links them to the game.
    ///
    /// Association failures are logged instead of propagated: the canonical
    /// Game row already exists and a later re-ingest of the same record will
    /// repair any missing link.
    async fn link_category(&self, game_id: i32, kind: EntityKind, refs: &[NamedRef]) {
        let names = GameRecord::distinct_names(refs);
        if names.is_empty() {
            return;
        }

        match self.resolver.resolve(kind, &names).await {
            Ok(resolved) => {
                let entity_ids: Vec<i32> = names
                    .iter()
                    .filter_map(|name| resolved.get(name).copied())
                    .collect();
                if let Err(err) = self
                    .store
                    .link_game_entities(kind, game_id, &entity_ids)
                    .await
                {
                    warn!("Failed to link {kind} entities for game {game_id}: {err}");
                }
            }
            Err(err) => {
                warn!("Failed to resolve {kind} entities for game {game_id}: {err}");
            }
        }
    }
}

#[async_trait::async_trait]
impl IngestService for SeaOrmIngestService {
    async fn ensure_game(&self, record: &GameRecord) -> Result<GameId, IngestError> {
        let game_id = self.resolve_or_create(record).await?;
        self.link_associations(game_id, record).await;
        Ok(GameId::new(game_id))
    }
}
