use ludarr::db::Store;
use ludarr::domain::EntityKind;
use ludarr::models::{GameRecord, NamedRef};
use ludarr::services::{IngestService, SeaOrmIngestService};

async fn test_store() -> Store {
    let path = std::env::temp_dir().join(format!("ludarr-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", path.display()))
        .await
        .expect("Failed to create test store")
}

fn sample_record() -> GameRecord {
    GameRecord {
        external_id: Some(3498),
        name: "Grand Theft Auto V".to_string(),
        description: Some("An open world action game.".to_string()),
        image: Some("https://images.example/gta5.jpg".to_string()),
        rating: Some(4.47),
        metacritic_score: Some(92),
        released_date: Some("2013-09-17".to_string()),
        playtime: Some(74),
        genres: vec![NamedRef::new("Action"), NamedRef::new("Adventure")],
        platforms: vec![NamedRef::new("PC"), NamedRef::new("PlayStation 5")],
        publishers: vec![NamedRef::new("Rockstar Games")],
        developers: vec![NamedRef::new("Rockstar North")],
        ..Default::default()
    }
}

#[tokio::test]
async fn reingest_returns_the_same_game() {
    let store = test_store().await;
    let service = SeaOrmIngestService::new(store.clone());

    let first = service.ensure_game(&sample_record()).await.unwrap();
    let second = service.ensure_game(&sample_record()).await.unwrap();
    assert_eq!(first, second);

    let game = store.get_game(first.value()).await.unwrap().unwrap();
    assert_eq!(game.name, "Grand Theft Auto V");
    assert_eq!(game.slug, "grand-theft-auto-v");
    assert_eq!(game.external_id, Some(3498));
}

#[tokio::test]
async fn name_match_backfills_external_id() {
    let store = test_store().await;
    let service = SeaOrmIngestService::new(store.clone());

    let mut record = sample_record();
    record.external_id = None;
    let first = service.ensure_game(&record).await.unwrap();

    let game = store.get_game(first.value()).await.unwrap().unwrap();
    assert_eq!(game.external_id, None);

    let second = service.ensure_game(&sample_record()).await.unwrap();
    assert_eq!(first, second);

    let game = store.get_game(first.value()).await.unwrap().unwrap();
    assert_eq!(game.external_id, Some(3498));
}

#[tokio::test]
async fn external_id_match_wins_over_differing_name() {
    let store = test_store().await;
    let service = SeaOrmIngestService::new(store.clone());

    let first = service.ensure_game(&sample_record()).await.unwrap();

    let mut renamed = sample_record();
    renamed.name = "Grand Theft Auto V (Enhanced)".to_string();
    let second = service.ensure_game(&renamed).await.unwrap();
    assert_eq!(first, second);

    // The original row is untouched by the renamed payload.
    let game = store.get_game(first.value()).await.unwrap().unwrap();
    assert_eq!(game.name, "Grand Theft Auto V");
}

#[tokio::test]
async fn associations_are_linked_and_deduplicated() {
    let store = test_store().await;
    let service = SeaOrmIngestService::new(store.clone());

    let mut record = sample_record();
    record.genres = vec![
        NamedRef::new("Action"),
        NamedRef::new("  Action  "),
        NamedRef::new("Adventure"),
        NamedRef::new(""),
    ];
    let id = service.ensure_game(&record).await.unwrap();

    // Re-ingesting must not duplicate any association.
    service.ensure_game(&record).await.unwrap();

    let names = store.game_entity_names(id.value()).await.unwrap();
    assert_eq!(
        names[&EntityKind::Genre],
        vec!["Action".to_string(), "Adventure".to_string()]
    );
    assert_eq!(
        names[&EntityKind::Platform],
        vec!["PC".to_string(), "PlayStation 5".to_string()]
    );
    assert_eq!(names[&EntityKind::Publisher], vec!["Rockstar Games".to_string()]);
    assert_eq!(names[&EntityKind::Developer], vec!["Rockstar North".to_string()]);
}

#[tokio::test]
async fn tag_rows_are_shared_between_games() {
    let store = test_store().await;
    let service = SeaOrmIngestService::new(store.clone());

    service.ensure_game(&sample_record()).await.unwrap();

    let mut other = sample_record();
    other.external_id = Some(4200);
    other.name = "Bully".to_string();
    other.platforms = vec![NamedRef::new("PC")];
    service.ensure_game(&other).await.unwrap();

    let rows = store
        .find_entities_by_names(EntityKind::Genre, &["Action".to_string()])
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn colliding_slugs_are_disambiguated() {
    let store = test_store().await;
    let service = SeaOrmIngestService::new(store.clone());

    let mut first = sample_record();
    first.external_id = Some(1);
    first.name = "Doom Eternal".to_string();
    let mut second = sample_record();
    second.external_id = Some(2);
    second.name = "DOOM: Eternal".to_string();

    let a = service.ensure_game(&first).await.unwrap();
    let b = service.ensure_game(&second).await.unwrap();
    assert_ne!(a, b);

    let slug_a = store.get_game(a.value()).await.unwrap().unwrap().slug;
    let slug_b = store.get_game(b.value()).await.unwrap().unwrap().slug;
    assert_eq!(slug_a, "doom-eternal");
    assert!(slug_b.starts_with("doom-eternal-"));
}

#[tokio::test]
async fn concurrent_ingest_of_the_same_record_converges() {
    let store = test_store().await;
    let service = SeaOrmIngestService::new(store.clone());

    let record = sample_record();
    let (a, b) = tokio::join!(service.ensure_game(&record), service.ensure_game(&record));
    assert_eq!(a.unwrap(), b.unwrap());

    let found = store.find_game_by_external_id(3498).await.unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn in_memory_store_pings_without_touching_disk() {
    // A single-connection pool keeps the in-memory database shared.
    let store = Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to create in-memory store");
    store.ping().await.unwrap();

    // The scheme-prefixed URL must not be mistaken for a file path.
    assert!(!std::path::Path::new(":memory:").exists());
}

#[tokio::test]
async fn unslugifiable_name_still_gets_a_slug() {
    let store = test_store().await;
    let service = SeaOrmIngestService::new(store.clone());

    let mut record = sample_record();
    record.name = "★☆★".to_string();
    record.slug = None;
    let id = service.ensure_game(&record).await.unwrap();

    let game = store.get_game(id.value()).await.unwrap().unwrap();
    assert_eq!(game.slug, "game-3498");
}
