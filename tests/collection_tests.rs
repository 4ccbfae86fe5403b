use ludarr::db::Store;
use ludarr::domain::{EntryStatus, GameId, UserId};
use ludarr::models::GameRecord;
use ludarr::services::{
    CollectionError, CollectionService, IngestService, SeaOrmCollectionService,
    SeaOrmIngestService,
};

async fn test_store() -> Store {
    let path = std::env::temp_dir().join(format!("ludarr-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", path.display()))
        .await
        .expect("Failed to create test store")
}

async fn seed_game(store: &Store, external_id: i64, name: &str) -> GameId {
    let service = SeaOrmIngestService::new(store.clone());
    let record = GameRecord {
        external_id: Some(external_id),
        name: name.to_string(),
        ..Default::default()
    };
    service.ensure_game(&record).await.unwrap()
}

#[tokio::test]
async fn add_and_list_collection() {
    let store = test_store().await;
    let service = SeaOrmCollectionService::new(store.clone());
    let user = UserId::new(1);

    let witcher = seed_game(&store, 10, "The Witcher 3").await;
    let hades = seed_game(&store, 11, "Hades").await;

    service
        .add_to_collection(user, witcher, "completed", Some(10))
        .await
        .unwrap();
    service
        .add_to_collection(user, hades, "playing", None)
        .await
        .unwrap();

    let entries = service.collection_for_user(user).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].game_id, witcher);
    assert_eq!(entries[0].status, EntryStatus::Completed);
    assert_eq!(entries[0].score, Some(10));
    assert_eq!(entries[0].game_name, "The Witcher 3");
    assert_eq!(entries[1].status, EntryStatus::Playing);
    assert_eq!(entries[1].score, None);
}

#[tokio::test]
async fn duplicate_add_is_rejected() {
    let store = test_store().await;
    let service = SeaOrmCollectionService::new(store.clone());
    let user = UserId::new(1);
    let game = seed_game(&store, 10, "The Witcher 3").await;

    service
        .add_to_collection(user, game, "playing", None)
        .await
        .unwrap();
    let err = service
        .add_to_collection(user, game, "completed", None)
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::AlreadyExists(id) if id == game));

    // The same game is fine for a different user.
    service
        .add_to_collection(UserId::new(2), game, "completed", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn invalid_status_and_score_are_rejected() {
    let store = test_store().await;
    let service = SeaOrmCollectionService::new(store.clone());
    let user = UserId::new(1);
    let game = seed_game(&store, 10, "The Witcher 3").await;

    let err = service
        .add_to_collection(user, game, "binge_watching", None)
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::Validation(_)));

    let err = service
        .add_to_collection(user, game, "playing", Some(11))
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::Validation(_)));

    let err = service
        .add_to_collection(user, game, "playing", Some(0))
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::Validation(_)));

    // Nothing was stored by the failed attempts.
    assert!(service.collection_for_user(user).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_requires_an_existing_entry() {
    let store = test_store().await;
    let service = SeaOrmCollectionService::new(store.clone());
    let user = UserId::new(1);
    let game = seed_game(&store, 10, "The Witcher 3").await;

    let err = service
        .update_collection_entry(user, game, Some("completed"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::NotFound(id) if id == game));

    service
        .add_to_collection(user, game, "playing", Some(7))
        .await
        .unwrap();
    service
        .update_collection_entry(user, game, Some("completed"), Some(9))
        .await
        .unwrap();

    let entries = service.collection_for_user(user).await.unwrap();
    assert_eq!(entries[0].status, EntryStatus::Completed);
    assert_eq!(entries[0].score, Some(9));
}

#[tokio::test]
async fn remove_is_not_idempotent() {
    let store = test_store().await;
    let service = SeaOrmCollectionService::new(store.clone());
    let user = UserId::new(1);
    let game = seed_game(&store, 10, "The Witcher 3").await;

    service
        .add_to_collection(user, game, "dropped", None)
        .await
        .unwrap();
    service.remove_from_collection(user, game).await.unwrap();

    let err = service.remove_from_collection(user, game).await.unwrap_err();
    assert!(matches!(err, CollectionError::NotFound(id) if id == game));
}
