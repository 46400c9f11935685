use quiz_core::model::TrackId;
use quiz_core::session::ProgressSnapshot;
use storage::repository::{PassengerRepository, ProgressRepository, StorageError};
use storage::sqlite::SqliteRepository;
use storage::{PROGRESS_KEY, Storage};

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrip_persists_progress() {
    let repo = connect("memdb_progress").await;
    assert!(repo.load_progress().await.unwrap().is_none());

    let first = ProgressSnapshot::new(TrackId::new("y2_3"), [0]);
    repo.save_progress(&first).await.unwrap();
    let second = ProgressSnapshot::new(TrackId::new("y2_3"), [0, 4]);
    repo.save_progress(&second).await.unwrap();

    assert_eq!(repo.load_progress().await.unwrap(), Some(second));

    repo.clear_progress().await.unwrap();
    assert!(repo.load_progress().await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_surfaces_corrupt_progress() {
    let repo = connect("memdb_corrupt").await;
    repo.put_raw(PROGRESS_KEY, "not json").await.unwrap();
    let err = repo.load_progress().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
    repo.save_passenger_name("Mateo").await.unwrap();
    assert_eq!(
        repo.get_passenger_name().await.unwrap().as_deref(),
        Some("Mateo")
    );
}

#[tokio::test]
async fn storage_sqlite_wires_both_repositories() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage
        .progress
        .save_progress(&ProgressSnapshot::new(TrackId::new("y4_6"), [1]))
        .await
        .unwrap();
    storage.passenger.save_passenger_name("Ana").await.unwrap();

    let loaded = storage.progress.load_progress().await.unwrap().unwrap();
    assert_eq!(loaded.track_id, TrackId::new("y4_6"));
    assert_eq!(
        storage.passenger.get_passenger_name().await.unwrap().as_deref(),
        Some("Ana")
    );
}
