// SPDX-License-Identifier: MIT

//! Token store and snapshot cache tests against a real temp directory.

use tempfile::TempDir;

use setoran_tracker::store::{SnapshotCache, TokenSet, TokenStore};

mod common;

fn token_store(dir: &TempDir) -> TokenStore {
    TokenStore::new(dir.path().join("tokens.json"))
}

#[test]
fn token_round_trip_preserves_the_triple() {
    let dir = TempDir::new().unwrap();
    let store = token_store(&dir);

    let tokens = TokenSet {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        id_token: "id".to_string(),
    };
    store.save(&tokens).expect("save");

    assert_eq!(store.load(), Some(tokens));
    assert_eq!(store.access_token().as_deref(), Some("access"));
    assert_eq!(store.refresh_token().as_deref(), Some("refresh"));
    assert_eq!(store.id_token().as_deref(), Some("id"));
}

#[test]
fn save_replaces_the_whole_triple() {
    let dir = TempDir::new().unwrap();
    let store = token_store(&dir);

    store.save(&common::plain_token_set("1")).expect("save");
    store.save(&common::plain_token_set("2")).expect("save");

    assert_eq!(store.load(), Some(common::plain_token_set("2")));
}

#[test]
fn clear_removes_tokens_and_tolerates_absence() {
    let dir = TempDir::new().unwrap();
    let store = token_store(&dir);

    // Clearing an empty store is fine.
    store.clear().expect("clear empty");

    store.save(&common::plain_token_set("1")).expect("save");
    store.clear().expect("clear");

    assert_eq!(store.load(), None);
    assert_eq!(store.access_token(), None);
}

#[test]
fn corrupt_token_file_reads_as_absent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tokens.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let store = TokenStore::new(path);
    assert_eq!(store.load(), None);
}

#[test]
fn missing_store_reads_as_absent() {
    let dir = TempDir::new().unwrap();
    let store = token_store(&dir);
    assert_eq!(store.load(), None);
}

#[test]
fn snapshot_round_trip_is_field_for_field_equal() {
    let dir = TempDir::new().unwrap();
    let cache = SnapshotCache::new(dir.path().join("last_student.json"));

    let detail = common::sample_detail("12050001", 5);
    cache.save(&detail).expect("save");

    assert_eq!(cache.load(), Some(detail));
}

#[test]
fn snapshot_slot_is_last_write_wins() {
    let dir = TempDir::new().unwrap();
    let cache = SnapshotCache::new(dir.path().join("last_student.json"));

    cache.save(&common::sample_detail("12050001", 5)).expect("save");
    cache.save(&common::sample_detail("12050002", 3)).expect("save");

    let loaded = cache.load().expect("snapshot");
    assert_eq!(loaded.info.nim, "12050002");
    assert_eq!(loaded.setoran.detail.len(), 3);
}

#[test]
fn stores_create_their_parent_directory() {
    let dir = TempDir::new().unwrap();
    let store = TokenStore::new(dir.path().join("nested/data/tokens.json"));

    store.save(&common::plain_token_set("1")).expect("save");
    assert_eq!(store.load(), Some(common::plain_token_set("1")));
}
