use mapmarks_core::db::{open_db, open_db_in_memory};
use mapmarks_core::{Place, PlaceStore, SqlitePlaceRepository};

#[test]
fn insert_assigns_distinct_increasing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    let first = repo.insert_place("Library", 60.98, 25.66).unwrap();
    let second = repo.insert_place("Lahti Hall", 60.99, 25.67).unwrap();
    let third = repo.insert_place("Harbour", 61.00, 25.68).unwrap();

    assert_eq!(first, 1);
    assert!(second > first);
    assert!(third > second);
}

#[test]
fn insert_and_list_single_place() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    let id = repo.insert_place("Library", 60.98, 25.66).unwrap();
    assert_eq!(id, 1);

    let places = repo.list_places().unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].id, 1);
    assert_eq!(places[0].name, "Library");
    assert_eq!(places[0].latitude, 60.98);
    assert_eq!(places[0].longitude, 25.66);
    assert!(places[0].timestamp > 0);
}

#[test]
fn list_is_ordered_most_recent_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    let a = repo.insert_place("Oldest", 1.0, 1.0).unwrap();
    let b = repo.insert_place("Middle", 2.0, 2.0).unwrap();
    let c = repo.insert_place("Newest", 3.0, 3.0).unwrap();

    // Inserts within one test can share a millisecond; pin timestamps
    // so the ordering under test is unambiguous.
    set_timestamp(&conn, a, 1_000);
    set_timestamp(&conn, b, 2_000);
    set_timestamp(&conn, c, 3_000);

    let names: Vec<String> = repo
        .list_places()
        .unwrap()
        .into_iter()
        .map(|place| place.name)
        .collect();
    assert_eq!(names, ["Newest", "Middle", "Oldest"]);
}

#[test]
fn timestamp_ties_break_by_id_descending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    let a = repo.insert_place("First", 1.0, 1.0).unwrap();
    let b = repo.insert_place("Second", 2.0, 2.0).unwrap();
    set_timestamp(&conn, a, 5_000);
    set_timestamp(&conn, b, 5_000);

    let ids: Vec<i64> = repo
        .list_places()
        .unwrap()
        .into_iter()
        .map(|place| place.id)
        .collect();
    assert_eq!(ids, [b, a]);
}

#[test]
fn empty_store_lists_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    assert!(repo.list_places().unwrap().is_empty());
    assert!(repo.most_recent_place().unwrap().is_none());
}

#[test]
fn most_recent_place_follows_timestamp_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    let a = repo.insert_place("Older", 1.0, 1.0).unwrap();
    let b = repo.insert_place("Newer", 2.0, 2.0).unwrap();
    set_timestamp(&conn, a, 1_000);
    set_timestamp(&conn, b, 2_000);

    let most_recent = repo.most_recent_place().unwrap().unwrap();
    assert_eq!(most_recent.id, b);
    assert_eq!(most_recent.name, "Newer");
}

#[test]
fn delete_by_id_returns_one_then_zero() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    let id = repo.insert_place("Library", 60.98, 25.66).unwrap();

    assert_eq!(repo.delete_by_id(id).unwrap(), 1);
    assert!(repo.list_places().unwrap().is_empty());
    assert_eq!(repo.delete_by_id(id).unwrap(), 0);
}

#[test]
fn delete_by_coordinates_matches_within_tolerance() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    repo.insert_place("Boundary", 60.9800001, 25.6600001).unwrap();
    repo.insert_place("Too far", 60.981, 25.661).unwrap();

    // One ten-millionth of a degree off on both axes still matches.
    assert_eq!(repo.delete_by_coordinates(60.98, 25.66).unwrap(), 1);

    let remaining = repo.list_places().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Too far");

    assert_eq!(repo.delete_by_coordinates(60.98, 25.66).unwrap(), 0);
}

#[test]
fn delete_by_coordinates_can_remove_multiple_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    repo.insert_place("Twin A", 60.98, 25.66).unwrap();
    repo.insert_place("Twin B", 60.98, 25.66).unwrap();
    repo.insert_place("Elsewhere", 61.5, 26.0).unwrap();

    assert_eq!(repo.delete_by_coordinates(60.98, 25.66).unwrap(), 2);
    assert_eq!(repo.list_places().unwrap().len(), 1);
}

#[test]
fn delete_by_name_is_exact_match() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    repo.insert_place("Library", 1.0, 1.0).unwrap();
    repo.insert_place("Library", 2.0, 2.0).unwrap();
    repo.insert_place("Library Annex", 3.0, 3.0).unwrap();

    assert_eq!(repo.delete_by_name("Library").unwrap(), 2);
    assert_eq!(repo.delete_by_name("library").unwrap(), 0);

    let remaining = repo.list_places().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Library Annex");
}

#[test]
fn file_backed_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("places.db");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqlitePlaceRepository::new(&conn);
        repo.insert_place("Library", 60.98, 25.66).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqlitePlaceRepository::new(&conn);
    let places = repo.list_places().unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "Library");
}

#[test]
fn listed_places_are_transient_copies() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    repo.insert_place("Library", 60.98, 25.66).unwrap();

    let mut copy: Place = repo.list_places().unwrap().remove(0);
    copy.name = "Renamed locally".to_string();

    // Mutating the read-back copy never touches the stored row.
    assert_eq!(repo.list_places().unwrap()[0].name, "Library");
}

fn set_timestamp(conn: &rusqlite::Connection, id: i64, timestamp: i64) {
    conn.execute(
        "UPDATE places SET timestamp = ?1 WHERE id = ?2;",
        rusqlite::params![timestamp, id],
    )
    .unwrap();
}
