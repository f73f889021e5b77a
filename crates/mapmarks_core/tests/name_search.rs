use mapmarks_core::db::open_db_in_memory;
use mapmarks_core::{PlaceStore, SqlitePlaceRepository};

#[test]
fn search_returns_substring_matches_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    repo.insert_place("Library", 60.98, 25.66).unwrap();
    repo.insert_place("Lahti Hall", 60.99, 25.67).unwrap();
    repo.insert_place("Harbour", 61.00, 25.68).unwrap();

    let hits = repo.search_places("lah").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Lahti Hall");
}

#[test]
fn search_is_case_insensitive() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    repo.insert_place("Lahti Hall", 60.99, 25.67).unwrap();

    assert_eq!(repo.search_places("LAHTI").unwrap().len(), 1);
    assert_eq!(repo.search_places("lahti").unwrap().len(), 1);
    assert_eq!(repo.search_places("hAlL").unwrap().len(), 1);
}

#[test]
fn search_matches_anywhere_in_the_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    repo.insert_place("Old Town Library", 60.98, 25.66).unwrap();

    assert_eq!(repo.search_places("Town").unwrap().len(), 1);
    assert_eq!(repo.search_places("rary").unwrap().len(), 1);
    assert!(repo.search_places("Harbour").unwrap().is_empty());
}

#[test]
fn empty_query_returns_the_full_set() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    repo.insert_place("Library", 60.98, 25.66).unwrap();
    repo.insert_place("Lahti Hall", 60.99, 25.67).unwrap();

    assert_eq!(repo.search_places("").unwrap().len(), 2);
}

#[test]
fn search_on_empty_store_returns_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    assert!(repo.search_places("anything").unwrap().is_empty());
}

#[test]
fn like_wildcards_in_queries_match_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    repo.insert_place("100% viewpoint", 60.98, 25.66).unwrap();
    repo.insert_place("100 viewpoint", 60.99, 25.67).unwrap();
    repo.insert_place("spot_a", 61.00, 25.68).unwrap();
    repo.insert_place("spotXa", 61.01, 25.69).unwrap();

    let percent_hits = repo.search_places("100%").unwrap();
    assert_eq!(percent_hits.len(), 1);
    assert_eq!(percent_hits[0].name, "100% viewpoint");

    let underscore_hits = repo.search_places("spot_").unwrap();
    assert_eq!(underscore_hits.len(), 1);
    assert_eq!(underscore_hits[0].name, "spot_a");
}

#[test]
fn search_ordering_matches_list_ordering() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlaceRepository::new(&conn);

    let a = repo.insert_place("Stop north", 1.0, 1.0).unwrap();
    let b = repo.insert_place("Stop south", 2.0, 2.0).unwrap();
    conn.execute(
        "UPDATE places SET timestamp = ?1 WHERE id = ?2;",
        rusqlite::params![1_000, a],
    )
    .unwrap();
    conn.execute(
        "UPDATE places SET timestamp = ?1 WHERE id = ?2;",
        rusqlite::params![2_000, b],
    )
    .unwrap();

    let ids: Vec<i64> = repo
        .search_places("Stop")
        .unwrap()
        .into_iter()
        .map(|place| place.id)
        .collect();
    assert_eq!(ids, [b, a]);
}
