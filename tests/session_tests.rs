//! End-to-end session tests: selection seeding, persistence across
//! restarts, and share-link round trips, all against a real store file.

use tempfile::TempDir;

use globalclock::catalog;
use globalclock::selection::Selection;
use globalclock::share;
use globalclock::store::HubStore;

fn store_in(dir: &TempDir) -> HubStore {
    HubStore::with_path(dir.path().join("hubs.toml"))
}

#[test]
fn test_fresh_session_shows_only_detected_city() {
    let dir = TempDir::new().unwrap();
    let selection = Selection::initialize(None, store_in(&dir), "Asia/Tokyo".to_string());
    assert_eq!(selection.ids(), vec!["tokyo"]);
}

#[test]
fn test_selection_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let mut selection =
            Selection::initialize(None, store_in(&dir), "Europe/London".to_string());
        selection.add(catalog::find("dubai").unwrap());
        selection.add(catalog::find("sydney").unwrap());
    }

    // Second session: no shared link, same machine.
    let restored = Selection::initialize(None, store_in(&dir), "Europe/London".to_string());
    assert_eq!(restored.ids(), vec!["london", "dubai", "sydney"]);
}

#[test]
fn test_removal_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let mut selection = Selection::initialize(
            Some("cities=london,tokyo,paris"),
            store_in(&dir),
            "Europe/London".to_string(),
        );
        selection.remove("tokyo");
    }

    let restored = Selection::initialize(None, store_in(&dir), "Europe/London".to_string());
    assert_eq!(restored.ids(), vec!["london", "paris"]);
}

#[test]
fn test_shared_link_overrides_persisted_state() {
    let dir = TempDir::new().unwrap();
    store_in(&dir).save("tokyo,paris").unwrap();

    let selection = Selection::initialize(
        Some("https://globalclock.app/?cities=cairo"),
        store_in(&dir),
        "Africa/Cairo".to_string(),
    );
    assert_eq!(selection.ids(), vec!["cairo"]);

    // Opening the link also overwrites what is on disk.
    assert_eq!(store_in(&dir).load().as_deref(), Some("cairo"));
}

#[test]
fn test_share_link_opens_on_another_machine() {
    // Machine A in Seoul builds a board and shares it.
    let a_dir = TempDir::new().unwrap();
    let mut original = Selection::initialize(
        Some("cities=london,newyork"),
        store_in(&a_dir),
        "Asia/Seoul".to_string(),
    );
    original.add(catalog::find("mumbai").unwrap());
    let url = original.share_url();

    // Machine B in Berlin opens the link with its own (empty) store.
    let b_dir = TempDir::new().unwrap();
    let opened = Selection::initialize(Some(&url), store_in(&b_dir), "Europe/Berlin".to_string());

    // B sees A's full board, plus its own local city prepended.
    assert_eq!(
        opened.ids(),
        vec!["berlin", "seoul", "london", "newyork", "mumbai"]
    );
}

#[test]
fn test_stale_persisted_ids_are_dropped() {
    let dir = TempDir::new().unwrap();
    store_in(&dir).save("london,oldcity,tokyo").unwrap();

    let selection = Selection::initialize(None, store_in(&dir), "Europe/London".to_string());
    assert_eq!(selection.ids(), vec!["london", "tokyo"]);
}

#[test]
fn test_bare_query_string_accepted_as_link() {
    let dir = TempDir::new().unwrap();
    let selection = Selection::initialize(
        Some("cities=paris,singapore"),
        store_in(&dir),
        "Europe/Paris".to_string(),
    );
    assert_eq!(selection.ids(), vec!["paris", "singapore"]);
}

#[test]
fn test_share_url_is_parseable() {
    let dir = TempDir::new().unwrap();
    let selection = Selection::initialize(
        Some("cities=losangeles,saopaulo"),
        store_in(&dir),
        "America/Los_Angeles".to_string(),
    );

    let url = selection.share_url();
    let ids = share::parse_shared_ids(&url).unwrap();
    assert_eq!(ids, vec!["losangeles", "saopaulo"]);
}

#[test]
fn test_corrupt_store_degrades_to_fresh_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hubs.toml");
    std::fs::write(&path, "not [ valid toml").unwrap();

    let selection = Selection::initialize(
        None,
        HubStore::with_path(path),
        "Asia/Dubai".to_string(),
    );
    assert_eq!(selection.ids(), vec!["dubai"]);
}
