//! End-to-end flow: catalog → filter → layout → launch lifecycle

use std::sync::Arc;

use marquee_catalog::parse_catalog;
use marquee_core::{
    CoreEvent, LaunchEngine, assign_cells, count_label, visibility,
};
use marquee_host::{ExitStatus, MockHost, ProcessHost};
use marquee_util::EntryId;

const CATALOG: &str = "\"desktop_file\",\"exec\",\"icon\"\n\
                       \"abc-game.desktop\",\"abc --fullscreen\",\"abc\"\n\
                       \"broken.desktop\",\"missing-icon-field\"\n\
                       \"other.desktop\",\"other\",\"other\"\n";

#[test]
fn malformed_rows_excluded_and_search_filters() {
    // 2 valid rows and 1 malformed row yield exactly 2 entries
    let catalog = parse_catalog(CATALOG, &[]);
    assert_eq!(catalog.len(), 2);

    let names: Vec<_> = catalog.iter().map(|e| e.display_name.as_str()).collect();
    assert_eq!(names, vec!["Abc Game", "Other"]);

    // Searching "ab" leaves only "Abc Game" visible
    let visible = visibility(&catalog, "ab");
    assert_eq!(visible, vec![true, false]);

    let visible_count = visible.iter().filter(|v| **v).count();
    assert_eq!(count_label(visible_count, catalog.len()), "Games: 1 / 2");

    // One tile attached, in the first cell
    let cells = assign_cells(visible_count, 5);
    assert_eq!(cells.len(), 1);
    assert_eq!((cells[0].row, cells[0].col), (0, 0));
}

#[tokio::test]
async fn failed_start_leaves_session_retryable() {
    let catalog = Arc::new(parse_catalog(CATALOG, &[]));
    let host = Arc::new(MockHost::new());
    let mut engine = LaunchEngine::new(catalog, host.clone() as Arc<dyn ProcessHost>);

    let id = EntryId::new("abc-game.desktop");

    host.set_fail_spawn(true);
    let event = engine.launch(&id).await.unwrap();
    let CoreEvent::StartFailed { entry_id, message } = event else {
        panic!("expected StartFailed, got {event:?}");
    };
    assert_eq!(entry_id, id);
    assert!(!message.is_empty());
    assert!(!engine.is_running(&id));

    // Not blocked as "already running": the retry starts normally
    host.set_fail_spawn(false);
    let event = engine.launch(&id).await.unwrap();
    assert!(matches!(event, CoreEvent::Started { .. }));
    assert!(engine.is_running(&id));
}

#[tokio::test]
async fn full_launch_exit_relaunch_cycle() {
    let catalog = Arc::new(parse_catalog(CATALOG, &[]));
    let host = Arc::new(MockHost::new());
    let mut rx = host.subscribe();
    let mut engine = LaunchEngine::new(catalog, host.clone() as Arc<dyn ProcessHost>);

    let id = EntryId::new("other.desktop");

    assert!(matches!(
        engine.launch(&id).await.unwrap(),
        CoreEvent::Started { .. }
    ));
    assert!(matches!(
        engine.launch(&id).await.unwrap(),
        CoreEvent::AlreadyRunning { .. }
    ));

    // The game closes; the exit notification comes through the event queue
    host.simulate_exit(&id, ExitStatus::success());
    let marquee_host::HostEvent::Exited { entry_id, status } = rx.recv().await.unwrap();
    let event = engine.handle_exit(&entry_id, status);
    assert!(matches!(event, CoreEvent::Exited { .. }));

    // Relaunch is a fresh process
    assert!(matches!(
        engine.launch(&id).await.unwrap(),
        CoreEvent::Started { .. }
    ));
    assert_eq!(host.running_entries().len(), 1);
}
