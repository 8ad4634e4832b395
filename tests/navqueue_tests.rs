use navquill::config::Config;
use navquill::error::NavError;
use navquill::history::{ButtonState, NavQueue, Step, MAX_NAVQUEUE_LENGTH};
use navquill::workspace::{CursorNavigator, DocHandle, DocumentRegistry, MemoryWorkspace};

const TEXT: &str = "fn alpha() {}\nfn beta() {}\nfn gamma() {}\nfn delta() {}\n";

fn setup() -> (MemoryWorkspace, NavQueue) {
    (MemoryWorkspace::new(), NavQueue::new(ButtonState::default()))
}

/// Moves the editor to `offset` and records it, like a user jumping there.
fn visit(ws: &mut MemoryWorkspace, queue: &mut NavQueue, doc: DocHandle, offset: usize) {
    assert!(ws.goto_offset(doc, offset));
    queue.record_position(ws, doc, offset);
}

fn positions(queue: &NavQueue) -> Vec<(String, usize)> {
    queue
        .entries()
        .map(|a| (a.file().to_string(), a.offset()))
        .collect()
}

fn tag_count(ws: &MemoryWorkspace) -> usize {
    ws.documents().map(|(_, d)| d.indicators().len()).sum()
}

#[test]
fn test_queue_creation() {
    let (_, queue) = setup();
    assert!(queue.is_empty());
    assert_eq!(queue.cursor(), 0);
    assert!(!queue.can_go_back());
    assert!(!queue.can_go_forward());
}

#[test]
fn test_record_pushes_newest_first() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("a.rs", TEXT);
    queue.record_position(&mut ws, doc, 3);
    queue.record_position(&mut ws, doc, 17);

    assert_eq!(
        positions(&queue),
        vec![("a.rs".to_string(), 17), ("a.rs".to_string(), 3)]
    );
    assert_eq!(tag_count(&ws), 2);
}

#[test]
fn test_record_twice_is_deduplicated() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("a.rs", TEXT);
    queue.record_position(&mut ws, doc, 3);
    queue.record_position(&mut ws, doc, 9);
    queue.record_position(&mut ws, doc, 9);

    assert_eq!(queue.len(), 2);
    assert_eq!(queue.cursor(), 0);
    assert_eq!(tag_count(&ws), 2);
}

#[test]
fn test_dedupe_follows_shifted_anchor() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("a.rs", TEXT);
    queue.record_position(&mut ws, doc, 14);
    ws.insert(doc, 0, "use std;\n").unwrap();

    // The head entry now lives at 23, so recording 23 is a duplicate.
    queue.record_position(&mut ws, doc, 23);
    assert_eq!(queue.len(), 1);

    queue.record_position(&mut ws, doc, 14);
    assert_eq!(queue.len(), 2);
}

#[test]
fn test_untitled_document_is_ignored() {
    let (mut ws, mut queue) = setup();
    let scratch = ws.open_untitled("scratch text");
    queue.record_position(&mut ws, scratch, 4);

    assert!(queue.is_empty());
    assert_eq!(tag_count(&ws), 0);
}

#[test]
fn test_history_is_bounded() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("big.txt", &"x".repeat(300));
    for offset in 0..250 {
        queue.record_position(&mut ws, doc, offset);
    }

    assert_eq!(queue.len(), MAX_NAVQUEUE_LENGTH);
    assert_eq!(queue.get(0).map(|a| a.offset()), Some(249));
    assert_eq!(queue.get(99).map(|a| a.offset()), Some(150));
    // Evicted entries released their tags.
    assert_eq!(tag_count(&ws), MAX_NAVQUEUE_LENGTH);
}

#[test]
fn test_configured_bound() {
    let mut ws = MemoryWorkspace::new();
    let config = Config {
        max_history: 3,
        ..Config::default()
    };
    let mut queue = NavQueue::init(&config, ButtonState::default());
    let doc = ws.open("a.rs", TEXT);
    for offset in [1, 2, 3, 4, 5] {
        queue.record_position(&mut ws, doc, offset);
    }

    let offsets: Vec<usize> = queue.entries().map(|a| a.offset()).collect();
    assert_eq!(offsets, vec![5, 4, 3]);
}

#[test]
fn test_record_while_back_truncates_forward_history() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("a.rs", TEXT);
    for offset in [0, 10, 20, 30, 40] {
        visit(&mut ws, &mut queue, doc, offset);
    }
    assert_eq!(queue.go_back(&mut ws), Step::Moved);
    assert_eq!(queue.go_back(&mut ws), Step::Moved);
    assert_eq!(queue.cursor(), 2);

    let before = queue.len();
    queue.record_position(&mut ws, doc, 5);

    // Entries 0..2 are gone, the new position sits on top of the rest.
    assert_eq!(queue.cursor(), 0);
    assert_eq!(queue.len(), before - 2 + 1);
    let offsets: Vec<usize> = queue.entries().map(|a| a.offset()).collect();
    assert_eq!(offsets, vec![5, 20, 10, 0]);
    assert_eq!(tag_count(&ws), 4);
}

#[test]
fn test_navigation_scenario_across_documents() {
    let (mut ws, mut queue) = setup();
    let doc1 = ws.open("doc1.rs", TEXT);
    let doc2 = ws.open("doc2.rs", TEXT);

    queue.record_position(&mut ws, doc1, 10);
    queue.record_position(&mut ws, doc2, 5);
    queue.record_position(&mut ws, doc1, 20);
    assert!(ws.goto_offset(doc1, 20));

    assert_eq!(queue.go_back(&mut ws), Step::Moved);
    assert_eq!(ws.current_document(), Some(doc2));
    assert_eq!(ws.current_offset(doc2), 5);
    assert_eq!(queue.cursor(), 1);

    assert_eq!(queue.go_back(&mut ws), Step::Moved);
    assert_eq!(ws.current_document(), Some(doc1));
    assert_eq!(ws.current_offset(doc1), 10);
    assert_eq!(queue.cursor(), 2);

    assert_eq!(queue.go_forward(&mut ws), Step::Moved);
    assert_eq!(ws.current_document(), Some(doc2));
    assert_eq!(ws.current_offset(doc2), 5);
    assert_eq!(queue.cursor(), 1);

    assert_eq!(queue.len(), 3);
}

#[test]
fn test_back_forward_symmetry() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("a.rs", TEXT);
    visit(&mut ws, &mut queue, doc, 30);
    visit(&mut ws, &mut queue, doc, 20);
    visit(&mut ws, &mut queue, doc, 10);
    let before = positions(&queue);

    assert_eq!(queue.go_back(&mut ws), Step::Moved);
    assert_eq!(queue.go_back(&mut ws), Step::Moved);
    assert_eq!(queue.go_forward(&mut ws), Step::Moved);
    assert_eq!(queue.go_forward(&mut ws), Step::Moved);

    assert_eq!(queue.cursor(), 0);
    assert_eq!(positions(&queue), before);
    assert_eq!(ws.current_offset(doc), 10);
}

#[test]
fn test_go_back_records_unsaved_location() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("a.rs", TEXT);
    visit(&mut ws, &mut queue, doc, 2);
    assert!(ws.goto_offset(doc, 40));

    assert_eq!(queue.go_back(&mut ws), Step::Moved);
    assert_eq!(ws.current_offset(doc), 2);
    assert_eq!(queue.len(), 2);

    assert_eq!(queue.go_forward(&mut ws), Step::Moved);
    assert_eq!(ws.current_offset(doc), 40);
}

#[test]
fn test_go_back_at_oldest_is_blocked() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("a.rs", TEXT);
    visit(&mut ws, &mut queue, doc, 2);
    visit(&mut ws, &mut queue, doc, 8);

    assert_eq!(queue.go_back(&mut ws), Step::Moved);
    assert_eq!(queue.go_back(&mut ws), Step::Blocked);
    assert_eq!(queue.cursor(), 1);
}

#[test]
fn test_go_forward_at_head_is_blocked() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("a.rs", TEXT);
    visit(&mut ws, &mut queue, doc, 2);
    visit(&mut ws, &mut queue, doc, 8);

    assert_eq!(queue.go_forward(&mut ws), Step::Blocked);
    assert_eq!(queue.cursor(), 0);
}

#[test]
fn test_go_back_on_empty_queue() {
    let (mut ws, mut queue) = setup();
    assert_eq!(queue.go_back(&mut ws), Step::Blocked);
    assert_eq!(queue.go_forward(&mut ws), Step::Blocked);
}

#[test]
fn test_go_back_follows_edits() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("a.rs", TEXT);
    visit(&mut ws, &mut queue, doc, 28);
    visit(&mut ws, &mut queue, doc, 42);

    ws.insert(doc, 0, "// hi\n").unwrap();
    ws.delete(doc, 0, 3).unwrap();

    assert_eq!(queue.go_back(&mut ws), Step::Moved);
    assert_eq!(ws.current_offset(doc), 31);
    assert_eq!(queue.get(1).map(|a| a.offset()), Some(31));
}

#[test]
fn test_go_back_purges_deleted_anchor() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("a.rs", TEXT);
    visit(&mut ws, &mut queue, doc, 5);
    visit(&mut ws, &mut queue, doc, 20);
    visit(&mut ws, &mut queue, doc, 40);

    // Remove the text under the anchor at 20.
    ws.delete(doc, 15, 25).unwrap();
    assert!(ws.goto_offset(doc, 30));

    assert_eq!(queue.go_back(&mut ws), Step::Purged);
    assert_eq!(queue.cursor(), 0);
    assert_eq!(queue.len(), 2);

    assert_eq!(queue.go_back(&mut ws), Step::Moved);
    assert_eq!(ws.current_offset(doc), 5);
}

#[test]
fn test_go_back_purges_closed_document() {
    let (mut ws, mut queue) = setup();
    let a = ws.open("a.rs", TEXT);
    let b = ws.open("b.rs", TEXT);
    visit(&mut ws, &mut queue, a, 4);
    visit(&mut ws, &mut queue, b, 6);
    ws.close(a);

    assert_eq!(queue.go_back(&mut ws), Step::Purged);
    assert_eq!(queue.len(), 1);
    assert_eq!(*queue.buttons(), ButtonState::default());
}

#[test]
fn test_reopened_document_is_not_navigable() {
    let (mut ws, mut queue) = setup();
    let a = ws.open("a.rs", TEXT);
    let b = ws.open("b.rs", TEXT);
    visit(&mut ws, &mut queue, a, 4);
    visit(&mut ws, &mut queue, b, 6);

    // Reopening yields fresh text without the marker.
    ws.close(a);
    ws.open("a.rs", TEXT);
    ws.set_current(b).unwrap();

    assert_eq!(queue.go_back(&mut ws), Step::Purged);
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_go_back_with_nothing_open() {
    let (mut ws, mut queue) = setup();
    let a = ws.open("a.rs", TEXT);
    visit(&mut ws, &mut queue, a, 4);
    visit(&mut ws, &mut queue, a, 9);
    ws.close(a);
    assert_eq!(ws.current_document(), None);

    assert_eq!(queue.go_back(&mut ws), Step::Purged);
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_remove_all_for_file() {
    let (mut ws, mut queue) = setup();
    let f1 = ws.open("f1.rs", TEXT);
    let f2 = ws.open("f2.rs", TEXT);
    queue.record_position(&mut ws, f1, 1);
    queue.record_position(&mut ws, f2, 2);
    queue.record_position(&mut ws, f1, 3);

    queue.remove_all_for_file(&mut ws, Some("f1.rs"));

    assert_eq!(positions(&queue), vec![("f2.rs".to_string(), 2)]);
    assert_eq!(queue.cursor(), 0);
    assert!(ws.document(f1).unwrap().indicators().is_empty());
}

#[test]
fn test_remove_all_for_file_resets_cursor_out_of_range() {
    let (mut ws, mut queue) = setup();
    let f1 = ws.open("f1.rs", TEXT);
    let f2 = ws.open("f2.rs", TEXT);
    visit(&mut ws, &mut queue, f2, 1);
    visit(&mut ws, &mut queue, f1, 2);
    visit(&mut ws, &mut queue, f1, 3);
    visit(&mut ws, &mut queue, f1, 4);
    queue.go_back(&mut ws);
    queue.go_back(&mut ws);
    assert_eq!(queue.cursor(), 2);

    queue.remove_all_for_file(&mut ws, Some("f1.rs"));
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.cursor(), 0);
}

#[test]
fn test_remove_all_for_file_keeps_valid_cursor() {
    let (mut ws, mut queue) = setup();
    let f1 = ws.open("f1.rs", TEXT);
    let f2 = ws.open("f2.rs", TEXT);
    visit(&mut ws, &mut queue, f2, 1);
    visit(&mut ws, &mut queue, f2, 2);
    visit(&mut ws, &mut queue, f2, 3);
    visit(&mut ws, &mut queue, f1, 4);
    queue.go_back(&mut ws);
    assert_eq!(queue.cursor(), 1);

    queue.remove_all_for_file(&mut ws, Some("f1.rs"));
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.cursor(), 1);
}

#[test]
fn test_remove_without_file_name_is_noop() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("a.rs", TEXT);
    queue.record_position(&mut ws, doc, 1);
    queue.remove_all_for_file(&mut ws, None);
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_jump_with_record() {
    let (mut ws, mut queue) = setup();
    let a = ws.open("a.rs", TEXT);
    let b = ws.open("b.rs", TEXT);
    ws.set_cursor(a, 7).unwrap();

    assert!(queue.jump_with_record(&mut ws, Some(a), b, 3));
    assert_eq!(ws.current_document(), Some(b));
    assert_eq!(ws.current_offset(b), 27);
    assert_eq!(
        positions(&queue),
        vec![("b.rs".to_string(), 27), ("a.rs".to_string(), 7)]
    );

    assert_eq!(queue.go_back(&mut ws), Step::Moved);
    assert_eq!(ws.current_document(), Some(a));
    assert_eq!(ws.current_offset(a), 7);
}

#[test]
fn test_jump_with_record_without_old_document() {
    let (mut ws, mut queue) = setup();
    let b = ws.open("b.rs", TEXT);

    assert!(queue.jump_with_record(&mut ws, None, b, 1));
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_jump_with_record_rejects_bad_arguments() {
    let (mut ws, mut queue) = setup();
    let a = ws.open("a.rs", TEXT);
    let b = ws.open("b.rs", TEXT);
    ws.close(a);

    assert_eq!(
        queue.try_jump_with_record(&mut ws, None, b, 0),
        Err(NavError::InvalidLine(0))
    );
    assert_eq!(
        queue.try_jump_with_record(&mut ws, Some(a), b, 1),
        Err(NavError::InvalidDocument(a))
    );
    assert_eq!(
        queue.try_jump_with_record(&mut ws, None, a, 1),
        Err(NavError::InvalidDocument(a))
    );
    assert!(!queue.jump_with_record(&mut ws, None, b, 0));
    assert!(queue.is_empty());
}

#[test]
fn test_buttons_follow_cursor() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("a.rs", TEXT);
    visit(&mut ws, &mut queue, doc, 1);
    assert_eq!(*queue.buttons(), ButtonState::default());

    visit(&mut ws, &mut queue, doc, 2);
    visit(&mut ws, &mut queue, doc, 3);
    assert_eq!(
        *queue.buttons(),
        ButtonState {
            back: true,
            forward: false
        }
    );

    queue.go_back(&mut ws);
    assert_eq!(
        *queue.buttons(),
        ButtonState {
            back: true,
            forward: true
        }
    );

    queue.go_back(&mut ws);
    assert_eq!(
        *queue.buttons(),
        ButtonState {
            back: false,
            forward: true
        }
    );
    assert_eq!(queue.can_go_back(), queue.buttons().back);
    assert_eq!(queue.can_go_forward(), queue.buttons().forward);
}

#[test]
fn test_teardown_releases_all_tags() {
    let (mut ws, mut queue) = setup();
    let a = ws.open("a.rs", TEXT);
    let b = ws.open("b.rs", TEXT);
    visit(&mut ws, &mut queue, a, 1);
    visit(&mut ws, &mut queue, b, 2);
    visit(&mut ws, &mut queue, a, 3);
    assert_eq!(tag_count(&ws), 3);

    let buttons = queue.teardown(&mut ws);
    assert_eq!(tag_count(&ws), 0);
    assert!(buttons.back);
}

#[test]
fn test_marker_ids_are_not_reused() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("a.rs", TEXT);
    visit(&mut ws, &mut queue, doc, 1);
    let first = queue.get(0).map(|a| a.marker());
    queue.remove_all_for_file(&mut ws, Some("a.rs"));
    visit(&mut ws, &mut queue, doc, 1);
    let second = queue.get(0).map(|a| a.marker());

    assert_ne!(first, second);
    assert!(second > first);
}

#[test]
fn test_rerecording_a_tagged_unit_takes_over_its_tag() {
    let (mut ws, mut queue) = setup();
    let doc = ws.open("a.rs", TEXT);
    visit(&mut ws, &mut queue, doc, 5);
    visit(&mut ws, &mut queue, doc, 7);
    visit(&mut ws, &mut queue, doc, 5);
    assert_eq!(queue.len(), 3);
    // One tag per unit: the newest entry at 5 owns it.
    assert_eq!(tag_count(&ws), 2);

    assert_eq!(queue.go_back(&mut ws), Step::Moved);
    assert_eq!(ws.current_offset(doc), 7);

    // The oldest entry lost its tag and is dropped instead of visited.
    assert_eq!(queue.go_back(&mut ws), Step::Purged);
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.cursor(), 1);
    assert_eq!(
        positions(&queue),
        vec![("a.rs".to_string(), 5), ("a.rs".to_string(), 7)]
    );

    // Purging the stale entry leaves the newer owner's tag in place.
    assert_eq!(tag_count(&ws), 2);
    assert_eq!(queue.go_forward(&mut ws), Step::Moved);
    assert_eq!(ws.current_offset(doc), 5);
}
