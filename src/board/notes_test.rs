use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::test_helpers::{FakeApi, Op, id, note};

#[test]
fn scatter_position_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let (x, y) = scatter_position(&mut rng);
        assert!((50..350).contains(&x), "x = {x}");
        assert!((100..400).contains(&y), "y = {y}");
    }
}

#[test]
fn filter_keeps_only_matching_board_in_order() {
    let mut orphan = note(9, 1, "orphan");
    orphan.board_id = None;
    let notes = vec![note(1, 1, "a"), note(2, 2, "b"), orphan, note(3, 1, "c"), note(4, 3, "d")];
    let kept: Vec<RecordId> = filter_board_notes(notes, &id(1))
        .into_iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(kept, vec![id(1), id(3)]);
}

#[test]
fn filter_compares_string_form_of_ids() {
    let mut textual = note(5, 0, "text id board");
    textual.board_id = Some(RecordId::new("12"));
    let kept = filter_board_notes(vec![textual], &id(12));
    assert_eq!(kept.len(), 1);
}

#[tokio::test]
async fn list_scopes_to_board() {
    let api = FakeApi::with(Vec::new(), vec![note(1, 1, "a"), note(2, 2, "b"), note(3, 1, "c")]);
    let store = NoteStore::new(api);
    let listed = store.list(&id(2)).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "b");
}

#[tokio::test]
async fn create_returns_server_note() {
    let api = FakeApi::new();
    let store = NoteStore::new(api.clone());
    let body = NewNote {
        content: "hi".into(),
        x_position: 60,
        y_position: 120,
        color: "#ffff88".into(),
        board_id: id(1),
    };
    let created = store.create(&body).await.unwrap();
    assert_eq!(created.content, "hi");
    assert_eq!(created.board_id, Some(id(1)));
    assert_eq!(api.state().created_notes, vec![body]);
}

#[tokio::test]
async fn update_position_sends_truncated_integers() {
    let api = FakeApi::with(Vec::new(), vec![note(1, 1, "a")]);
    let store = NoteStore::new(api.clone());
    store.update_position(&id(1), 120.9, -3.5).await.unwrap();
    let (target, patch) = api.state().patches[0].clone();
    assert_eq!(target, id(1));
    assert_eq!(patch, NotePatch::Position { x_position: 120, y_position: -3 });
}

#[tokio::test]
async fn update_content_sends_content_shape_only() {
    let api = FakeApi::with(Vec::new(), vec![note(1, 1, "a")]);
    let store = NoteStore::new(api.clone());
    let updated = store
        .update_content(&id(1), "b", "#7afcff")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.content, "b");
    assert_eq!(updated.x_position, 10);
    assert_eq!(
        api.state().patches[0].1,
        NotePatch::Content { content: "b".into(), color: "#7afcff".into() }
    );
}

#[tokio::test]
async fn delete_propagates_failure() {
    let api = FakeApi::with(Vec::new(), vec![note(1, 1, "a")]);
    let store = NoteStore::new(api.clone());
    api.fail(Op::DeleteNote);
    assert!(store.delete(&id(1)).await.is_err());
    assert_eq!(api.state().notes.len(), 1);

    api.heal(Op::DeleteNote);
    store.delete(&id(1)).await.unwrap();
    assert!(api.state().notes.is_empty());
    assert_eq!(api.state().deleted, vec![id(1)]);
}
