//! Whole editing sessions driven through the public API

use courier_builder::{BuilderError, BuilderOptions, BuilderSession, FetchError, PreviewArticle};
use courier_message::{ComponentKind, ComponentType, ConnectionDetails, Document, RootType, Severity};
use courier_tree::{Key, KeyResponse};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

fn legacy_session() -> BuilderSession {
    init_tracing();
    BuilderSession::new(Document::new(RootType::Legacy), BuilderOptions::default())
}

#[test]
fn test_save_blocked_until_problems_fixed() {
    let mut session = legacy_session();
    let root = session.document().root_id().clone();
    session.add_child(&root, ComponentType::Text, false).unwrap();

    match session.save() {
        Err(BuilderError::SaveBlocked { problems }) => {
            assert_eq!(problems.len(), 1);
            assert_eq!(problems[0].path, "messageComponent.children[0].content");

            // Each problem leads back to its component
            assert!(session.navigate_to_component(&problems[0].component_id));
        }
        other => panic!("expected blocked save, got {:?}", other),
    }

    session
        .update_selected(ComponentKind::Text {
            content: "hello".to_string(),
        })
        .unwrap();

    let details = session.save().unwrap();
    assert_eq!(details.content.as_deref(), Some("hello"));
    assert!(!session.is_dirty());
}

#[test]
fn test_reset_returns_to_last_save() {
    let mut session = legacy_session();
    let root = session.document().root_id().clone();
    session.add_child(&root, ComponentType::Text, false).unwrap();
    session
        .update_selected(ComponentKind::Text {
            content: "saved".to_string(),
        })
        .unwrap();
    session.save().unwrap();

    session.add_child(&root, ComponentType::LegacyActionRow, false).unwrap();
    assert!(session.is_dirty());

    session.reset_message();
    assert!(!session.is_dirty());
    assert_eq!(session.document().root.children().len(), 1);
    assert!(session
        .selected_id()
        .map_or(true, |id| session.document().contains(id)));
}

#[test]
fn test_keyboard_walks_document_outline() {
    let mut session = legacy_session();
    let root = session.document().root_id().clone();
    session.add_child(&root, ComponentType::Text, false).unwrap();
    session
        .add_child(&root, ComponentType::EmbedContainer, false)
        .unwrap();

    session.focus(&root);
    assert_eq!(session.handle_key(Key::ArrowDown), KeyResponse::Handled);
    let text = session.document().root.children()[0].id.clone();
    assert_eq!(session.tree_state().focused_id(), Some(&text));

    session.handle_key(Key::End);
    let container = &session.document().root.children()[1];
    let embed = container.children()[0].id.clone();
    assert_eq!(session.tree_state().focused_id(), Some(&embed));

    assert_eq!(session.handle_key(Key::Enter), KeyResponse::Activate(embed));
    assert_eq!(session.handle_key(Key::Other), KeyResponse::Ignored);

    session.handle_key(Key::Home);
    assert!(session.node_view(&root).is_tabbable);
}

#[test]
fn test_move_keeps_focus_on_moved_content() {
    let mut session = legacy_session();
    let root = session.document().root_id().clone();
    session.add_child(&root, ComponentType::LegacyActionRow, false).unwrap();
    let first = session.selected_id().cloned().unwrap();
    session.add_child(&root, ComponentType::LegacyActionRow, false).unwrap();
    let second = session.selected_id().cloned().unwrap();
    session
        .add_child(&second, ComponentType::LegacyButton, false)
        .unwrap();

    session.focus(&second);
    session.move_up(&second).unwrap();

    assert_eq!(session.tree_state().focused_id(), Some(&first));
    let moved = session.document().find(&first).unwrap();
    assert_eq!(moved.children().len(), 1);
}

#[test]
fn test_warnings_gate_save_only_when_configured() {
    let details: ConnectionDetails = serde_json::from_value(json!({
        "componentsV2": [{ "type": "TEXT_DISPLAY", "content": "{{summary}}" }]
    }))
    .unwrap();
    let resolved = [json!({ "flags": 1 << 15, "components": [{ "type": 10, "content": "" }] })];

    let mut lenient = BuilderSession::from_details(&details, BuilderOptions::default());
    lenient.receive_resolved_preview(&resolved);
    assert_eq!(lenient.problems().len(), 1);
    assert_eq!(lenient.problems()[0].severity, Severity::Warning);
    assert!(lenient.save().is_ok());

    let strict_options = BuilderOptions {
        warnings_block_save: true,
        ..BuilderOptions::default()
    };
    let mut strict = BuilderSession::from_details(&details, strict_options);
    strict.receive_resolved_preview(&resolved);
    assert!(matches!(strict.save(), Err(BuilderError::SaveBlocked { .. })));
}

#[test]
fn test_fetch_failure_leaves_document_alone() {
    let mut session = legacy_session();
    let root = session.document().root_id().clone();
    session.add_child(&root, ComponentType::Text, false).unwrap();
    let before = session.document().clone();

    session.begin_article_fetch(None);
    assert!(session.preview().is_loading());

    session.receive_articles(Err(FetchError::new("Feed is unreachable")));
    assert_eq!(session.document(), &before);
    assert!(session.preview().error().is_some());

    session.begin_article_fetch(None);
    session.receive_articles(Ok(vec![
        PreviewArticle::new("1").with_placeholder("title", "First")
    ]));
    assert_eq!(session.preview().current_article_id(), Some("1"));
    assert!(session.preview().error().is_none());
    assert_eq!(session.preview().placeholders("tit")[0].insert_text, "{{title}}");
}

#[test]
fn test_child_added_under_collapsed_parent_is_reachable() {
    let mut session = BuilderSession::new(Document::new(RootType::V2), BuilderOptions::default());
    let root = session.document().root_id().clone();
    session.add_child(&root, ComponentType::Section, false).unwrap();
    let section = session.selected_id().cloned().unwrap();
    session
        .add_child(&section, ComponentType::TextDisplay, false)
        .unwrap();

    session.focus(&section);
    session.handle_key(Key::ArrowLeft);
    assert!(!session.tree_state().is_expanded(&section));

    session
        .add_child(&section, ComponentType::TextDisplay, false)
        .unwrap();
    let created = session.selected_id().cloned().unwrap();
    assert!(session.tree_state().is_expanded(&section));
    assert_eq!(session.tree_state().focused_id(), Some(&created));

    session.handle_key(Key::Home);
    for _ in 0..3 {
        session.handle_key(Key::ArrowDown);
    }
    assert_eq!(session.tree_state().focused_id(), Some(&created));
}

#[test]
fn test_parent_expanded_even_without_auto_expand() {
    let options = BuilderOptions {
        expand_created_components: false,
        ..BuilderOptions::default()
    };
    let mut session = BuilderSession::new(Document::new(RootType::V2), options);
    let root = session.document().root_id().clone();
    session.add_child(&root, ComponentType::Container, false).unwrap();
    let container = session.selected_id().cloned().unwrap();
    assert!(!session.tree_state().is_expanded(&container));

    session
        .add_child(&container, ComponentType::TextDisplay, false)
        .unwrap();
    assert!(session.tree_state().is_expanded(&container));
}
