//! Walks whole trees with the keyboard reducer

use courier_tree::{Key, KeyResponse, StaticTree, TreeInteractionState};

/// a -> [a1 -> [a1x, a1y], a2], b -> [b1], c
fn outline() -> StaticTree<&'static str> {
    StaticTree::new()
        .with_root("a")
        .with_child("a", "a1")
        .with_child("a1", "a1x")
        .with_child("a1", "a1y")
        .with_child("a", "a2")
        .with_root("b")
        .with_child("b", "b1")
        .with_root("c")
}

fn walk(
    tree: &StaticTree<&'static str>,
    mut state: TreeInteractionState<&'static str>,
    key: Key,
) -> Vec<&'static str> {
    let mut visited = vec![*state.focused_id().unwrap()];

    loop {
        let (next, response) = state.handle_key(tree, key);
        assert_eq!(response, KeyResponse::Handled);

        let focused = *next.focused_id().unwrap();
        if focused == *visited.last().unwrap() {
            return visited;
        }

        visited.push(focused);
        state = next;
    }
}

#[test]
fn test_down_visits_visible_nodes_in_order() {
    let tree = outline();
    let state = TreeInteractionState::new()
        .with_expanded(["a", "a1"])
        .with_focus("a");

    assert_eq!(
        walk(&tree, state, Key::ArrowDown),
        vec!["a", "a1", "a1x", "a1y", "a2", "b", "c"]
    );
}

#[test]
fn test_up_is_the_reverse_of_down() {
    let tree = outline();
    let state = TreeInteractionState::new()
        .with_expanded(["a", "a1", "b"])
        .with_focus("c");

    assert_eq!(
        walk(&tree, state, Key::ArrowUp),
        vec!["c", "b1", "b", "a2", "a1y", "a1x", "a1", "a"]
    );
}

#[test]
fn test_end_lands_on_last_top_level_node_when_leaf() {
    let tree = outline();
    let state = TreeInteractionState::new()
        .with_expanded(["a", "a1", "b"])
        .with_focus("a1x");

    let (state, _) = state.handle_key(&tree, Key::End);
    assert_eq!(state.focused_id(), Some(&"c"));
    assert_eq!(state.selected_id(), Some(&"c"));
}

#[test]
fn test_expand_with_keyboard_then_descend() {
    let tree = outline();
    let state = TreeInteractionState::new().with_focus("b");

    let (state, _) = state.handle_key(&tree, Key::ArrowDown);
    assert_eq!(state.focused_id(), Some(&"c"));

    let (state, _) = state.handle_key(&tree, Key::ArrowUp);
    let (state, _) = state.handle_key(&tree, Key::ArrowRight);
    let (state, _) = state.handle_key(&tree, Key::ArrowDown);
    assert_eq!(state.focused_id(), Some(&"b1"));
}
