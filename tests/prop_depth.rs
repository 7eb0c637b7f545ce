//! Property tests for the depth invariant.
//!
//! For any tree of nested sections with arbitrary success/failure bodies,
//! depth after the outermost call returns (or fails) must equal depth
//! before it was entered. These run on isolated `TreeState` instances, so
//! no serialization against the process-wide state is needed.

use arbol_rust::{PrintOptions, Sink, TreeState};
use proptest::prelude::*;
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone)]
enum Node {
    Section(Vec<Node>),
    Print(String),
    Fail,
}

fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        3 => "[a-z \n]{0,12}".prop_map(Node::Print),
        1 => Just(Node::Fail),
    ];
    leaf.prop_recursive(6, 48, 5, |inner| {
        prop::collection::vec(inner, 0..5).prop_map(Node::Section)
    })
}

fn run(state: &TreeState, sink: &Sink, node: &Node) -> Result<(), ()> {
    match node {
        Node::Print(text) => {
            state.print_with(text, &PrintOptions::new().with_sink(sink.clone()));
            Ok(())
        }
        Node::Fail => Err(()),
        Node::Section(children) => state.section_to("node", sink.clone(), || {
            for child in children {
                run(state, sink, child)?;
            }
            Ok(())
        }),
    }
}

proptest! {
    #[test]
    fn depth_returns_to_baseline(root in node_strategy(), visible_levels in 0usize..6) {
        let state = TreeState::new();
        state.set_ascii_glyphs(true);
        if visible_levels > 0 {
            state.set_max_depth(visible_levels);
        }
        let (sink, _buf) = Sink::buffer();
        let _ = run(&state, &sink, &root);
        prop_assert_eq!(state.depth(), 0);
    }

    #[test]
    fn rendered_output_never_contains_marker_twice(roots in prop::collection::vec(node_strategy(), 1..4)) {
        let state = TreeState::new();
        state.set_ascii_glyphs(true);
        state.set_elapsed_time(false);
        state.set_max_depth(2);
        let (sink, buf) = Sink::buffer();
        // Each top-level section crosses the boundary at most once.
        for root in &roots {
            let _ = run(&state, &sink, root);
        }
        let output = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        for line in output.lines() {
            prop_assert!(line.matches("log tree truncated here").count() <= 1);
        }
        prop_assert_eq!(state.depth(), 0);
    }
}

#[test]
fn depth_invariant_holds_under_panic_at_every_level() {
    for panic_at in 0..55 {
        let state = TreeState::new();
        state.set_output_enabled(false);

        fn descend(state: &TreeState, remaining: usize) {
            if remaining == 0 {
                panic!("failure at the bottom");
            }
            state.section("level", || descend(state, remaining - 1));
        }

        let result = panic::catch_unwind(AssertUnwindSafe(|| descend(&state, panic_at)));
        assert!(result.is_err());
        assert_eq!(state.depth(), 0, "leak after panic at depth {panic_at}");
    }
}
