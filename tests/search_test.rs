//! Tests for TreeBuilder lookups

use rstree::{ByValue, Label, TreeBuilder, TreeNode};

// x
// ├── y [py]
// └── z
fn prefixed_tree() -> TreeBuilder<String> {
    let mut builder = TreeBuilder::new();
    builder.add("x").add_prefixed("y", "py").add("z");
    builder
}

#[test]
fn given_prefix_when_go_to_then_returns_labelled_node() {
    let builder = prefixed_tree();

    let found = builder.go_to("py").unwrap();

    assert_eq!(*found.value(), "y");
}

#[test]
fn given_identity_when_go_to_then_returns_exact_node() {
    let builder = prefixed_tree();

    for node in builder.iter() {
        let identity = node.identity();
        let found = builder.go_to(identity.as_str()).unwrap();
        assert!(found.ptr_eq(&node));
    }
}

#[test]
fn given_value_and_later_prefix_when_go_to_then_prefix_wins() {
    // root
    // ├── a
    // │   └── target
    // └── other [target]
    let mut builder: TreeBuilder<String> = TreeBuilder::new();
    builder
        .add("root")
        .add_tree("a")
        .add("target")
        .up()
        .unwrap()
        .add_prefixed("other", "target");

    let found = builder.go_to("target").unwrap();

    assert_eq!(*found.value(), "other");
}

#[test]
fn given_repeated_values_when_go_to_then_first_in_preorder() {
    // root
    // ├── a
    // │   └── dup (1)
    // └── dup (2)
    let mut builder: TreeBuilder<String> = TreeBuilder::new();
    builder
        .add("root")
        .add_tree("a")
        .add_prefixed("dup", "first")
        .up()
        .unwrap()
        .add_prefixed("dup", "second");

    let found = builder.go_to("dup").unwrap();

    assert_eq!(found.prefix().as_deref(), Some("first"));
}

#[test]
fn given_missing_key_when_go_to_then_none() {
    let builder = prefixed_tree();

    assert!(builder.go_to("missing").is_none());
    assert!(builder.go_to(&"missing".to_string()).is_none());
}

#[test]
fn given_member_and_stranger_when_exists_then_only_member_found() {
    let builder = prefixed_tree();
    let member = builder.go_to("z").unwrap();
    let stranger = TreeNode::new("z".to_string());

    assert!(builder.exists(&member));
    assert!(!builder.exists(&stranger));
}

#[test]
fn given_numeric_payloads_when_searching_then_value_and_label_keys_work() {
    let mut builder: TreeBuilder<u32> = TreeBuilder::new();
    builder.add(1u32).add_prefixed(2u32, "two").add(3u32);

    assert_eq!(*builder.go_to(&ByValue(&3)).unwrap().value(), 3);
    assert_eq!(*builder.go_to(&Label("two")).unwrap().value(), 2);
    assert!(builder.go_to(&ByValue(&4)).is_none());
}

#[test]
fn given_empty_builder_when_searching_then_none() {
    let builder: TreeBuilder<String> = TreeBuilder::new();

    assert!(builder.go_to("anything").is_none());
}
