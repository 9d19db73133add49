use dnd_tree::{
    Leaf, MutatorConfig, NodeId, Parent, ReorderPolicy, Tree, TreeError, TreeMutator,
};

fn shape(tree: &Tree) -> Vec<(String, Vec<String>)> {
    tree.parents()
        .map(|parent| {
            (
                parent.id.to_string(),
                parent.child_ids().map(|id| id.to_string()).collect(),
            )
        })
        .collect()
}

fn s(parent: &str, children: &[&str]) -> (String, Vec<String>) {
    (
        parent.to_string(),
        children.iter().map(|child| child.to_string()).collect(),
    )
}

fn two_parents() -> Tree {
    Tree::from_parents([
        Parent::new("P1", "P1")
            .child(Leaf::new("C1", "Child 1"))
            .child(Leaf::new("C2", "Child 2")),
        Parent::new("P2", "P2")
            .child(Leaf::new("C3", "Child 3"))
            .child(Leaf::new("C4", "Child 4")),
    ])
    .unwrap()
}

fn id(id: &str) -> NodeId {
    NodeId::from(id)
}

#[test]
fn move_child_across_parents_appends_at_index() {
    let mut mutator = TreeMutator::new(two_parents());
    mutator.move_child(&id("P1"), &id("P2"), 0, 2).unwrap();
    assert_eq!(
        shape(mutator.tree()),
        [s("P1", &["C2"]), s("P2", &["C3", "C4", "C1"])]
    );
}

#[test]
fn move_child_across_parents_adjusts_counts_by_one() {
    let base = two_parents();
    for from_index in 0..2 {
        for to_index in 0..=3 {
            let mut tree = base.clone();
            tree.move_child(&id("P1"), &id("P2"), from_index, to_index, ReorderPolicy::Shift)
                .unwrap();
            let moved = &base.parent(&id("P1")).unwrap().children[from_index].id;
            let source = tree.parent(&id("P1")).unwrap();
            let target = tree.parent(&id("P2")).unwrap();
            assert_eq!(source.children.len(), 1);
            assert_eq!(target.children.len(), 3);
            assert!(target.child_ids().any(|child| child == moved));
            assert!(!source.child_ids().any(|child| child == moved));
        }
    }
}

#[test]
fn move_child_within_parent_keeps_total_count() {
    for policy in [ReorderPolicy::Shift, ReorderPolicy::Swap] {
        for from_index in 0..2 {
            for to_index in 0..4 {
                let mut tree = two_parents();
                tree.move_child(&id("P2"), &id("P2"), from_index, to_index, policy)
                    .unwrap();
                assert_eq!(tree.leaf_count(), 4);
                assert_eq!(tree.parent(&id("P2")).unwrap().children.len(), 2);
            }
        }
    }
}

#[test]
fn move_child_index_past_end_appends() {
    let mut mutator = TreeMutator::new(two_parents());
    mutator.move_child(&id("P2"), &id("P1"), 1, 40).unwrap();
    assert_eq!(
        shape(mutator.tree()),
        [s("P1", &["C1", "C2", "C4"]), s("P2", &["C3"])]
    );
}

#[test]
fn move_child_swap_within_parent() {
    let mut mutator = TreeMutator::new(two_parents())
        .with_config(MutatorConfig::default().reorder(ReorderPolicy::Swap));
    mutator.move_child(&id("P1"), &id("P1"), 1, 0).unwrap();
    assert_eq!(
        shape(mutator.tree()),
        [s("P1", &["C2", "C1"]), s("P2", &["C3", "C4"])]
    );
}

#[test]
fn move_child_with_invalid_from_index_is_refused() {
    let mut mutator = TreeMutator::new(two_parents());
    let before = mutator.snapshot();
    let err = mutator.move_child(&id("P1"), &id("P2"), 2, 0).unwrap_err();
    assert_eq!(err, TreeError::InvalidIndex { index: 2, len: 2 });
    assert_eq!(*mutator.snapshot(), *before);
}

#[test]
fn move_child_with_unknown_parent_is_refused() {
    let mut mutator = TreeMutator::new(two_parents());
    let before = mutator.snapshot();

    let err = mutator.move_child(&id("P9"), &id("P2"), 0, 0).unwrap_err();
    assert_eq!(err, TreeError::ParentNotFound(id("P9")));

    let err = mutator.move_child(&id("P1"), &id("P9"), 0, 0).unwrap_err();
    assert_eq!(err, TreeError::ParentNotFound(id("P9")));

    assert_eq!(*mutator.snapshot(), *before);
}

#[test]
fn move_child_into_empty_parent() {
    let mut tree = two_parents();
    let mut parents: Vec<Parent> = tree.parents().cloned().collect();
    parents.push(Parent::new("P3", "P3"));
    tree = Tree::from_parents(parents).unwrap();

    let mut mutator = TreeMutator::new(tree);
    mutator.move_child(&id("P1"), &id("P3"), 1, 5).unwrap();
    assert_eq!(
        shape(mutator.tree()),
        [s("P1", &["C1"]), s("P2", &["C3", "C4"]), s("P3", &["C2"])]
    );
}
