use dnd_tree::{
    MutatorConfig, NodeId, Parent, ReorderPolicy, Tree, TreeError, TreeMutator,
};

fn ids(tree: &Tree) -> Vec<String> {
    tree.parents().map(|parent| parent.id.to_string()).collect()
}

fn three_parents() -> Tree {
    Tree::from_parents([
        Parent::new("P1", "P1"),
        Parent::new("P2", "P2"),
        Parent::new("P3", "P3"),
    ])
    .unwrap()
}

#[test]
fn move_parent_shifts_intervening_nodes() {
    let mut mutator = TreeMutator::new(three_parents());
    mutator.move_parent(0, 2).unwrap();
    assert_eq!(ids(mutator.tree()), ["P2", "P3", "P1"]);

    mutator.move_parent(2, 0).unwrap();
    assert_eq!(ids(mutator.tree()), ["P1", "P2", "P3"]);
}

#[test]
fn move_parent_swap_policy_exchanges_two_positions() {
    let mut mutator = TreeMutator::new(three_parents())
        .with_config(MutatorConfig::default().reorder(ReorderPolicy::Swap));
    mutator.move_parent(0, 2).unwrap();
    assert_eq!(ids(mutator.tree()), ["P3", "P2", "P1"]);
}

#[test]
fn move_parent_preserves_ids_for_every_index_pair() {
    let base = Tree::from_parents(
        (0..5u64).map(|ix| Parent::new(ix, format!("Parent {ix}"))),
    )
    .unwrap();
    let mut expected = ids(&base);
    expected.sort();

    for policy in [ReorderPolicy::Shift, ReorderPolicy::Swap] {
        for from in 0..base.len() {
            for to in 0..base.len() {
                let mut tree = base.clone();
                tree.move_parent(from, to, policy).unwrap();
                let mut got = ids(&tree);
                assert_eq!(got.len(), base.len());
                got.sort();
                assert_eq!(got, expected, "{policy:?} {from} -> {to}");
                assert_eq!(
                    tree.entries()[to.min(base.len() - 1)],
                    base.entries()[from],
                    "{policy:?} {from} -> {to}"
                );
            }
        }
    }
}

#[test]
fn move_parent_same_index_is_noop() {
    let mut mutator = TreeMutator::new(three_parents());
    let before = mutator.snapshot();
    mutator.move_parent(1, 1).unwrap();
    assert_eq!(*mutator.snapshot(), *before);
}

#[test]
fn move_parent_clamps_target_index() {
    let mut mutator = TreeMutator::new(three_parents());
    mutator.move_parent(0, 99).unwrap();
    assert_eq!(ids(mutator.tree()), ["P2", "P3", "P1"]);
}

#[test]
fn move_parent_rejects_out_of_range_source() {
    let mut mutator = TreeMutator::new(three_parents());
    let before = mutator.snapshot();
    let err = mutator.move_parent(3, 0).unwrap_err();
    assert_eq!(err, TreeError::InvalidIndex { index: 3, len: 3 });
    assert_eq!(*mutator.snapshot(), *before);
}

#[test]
fn move_parent_on_empty_tree_reports_invalid_index() {
    let mut mutator = TreeMutator::new(Tree::new());
    let err = mutator.move_parent(0, 0).unwrap_err();
    assert_eq!(err, TreeError::InvalidIndex { index: 0, len: 0 });
}

#[test]
fn snapshots_are_not_mutated_by_later_moves() {
    let mut mutator = TreeMutator::new(three_parents());
    let first = mutator.snapshot();
    mutator.move_parent(0, 2).unwrap();
    assert_eq!(ids(&first), ["P1", "P2", "P3"]);
    assert_eq!(
        mutator.tree().parent_index(&NodeId::from("P1")),
        Some(2)
    );
}
