use super::*;
use proptest::prelude::*;

const A: NodeId = NodeId(1);
const B: NodeId = NodeId(2);

#[test]
fn releases_after_both_nodes_signal_in_either_order() {
    let barrier = CompletionBarrier::new([A, B]);
    assert!(!barrier.signal(B));
    assert!(barrier.signal(A));
    assert!(barrier.is_released());

    let barrier = CompletionBarrier::new([A, B]);
    assert!(!barrier.signal(A));
    assert!(barrier.signal(B));
}

#[test]
fn duplicate_signal_from_one_node_does_not_release() {
    let barrier = CompletionBarrier::new([A, B]);
    assert!(!barrier.signal(A));
    assert!(!barrier.signal(A));
    assert!(!barrier.is_released());
    assert_eq!(barrier.remaining(), 1);
    assert_eq!(barrier.signals_observed(), 2);
}

#[test]
fn extra_signals_after_release_are_ignored() {
    let barrier = CompletionBarrier::new([A, B]);
    barrier.signal(A);
    assert!(barrier.signal(B));
    assert!(!barrier.signal(A));
    assert!(!barrier.signal(B));
    assert!(!barrier.force());
}

#[test]
fn foreign_nodes_are_ignored() {
    let barrier = CompletionBarrier::new([A, B]);
    assert!(!barrier.signal(NodeId(99)));
    assert_eq!(barrier.remaining(), 2);
}

#[test]
fn force_releases_once() {
    let barrier = CompletionBarrier::new([A, B]);
    barrier.signal(A);
    assert!(barrier.force());
    assert!(!barrier.force());
    assert!(!barrier.signal(B));
    assert_eq!(barrier.remaining(), 1);
}

#[test]
fn duplicate_nodes_collapse() {
    let barrier = CompletionBarrier::new([A, A]);
    assert_eq!(barrier.expected(), 1);
    assert!(barrier.signal(A));
}

proptest! {
    /// Whatever the interleaving of signals and forces, exactly one call releases.
    #[test]
    fn releases_exactly_once(ops in proptest::collection::vec(0u8..4, 0..32)) {
        let barrier = CompletionBarrier::new([A, B]);
        let mut releases = 0;
        let mut seen_a = false;
        let mut seen_b = false;
        for op in ops {
            let released = match op {
                0 => { seen_a = true; barrier.signal(A) }
                1 => { seen_b = true; barrier.signal(B) }
                2 => barrier.signal(NodeId(7)),
                _ => barrier.force(),
            };
            if released {
                releases += 1;
            }
        }
        prop_assert!(releases <= 1);
        if seen_a && seen_b {
            prop_assert_eq!(releases, 1);
        }
        prop_assert_eq!(barrier.is_released(), releases == 1);
    }
}
