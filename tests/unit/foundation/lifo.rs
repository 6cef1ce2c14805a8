use super::*;

#[test]
fn push_pop_top() {
    let mut s = Stack::new();
    assert!(s.is_empty());
    assert_eq!(s.top(), None);

    s.push(1);
    s.push(2);
    assert_eq!(s.top(), Some(&2));
    assert_eq!(s.len(), 2);

    assert_eq!(s.pop(), Some(2));
    assert_eq!(s.top(), Some(&1));
    assert_eq!(s.pop(), Some(1));
    assert!(s.is_empty());
}

#[test]
fn pop_on_empty_is_none() {
    let mut s = Stack::<u8>::new();
    assert_eq!(s.pop(), None);
    assert!(s.is_empty());
}

#[test]
fn iter_runs_bottom_to_top() {
    let mut s = Stack::new();
    for v in ["a", "b", "c"] {
        s.push(v);
    }
    assert_eq!(s.iter().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
}
