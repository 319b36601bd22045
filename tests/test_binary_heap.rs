use ordered_collections::binary_heap::BinaryHeapPriorityQueue;
use ordered_collections::Error;
use rand::{Rng, SeedableRng, XorShiftRng};

#[test]
fn int_test_binary_heap_drains_sorted() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    let mut queue = BinaryHeapPriorityQueue::new();
    let mut expected = Vec::new();
    for _ in 0..10_000 {
        let element = rng.gen::<u32>();
        queue.insert(element);
        expected.push(element);
    }

    expected.sort_by(|lhs, rhs| rhs.cmp(lhs));

    let mut drained = Vec::new();
    while !queue.is_empty() {
        let best = *queue.best().unwrap();
        assert_eq!(queue.remove(), Ok(best));
        drained.push(best);
    }

    assert_eq!(drained, expected);
}

#[test]
fn int_test_binary_heap_min_queue() {
    let mut queue = BinaryHeapPriorityQueue::with_comparator(|lhs: &u32, rhs: &u32| rhs.cmp(lhs));
    for element in &[3, 1, 4, 1, 5, 9, 2, 6] {
        queue.insert(*element);
    }
    assert_eq!(queue.best(), Ok(&1));
    assert_eq!(queue.remove(), Ok(1));
    assert_eq!(queue.remove(), Ok(1));
    assert_eq!(queue.best(), Ok(&2));
}

#[test]
fn int_test_binary_heap_scenario() {
    let mut queue = BinaryHeapPriorityQueue::new();
    for element in &[3, 1, 4, 1, 5, 9, 2, 6] {
        queue.insert(*element);
    }
    assert_eq!(queue.best(), Ok(&9));
    assert_eq!(queue.remove(), Ok(9));
    assert_eq!(queue.best(), Ok(&6));
}

#[test]
fn int_test_binary_heap_errors() {
    let mut queue: BinaryHeapPriorityQueue<u32> = BinaryHeapPriorityQueue::new();
    assert_eq!(queue.best(), Err(Error::EmptyQueue));
    assert_eq!(queue.remove(), Err(Error::EmptyQueue));
}

#[test]
fn int_test_binary_heap_iter_reflects_structure() {
    let mut queue = BinaryHeapPriorityQueue::new();
    for element in &[2u32, 8, 5] {
        queue.insert(*element);
    }

    let first_pass = queue.iter().cloned().collect::<Vec<u32>>();
    let second_pass = queue.iter().cloned().collect::<Vec<u32>>();
    assert_eq!(first_pass, second_pass);
    assert_eq!(first_pass[0], 8);

    queue.remove().unwrap();
    assert_eq!(queue.iter().next(), Some(&5));
}