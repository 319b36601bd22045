use ordered_collections::avl_tree::AvlMap;
use ordered_collections::{BinaryTreeNode, Error};
use rand::{Rng, SeedableRng, XorShiftRng};

fn collect_in_order<N>(node: Option<&N>, keys: &mut Vec<u32>)
where
    N: BinaryTreeNode<Key = u32>,
{
    if let Some(node) = node {
        collect_in_order(node.left_child(), keys);
        keys.push(*node.key());
        collect_in_order(node.right_child(), keys);
    }
}

#[test]
fn int_test_avl_map() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = AvlMap::new();
    let mut expected = Vec::new();
    for _ in 0..10_000 {
        let key = rng.gen::<u32>();
        let val = rng.gen::<u32>();

        if !map.contains_key(&key) {
            map.insert(key, val).unwrap();
            expected.push((key, val));
        }
    }

    expected.sort();

    assert_eq!(map.len(), expected.len());
    assert_eq!(map.min(), Some(&expected[0].0));
    assert_eq!(map.max(), Some(&expected[expected.len() - 1].0));

    assert_eq!(
        map.keys().collect::<Vec<&u32>>(),
        expected.iter().map(|pair| &pair.0).collect::<Vec<&u32>>(),
    );

    for entry in &expected {
        assert!(map.contains_key(&entry.0));
        assert_eq!(map.get(&entry.0), Ok(&entry.1));
        assert_eq!(map.ceil(&entry.0), Some(&entry.0));
        assert_eq!(map.floor(&entry.0), Some(&entry.0));
    }

    for entry in &mut expected {
        let val = rng.gen::<u32>();
        assert_eq!(map.put(&entry.0, val), Ok(entry.1));
        *entry = (entry.0, val);
        assert_eq!(map.get(&entry.0), Ok(&val));
    }

    let mut expected_len = expected.len();
    for entry in expected {
        assert_eq!(map.remove(&entry.0), Ok((entry.0, entry.1)));
        expected_len -= 1;
        assert_eq!(map.len(), expected_len);
    }
    assert!(map.is_empty());
}

#[test]
fn int_test_avl_map_round_trip() {
    let mut map = AvlMap::new();
    map.insert(1, 10).unwrap();
    assert_eq!(map.get(&1), Ok(&10));
    assert_eq!(map.put(&1, 20), Ok(10));
    assert_eq!(map.get(&1), Ok(&20));
    assert_eq!(map.remove(&1), Ok((1, 20)));
    assert!(!map.contains_key(&1));
}

#[test]
fn int_test_avl_map_insert_remove_restores_len() {
    let mut map = AvlMap::new();
    for key in &[5, 3, 8] {
        map.insert(*key, *key).unwrap();
    }
    let len_before = map.len();
    map.insert(4, 4).unwrap();
    assert_eq!(map.remove(&4), Ok((4, 4)));
    assert_eq!(map.len(), len_before);
}

#[test]
fn int_test_avl_map_root_view() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = AvlMap::new();
    assert!(map.root().is_none());

    for _ in 0..1_000 {
        let key = rng.gen::<u32>();
        let _ = map.insert(key, key);
    }

    let mut walked = Vec::new();
    collect_in_order(map.root(), &mut walked);
    assert_eq!(
        walked,
        map.keys().cloned().collect::<Vec<u32>>(),
    );
}

#[test]
fn int_test_avl_map_errors() {
    let mut map = AvlMap::new();
    map.insert(1, 1).unwrap();
    assert_eq!(map.insert(1, 2), Err(Error::DuplicateKey));
    assert_eq!(map.get(&2), Err(Error::KeyNotFound));
    assert_eq!(map.put(&2, 2), Err(Error::KeyNotFound));
    assert_eq!(map.remove(&2), Err(Error::KeyNotFound));
}
