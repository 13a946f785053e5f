/// Walkthroughs of the facade contract through the public API.
use rankset::{DisjointSet, IntDoubleHash, RegistryConfig, SetError};

fn ranks(ds: &mut DisjointSet<i32, &'static str, IntDoubleHash>, keys: &[i32]) -> Vec<usize> {
    keys.iter().map(|k| ds.rank(k).unwrap()).collect()
}

fn sorted(mut v: Vec<usize>) -> Vec<usize> {
    v.sort_unstable();
    v
}

#[test]
fn four_element_merge_scenario() {
    let mut ds: DisjointSet<i32, &'static str, IntDoubleHash> = DisjointSet::new();
    for (key, value) in [(1, "a"), (2, "b"), (3, "c"), (4, "d")] {
        ds.make_set(key, value).unwrap();
    }

    assert_eq!(ds.unite(&1, &2), Ok(true));
    assert_eq!(ds.set_size(&1), Ok(2));
    assert_eq!(ds.set_size(&2), Ok(2));
    assert_eq!(sorted(ranks(&mut ds, &[1, 2])), vec![1, 2]);

    assert_eq!(ds.unite(&3, &4), Ok(true));
    assert_eq!(sorted(ranks(&mut ds, &[3, 4])), vec![1, 2]);

    assert_eq!(ds.unite(&1, &3), Ok(true));
    assert_eq!(ds.set_size(&2), Ok(4));
    assert_eq!(sorted(ranks(&mut ds, &[1, 2, 3, 4])), vec![1, 2, 3, 4]);
    // equal sizes: the first argument's set absorbs, so {1, 2} is senior
    let senior = ranks(&mut ds, &[1, 2]);
    let junior = ranks(&mut ds, &[3, 4]);
    assert!(senior.iter().max() < junior.iter().min());

    let before = ranks(&mut ds, &[1, 2, 3, 4]);
    assert_eq!(ds.unite(&1, &3), Ok(false));
    assert_eq!(ranks(&mut ds, &[1, 2, 3, 4]), before);
    assert_eq!(ds.set_size(&4), Ok(4));

    assert_eq!(ds.find(&99), Err(SetError::NotFound));
}

#[test]
fn repeated_find_is_stable() {
    let mut ds: DisjointSet<i32, i32> = DisjointSet::new();
    for k in 0..8 {
        ds.make_set(k, k).unwrap();
    }
    ds.unite(&0, &1).unwrap();
    ds.unite(&2, &3).unwrap();
    ds.unite(&0, &2).unwrap();
    let first = *ds.find(&3).unwrap();
    for _ in 0..5 {
        assert_eq!(ds.find(&3), Ok(&first));
    }
    assert_eq!(ds.representative(&3), Ok(&first));
}

#[test]
fn fleet_style_acquisition() {
    // a fleet of one ship's crew acquires a bigger fleet; its crew stays senior
    let mut ds: DisjointSet<u32, String> = DisjointSet::new();
    for id in 100..106 {
        ds.make_set(id, format!("pirate-{id}")).unwrap();
    }
    for id in 102..106 {
        ds.unite(&102, &id).unwrap();
    }
    ds.unite(&100, &101).unwrap();
    assert_eq!(ds.absorb(&100, &105), Ok(true));

    let members: Vec<u32> = ds.members(&103).unwrap().into_iter().copied().collect();
    assert_eq!(members, vec![100, 101, 102, 103, 104, 105]);
    assert_eq!(ds.rank(&102), Ok(3));
    assert_eq!(ds.set_size(&100), Ok(6));
    // structurally the bigger tree stays on top
    assert_eq!(ds.find(&100).map(String::as_str), Ok("pirate-102"));
}

#[test]
fn string_keys_with_small_table() {
    let config = RegistryConfig {
        initial_capacity: 3,
        ..Default::default()
    };
    let mut ds = DisjointSet::with_config(config, rankset::FxDoubleHash).unwrap();
    let names = ["anne", "mary", "jack", "calico", "flint", "silver", "bonny"];
    for name in names {
        ds.make_set(name.to_string(), name.len()).unwrap();
    }
    for pair in names.windows(2) {
        ds.unite(&pair[0].to_string(), &pair[1].to_string()).unwrap();
    }
    assert_eq!(ds.set_size(&"bonny".to_string()), Ok(names.len()));
    assert_eq!(ds.set_count(), 1);
    for (i, name) in names.iter().enumerate() {
        assert_eq!(ds.rank(&name.to_string()), Ok(i + 1));
    }
}
