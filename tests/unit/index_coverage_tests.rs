//! Overlap index tests through the public API: removing an inner node that only
//! has a right subtree, collisions taking exactly one node, traversal and churn.

#[cfg(test)]
mod index_coverage_tests {
    use matchmaker_rs::{IntervalIndex, IntervalKey, NodeHandle, Probe};

    fn insert(index: &mut IntervalIndex<u32>, lower: u32, upper: u32, value: u32) -> NodeHandle {
        match index.insert_or_find_overlap(IntervalKey::new(lower, upper), value) {
            Probe::Inserted(handle) => handle,
            Probe::Overlap(entry) => panic!("unexpected overlap with {:?}", entry.key),
        }
    }

    fn assert_disjoint(index: &IntervalIndex<u32>) {
        let entries = index.entries();
        for pair in entries.windows(2) {
            assert!(pair[0].0.upper() < pair[1].0.lower(), "{:?}", entries);
        }
    }

    #[test]
    fn test_remove_non_root_with_only_right_subtree() {
        let mut index = IntervalIndex::new();
        insert(&mut index, 500, 510, 0);
        let left = insert(&mut index, 100, 110, 1);
        insert(&mut index, 900, 910, 2);
        insert(&mut index, 200, 210, 3);

        assert_eq!(index.remove(left), Some(1));
        assert_eq!(index.len(), 3);
        assert_disjoint(&index);

        // Every remaining window is still reachable by an overlap probe
        for (lower, value) in [(500, 0), (900, 2), (200, 3)] {
            match index.insert_or_find_overlap(IntervalKey::new(lower + 5, lower + 5), 99) {
                Probe::Overlap(entry) => assert_eq!(entry.value, value),
                Probe::Inserted(_) => panic!("window at {lower} was lost"),
            }
        }
        assert!(index.is_empty());
    }

    #[test]
    fn test_collision_takes_one_node_only() {
        let mut index = IntervalIndex::new();
        insert(&mut index, 0, 10, 0);
        insert(&mut index, 20, 30, 1);

        // Overlaps both; exactly one is taken and the other stays
        match index.insert_or_find_overlap(IntervalKey::new(5, 25), 2) {
            Probe::Overlap(entry) => assert!(entry.value == 0 || entry.value == 1),
            Probe::Inserted(_) => panic!("expected overlap"),
        }
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_breadth_first_visits_every_node() {
        let mut index = IntervalIndex::new();
        for i in 0..100u32 {
            insert(&mut index, i * 4, i * 4 + 2, i);
        }

        let mut values: Vec<u32> = index.breadth_first().into_iter().map(|(_, v)| *v).collect();
        values.sort_unstable();
        assert_eq!(values, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_churn_keeps_index_consistent() {
        let mut index = IntervalIndex::new();
        let mut handles = Vec::new();

        for round in 0..5u32 {
            for i in 0..50u32 {
                let lower = i * 10;
                match index.insert_or_find_overlap(IntervalKey::new(lower, lower + 4), round) {
                    Probe::Inserted(handle) => handles.push(handle),
                    Probe::Overlap(entry) => assert_eq!(entry.key.lower(), lower),
                }
            }
            for handle in handles.drain(..).step_by(2) {
                let _ = index.remove(handle);
            }
            assert_disjoint(&index);
        }
    }
}
