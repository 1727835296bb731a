use matchmaker_rs::{IntervalIndex, IntervalKey, Probe, setup_logger};
use tracing::info;

fn main() {
    setup_logger();

    let mut index: IntervalIndex<&str> = IntervalIndex::new();

    // Three searches with disjoint windows
    for (name, rating, tolerance) in [("alice", 1500, 30), ("bob", 1700, 30), ("carol", 1300, 60)] {
        let window = IntervalKey::around(rating, tolerance);
        match index.insert_or_find_overlap(window, name) {
            Probe::Inserted(_) => info!("{} waits with window {}", name, window),
            Probe::Overlap(entry) => info!("{} met {} at {}", name, entry.value, entry.key),
        }
    }

    info!("Index, level by level:");
    for (key, name) in index.breadth_first() {
        info!("  {} {}", key, name);
    }

    // A fourth search overlapping alice takes her window out
    let window = IntervalKey::around(1540, 30);
    match index.insert_or_find_overlap(window, "dave") {
        Probe::Inserted(_) => info!("dave waits with window {}", window),
        Probe::Overlap(entry) => info!("dave met {} at {}", entry.value, entry.key),
    }

    info!("{} windows left", index.len());
}
