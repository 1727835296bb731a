#[cfg(test)]
mod tests {
    use crate::current_time_millis;
    use std::thread;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    #[test]
    fn test_current_time_millis_increases_after_sleep() {
        let before = current_time_millis();
        thread::sleep(Duration::from_millis(5));
        let after = current_time_millis();

        assert!(after > before, "Time should increase between calls");
    }

    #[test]
    fn test_current_time_millis_matches_system_clock() {
        let from_function = current_time_millis();
        let direct = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();

        // Generous bound for scheduler jitter between the two reads
        let difference = direct.abs_diff(from_function);
        assert!(
            difference <= 50,
            "Time difference should be small, but got {difference}ms"
        );
    }
}
