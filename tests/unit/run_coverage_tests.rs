//! End-to-end runs of the coordinator.

#[cfg(test)]
mod run_coverage_tests {
    use matchmaker_rs::{Coordinator, MatchmakerConfig, RunReport};
    use std::time::Duration;

    fn run(config: MatchmakerConfig) -> RunReport {
        let coordinator = Coordinator::new(config).expect("valid config");
        coordinator.run().expect("run succeeds")
    }

    #[test]
    fn test_default_sized_run_terminates_at_cap() {
        let report = run(MatchmakerConfig::default()
            .with_wait_interval(Duration::from_millis(2))
            .with_max_start_delay(Duration::from_millis(2)));

        assert_eq!(report.total_pairings, 1000);
        assert_eq!(report.pairing_cap, 1000);
        assert_eq!(report.active_searches, 0);
        assert_eq!(report.standings.len(), 50);
        assert_eq!(report.total_participations(), 2000);
    }

    #[test]
    fn test_custom_ladder_and_k_factor() {
        let report = run(MatchmakerConfig::default()
            .with_entity_count(8)
            .with_initial_rating(1200)
            .with_tolerance_ladder(vec![50, 100, 200, 400])
            .with_k_factor(32.0)
            .with_pairing_cap(100)
            .with_wait_interval(Duration::from_millis(1))
            .with_max_start_delay(Duration::ZERO));

        assert_eq!(report.total_pairings, 100);
        assert!(report.history.iter().all(|r| r.delta.abs() <= 32));
        assert_eq!(report.total_rating(), 8 * 1200);
    }

    #[test]
    fn test_config_from_json_drives_a_run() {
        let config = MatchmakerConfig::from_json(
            r#"{
                "entity_count": 6,
                "pairing_cap": 30,
                "wait_interval_ms": 1,
                "max_start_delay_ms": 0
            }"#,
        )
        .expect("valid config");

        let report = run(config);
        assert_eq!(report.total_pairings, 30);

        let json = report.to_json().expect("serializable");
        let parsed: RunReport = serde_json::from_str(&json).expect("round trip");
        assert_eq!(parsed.total_pairings, 30);
        assert_eq!(parsed.history.len(), 30);
    }

    #[test]
    fn test_independent_coordinators_do_not_share_state() {
        let config = MatchmakerConfig::default()
            .with_entity_count(4)
            .with_pairing_cap(10)
            .with_wait_interval(Duration::from_millis(1));

        let first = run(config.clone());
        let second = run(config);

        assert_eq!(first.total_pairings, 10);
        assert_eq!(second.total_pairings, 10);
        assert_ne!(first.run_id, second.run_id);
    }
}
