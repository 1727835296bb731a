use matchmaker_rs::{Coordinator, MatchmakerConfig, RunReport, setup_logger};
use std::time::Duration;
use tracing::info;

// Simulation parameters
const ENTITY_COUNT: usize = 50;
const PAIRING_CAP: u64 = 1000;
const WAIT_INTERVAL_MS: u64 = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    // An optional JSON config file replaces the built-in parameters
    let config = match std::env::args().nth(1) {
        Some(path) => MatchmakerConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => MatchmakerConfig::default()
            .with_entity_count(ENTITY_COUNT)
            .with_pairing_cap(PAIRING_CAP)
            .with_wait_interval(Duration::from_millis(WAIT_INTERVAL_MS)),
    };

    info!("Matchmaking Simulation");
    info!("======================");
    info!("Entities: {}", config.entity_count);
    info!("Initial rating: {}", config.initial_rating);
    info!("Pairing cap: {}", config.pairing_cap);
    info!("Tolerance ladder: {:?}", config.tolerance_ladder);

    let coordinator = Coordinator::new(config)?;
    let report = coordinator.run()?;

    print_report(&report);

    if std::env::var("REPORT_JSON").is_ok() {
        println!("{}", report.to_json()?);
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    info!("\nFinal standings:");
    info!("{:<8} {:>8} {:>10}", "Entity", "Rating", "Pairings");
    for standing in report.ranking() {
        info!(
            "{:<8} {:>8} {:>10}",
            standing.id.to_string(),
            standing.rating,
            standing.pairings
        );
    }

    info!("\nSummary:");
    info!("Total pairings: {}", report.total_pairings);
    info!("Peak rating: {}", report.peak_rating);
    info!("Elapsed: {} ms", report.elapsed_ms);
    if let Some(leader) = report.leader() {
        info!("Leader: {} at {}", leader.id, leader.rating);
    }
}
