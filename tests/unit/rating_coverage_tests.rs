//! Rating model tests through the public API.

#[cfg(test)]
mod rating_coverage_tests {
    use matchmaker_rs::{Outcome, RatingModel};

    #[test]
    fn test_scenario_two_equal_entities() {
        let model = RatingModel::new(60.0);

        assert_eq!(RatingModel::expectation(1900, 1900), 0.5);

        let win = model.apply(Outcome::Win, 1900, 1900);
        assert_eq!((win.first, win.second), (1930, 1870));

        let loss = model.apply(Outcome::Loss, 1900, 1900);
        assert_eq!((loss.first, loss.second), (1870, 1930));

        assert_eq!(win.first + win.second, 3800);
        assert_eq!(loss.first + loss.second, 3800);
    }

    #[test]
    fn test_k_factor_scales_delta() {
        let small = RatingModel::new(16.0);
        let large = RatingModel::new(64.0);

        assert_eq!(small.delta(Outcome::Win, 1500, 1500), 8);
        assert_eq!(large.delta(Outcome::Win, 1500, 1500), 32);
        assert_eq!(large.k_factor(), 64.0);
    }

    #[test]
    fn test_floor_at_zero_for_weak_loser() {
        let model = RatingModel::new(60.0);
        let update = model.apply(Outcome::Loss, 0, 0);

        assert_eq!(update.first, 0);
        assert_eq!(update.second, 30);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Win.to_string(), "WIN");
        assert_eq!(Outcome::Draw.to_string(), "DRAW");
        assert_eq!(Outcome::Loss.to_string(), "LOSS");
    }
}
