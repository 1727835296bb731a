#[cfg(test)]
mod tests {
    use crate::interval::IntervalKey;

    #[test]
    fn test_new_orders_bounds() {
        let key = IntervalKey::new(40, 10);
        assert_eq!(key.lower(), 10);
        assert_eq!(key.upper(), 40);
    }

    #[test]
    fn test_around_saturates_at_zero() {
        let key = IntervalKey::around(20, 30);
        assert_eq!(key.lower(), 0);
        assert_eq!(key.upper(), 50);

        let key = IntervalKey::around(u32::MAX - 1, 30);
        assert_eq!(key.upper(), u32::MAX);
    }

    #[test]
    fn test_overlap_is_closed_on_both_ends() {
        let a = IntervalKey::new(10, 20);

        assert!(a.overlaps(&IntervalKey::new(20, 30)));
        assert!(a.overlaps(&IntervalKey::new(0, 10)));
        assert!(a.overlaps(&IntervalKey::new(12, 14)));
        assert!(a.overlaps(&IntervalKey::new(0, 100)));
        assert!(!a.overlaps(&IntervalKey::new(21, 30)));
        assert!(!a.overlaps(&IntervalKey::new(0, 9)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = IntervalKey::new(1870, 1930);
        let b = IntervalKey::new(1930, 1990);
        let c = IntervalKey::new(1931, 1990);

        assert_eq!(a.overlaps(&b), b.overlaps(&a));
        assert_eq!(a.overlaps(&c), c.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_contains_and_display() {
        let key = IntervalKey::new(5, 7);
        assert!(key.contains(5));
        assert!(key.contains(7));
        assert!(!key.contains(8));
        assert_eq!(format!("{key}"), "[5, 7]");
    }
}
