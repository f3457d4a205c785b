use std::ops::Range;

/// Indices `i` with `lower <= timestamps[i] <= upper`.
///
/// `timestamps` must be sorted ascending (a single track span). The result is
/// a contiguous range, empty when no sample falls inside the bounds.
pub fn find_indices_in_bounds(timestamps: &[f64], lower: f64, upper: f64) -> Range<usize> {
    let start = timestamps.partition_point(|&t| t < lower);
    let end = timestamps.partition_point(|&t| t <= upper);
    start..end.max(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let t = [0.0, 1.0, 2.0, 3.0, 4.0];
        assert_eq!(find_indices_in_bounds(&t, 1.0, 3.0), 1..4);
        assert_eq!(find_indices_in_bounds(&t, 0.5, 3.5), 1..4);
        assert_eq!(find_indices_in_bounds(&t, -1.0, 10.0), 0..5);
    }

    #[test]
    fn empty_and_inverted_bounds() {
        let t = [0.0, 1.0, 2.0];
        assert!(find_indices_in_bounds(&t, 5.0, 6.0).is_empty());
        assert!(find_indices_in_bounds(&t, 1.5, 1.7).is_empty());
        assert!(find_indices_in_bounds(&t, 2.0, 1.0).is_empty());
        assert!(find_indices_in_bounds(&[], 0.0, 1.0).is_empty());
    }
}
