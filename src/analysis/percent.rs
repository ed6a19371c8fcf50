/// Express `count` as a percentage of `total`.
///
/// A zero `total` yields `0.0` rather than a division by zero. No rounding
/// is applied; display precision is the renderer's concern.
///
/// # Examples
///
/// ```
/// use endemicity_analyzer::analysis::percent;
///
/// assert_eq!(percent(3, 10), 30.0);
/// assert_eq!(percent(0, 0), 0.0);
/// ```
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64) * 100.0
}
