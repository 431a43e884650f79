use crate::analyzers::types::CompanyFrequency;

/// Highest frequency among `entries`. Returns 0.0 for empty input.
pub fn max_frequency(entries: &[CompanyFrequency]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    entries
        .iter()
        .map(|c| c.frequency)
        .fold(f64::NEG_INFINITY, f64::max)
}
