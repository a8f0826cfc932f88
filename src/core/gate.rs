//! Directory size gate

/// Decide whether thumbnails are skipped for an entry whose directory holds
/// `sibling_count` entries.
///
/// * `threshold < 0` never gates
/// * `threshold == 0` always gates
/// * `threshold > 0` gates when the directory holds more than `threshold` entries
pub fn should_gate(threshold: i64, sibling_count: usize) -> bool {
    match threshold {
        t if t < 0 => false,
        0 => true,
        t => sibling_count as u64 > t as u64,
    }
}
