//! Pairwise alignment of two series on their common timestamps.

use hydrots_series::Series;

/// Returns copies of `a` and `b` that keep only the timestamps present in
/// both. Metadata is carried over unchanged.
///
/// Synchronising an already synchronised pair returns an identical pair.
pub fn synchronize(a: &Series, b: &Series) -> (Series, Series) {
    let mut a_sync = a.copy();
    let mut b_sync = b.copy();
    a_sync.retain(|ts, _| b.contains(ts));
    b_sync.retain(|ts, _| a.contains(ts));
    (a_sync, b_sync)
}
