//! Ranking evaluated servers.
//!
//! Ranking is one generic scan applied under different criteria: given a
//! sequence of items and a three-way comparator, [`find_best_indices`]
//! collects every index tied for the best. The comparators in this
//! module cover the criteria the driver reports on; absent measurements
//! always rank worse than present ones, and two absent measurements tie.
//!
//! Comparator convention: `cmp(candidate, best)` returns
//! [`Ordering::Greater`] if the candidate ranks strictly better than the
//! running best, [`Ordering::Equal`] for a tie, and [`Ordering::Less`]
//! otherwise.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use core::cmp::Ordering;

use crate::eval::ServerResult;

//------------ find_best_indices ---------------------------------------------

/// Returns the indices of all items tied for the best under `cmp`.
///
/// A single left-to-right pass, seeded with index 0 as the initial best
/// regardless of its value: a strictly better candidate starts a fresh
/// tie set, a tied candidate joins the current one, a worse candidate is
/// skipped. The returned indices are in ascending order. An empty input
/// yields an empty vector.
pub fn find_best_indices<T, F>(items: &[T], cmp: F) -> Vec<usize>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut best = match items.first() {
        Some(item) => item,
        None => return Vec::new(),
    };

    let mut indices = vec![0];
    for (idx, item) in items.iter().enumerate().skip(1) {
        match cmp(item, best) {
            Ordering::Greater => {
                indices.clear();
                indices.push(idx);
                best = item;
            }
            Ordering::Equal => indices.push(idx),
            Ordering::Less => {}
        }
    }
    indices
}

//------------ Comparators ---------------------------------------------------

/// Compares two optional values, ranking absent worse than any present.
///
/// Two present values are handed to `cmp`; two absent values tie.
fn cmp_present<T, F>(
    candidate: &Option<T>,
    best: &Option<T>,
    cmp: F,
) -> Ordering
where
    F: Fn(&T, &T) -> Ordering,
{
    match (candidate, best) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(candidate), Some(best)) => cmp(candidate, best),
    }
}

/// Ranks the smaller of two optional numbers better, absent worst.
pub fn by_minimum(candidate: &Option<f64>, best: &Option<f64>) -> Ordering {
    cmp_present(candidate, best, |candidate, best| best.total_cmp(candidate))
}

/// Ranks the server with the smaller average latency better.
///
/// A server without a latency measurement ranks worse than any measured
/// one; two unmeasured servers tie.
pub fn fastest_avg(candidate: &ServerResult, best: &ServerResult) -> Ordering {
    by_minimum(&candidate.avg, &best.avg)
}

/// Ranks the server with the smaller latency deviation better.
///
/// Absent deviations rank worse than any measured one, as with
/// [`fastest_avg`].
pub fn most_stable(candidate: &ServerResult, best: &ServerResult) -> Ordering {
    by_minimum(&candidate.stddev, &best.stddev)
}

/// Ranks the server that resolved every site better.
///
/// Two servers that both resolved everything, or both missed something,
/// tie.
pub fn most_complete(
    candidate: &ServerResult,
    best: &ServerResult,
) -> Ordering {
    candidate.all_resolved.cmp(&best.all_resolved)
}

/// Ranks absent values ahead of present ones, regardless of value.
///
/// Under [`find_best_indices`] this selects the indices of entries that
/// have no measurement at all. Two present values always tie. Not used
/// for the reported rankings; a building block kept for completeness.
pub fn by_absence<T>(candidate: &Option<T>, best: &Option<T>) -> Ordering {
    match (candidate, best) {
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

//------------ Predicates ----------------------------------------------------

/// Returns whether not a single result has a latency measurement.
///
/// Used to decide whether latency-based rankings are worth reporting at
/// all.
pub fn all_latencies_absent(results: &[ServerResult]) -> bool {
    results.iter().all(|res| res.avg.is_none())
}

/// Returns whether not a single result has a latency deviation.
pub fn all_stddevs_absent(results: &[ServerResult]) -> bool {
    results.iter().all(|res| res.stddev.is_none())
}

//============ Tests =========================================================
