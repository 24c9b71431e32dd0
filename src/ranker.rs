//! Citation-count ranking.

use crate::publication::Publication;

/// Number of publications processed when no limit is given.
pub const DEFAULT_LIMIT: usize = 10;

/// Orders publications by citation count, most cited first, and keeps the
/// first `limit`.
///
/// The sort is stable: publications with equal counts keep provider order.
#[must_use]
pub fn rank_by_citations(mut publications: Vec<Publication>, limit: usize) -> Vec<Publication> {
    publications.sort_by(|a, b| b.citation_count.cmp(&a.citation_count));
    publications.truncate(limit);
    publications
}
