//! Offset/limit pagination.

use crate::request::SearchPagination;

/// One page of a result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub returned_count: usize,
    pub has_more: bool,
}

/// Slices `items` by the pagination window.
///
/// A negative offset is treated as zero and an offset past the end yields an
/// empty page. A limit of zero or less is ignored. `has_more` is only ever
/// set when a limit was given.
///
/// # Example
///
/// ```
/// use reminders_query_rs::{paginate, SearchPagination};
///
/// let page = paginate(vec!["a", "b", "c"], &SearchPagination::new(Some(1), Some(1)));
/// assert_eq!(page.items, vec!["b"]);
/// assert_eq!(page.total_count, 3);
/// assert!(page.has_more);
/// ```
pub fn paginate<T>(items: Vec<T>, pagination: &SearchPagination) -> Page<T> {
    let total_count = items.len();
    let offset = clamp_to_len(pagination.offset.unwrap_or(0), total_count);

    let end = match pagination.limit {
        Some(limit) if limit > 0 => offset.saturating_add(clamp_to_len(limit, total_count)),
        _ => total_count,
    }
    .min(total_count);

    let page: Vec<T> = items.into_iter().skip(offset).take(end - offset).collect();
    let returned_count = page.len();
    let has_more = pagination.limit.is_some() && total_count > returned_count + offset;

    Page {
        items: page,
        total_count,
        returned_count,
        has_more,
    }
}

fn clamp_to_len(value: i64, len: usize) -> usize {
    usize::try_from(value.max(0)).map_or(len, |value| value.min(len))
}
