//! Infinite-scroll trigger logic.

/// Decides whether the next page should be requested.
///
/// True only when the viewport has reached the end of the loaded list
/// during an active user scroll, more pages remain, and no fetch is
/// already running. Stateless: the caller supplies every input and must
/// reset its scrolling flag after consuming a `true`, so one gesture
/// triggers at most one fetch.
pub fn should_fetch_next(
    first_visible_index: usize,
    visible_count: usize,
    total_count: usize,
    is_user_scrolling: bool,
    is_last_page: bool,
    is_fetch_in_flight: bool,
) -> bool {
    let at_last_item = first_visible_index + visible_count >= total_count;
    at_last_item && is_user_scrolling && !is_last_page && !is_fetch_in_flight
}
