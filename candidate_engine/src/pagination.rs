use crate::config::PageError;

/// The number of pages needed for `count` items. Zero for an empty list.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Brings a requested page back into `[1, total_pages]`.
///
/// When there are no pages at all, this is the first page.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// The items of one page (pages start at 1).
///
/// Asking for a page outside of `[1, total_pages]` is an error: callers are
/// expected to clamp the page number first (see `clamp_page`).
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> Result<&[T], PageError> {
    if page_size == 0 {
        return Err(PageError::ZeroPageSize);
    }
    let num_pages = total_pages(items.len(), page_size);
    if page == 0 || page > num_pages {
        return Err(PageError::OutOfRange {
            page,
            total_pages: num_pages,
        });
    }
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Ok(&items[start..end])
}

/// The page numbers to offer around the current page.
///
/// The window holds `min(window_size, total_pages)` consecutive pages, centred
/// on `current_page` when possible. Close to the first or last page, the window
/// slides so that it keeps its size.
pub fn visible_page_window(total_pages: usize, current_page: usize, window_size: usize) -> Vec<usize> {
    if total_pages == 0 || window_size == 0 {
        return Vec::new();
    }
    let len = window_size.min(total_pages);
    let current = clamp_page(current_page, total_pages);
    let mut start = current.saturating_sub(window_size / 2).max(1);
    // The last page of the window must not go past the last page.
    if start + len - 1 > total_pages {
        start = total_pages - len + 1;
    }
    (start..start + len).collect()
}
