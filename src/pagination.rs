use serde::Deserialize;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// `?page=` query string. Kept as raw text so that a malformed value falls
/// back to the first page instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    pub fn new(page: Option<&str>) -> Self {
        Self {
            page: page.map(str::to_owned),
        }
    }

    pub fn number(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }
}

/// Returns page `page` (1-based) of `items`. Pages before the first or past
/// the last are empty.
pub fn paginate<T: Clone>(items: &[T], page: i64, page_size: usize) -> Vec<T> {
    if page < 1 || page_size == 0 {
        return Vec::new();
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(page_size))
        .unwrap_or(usize::MAX);
    if start >= items.len() {
        return Vec::new();
    }
    let end = start.saturating_add(page_size).min(items.len());
    items[start..end].to_vec()
}
