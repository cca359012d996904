pub const QUESTIONS_PER_PAGE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Pagination {
    pub fn new(page: i64) -> Self {
        Self { page }
    }

    /// Reads `page` from decoded query pairs. The first occurrence wins and a
    /// value that is not an integer leaves the default first page.
    pub fn from_query_pairs(pairs: &[(String, String)]) -> Self {
        pairs
            .iter()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.trim().parse::<i64>().ok())
            .map(Self::new)
            .unwrap_or_default()
    }

    /// `(limit, offset)` of the page, or `None` when the page cannot hold any
    /// rows (pages below 1, or an offset past `i64::MAX`).
    pub fn window(&self) -> Option<(i64, i64)> {
        if self.page < 1 {
            return None;
        }
        let offset = (self.page - 1).checked_mul(QUESTIONS_PER_PAGE)?;
        Some((QUESTIONS_PER_PAGE, offset))
    }
}
