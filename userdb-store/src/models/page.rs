//! Limit/offset window for listing users

/// Default page size used by the console front end
pub const DEFAULT_LIMIT: u32 = 100;

/// A `LIMIT`/`OFFSET` window over the id-ordered users table.
///
/// Both values come straight from the caller; there is no implicit cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u64,
}

impl Page {
    pub fn new(limit: u32, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// The page after this one, same size.
    pub fn next(&self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset.saturating_add(u64::from(self.limit)),
        }
    }

    /// SQL `LIMIT` bind value.
    pub(crate) fn sql_limit(&self) -> i64 {
        i64::from(self.limit)
    }

    /// SQL `OFFSET` bind value, saturated to the `BIGINT` range.
    pub(crate) fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}
