//! Paginated list envelope: `{ items, total, page, size, pages }`.

use serde::{Deserialize, Serialize};

/// Default page size used by list commands.
pub const DEFAULT_PAGE_SIZE: u32 = 25;
/// Largest page size the API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    /// 1-based.
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub pages: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Page count; computed from `total/size` when the server omits `pages`.
    pub fn total_pages(&self) -> u32 {
        if self.pages > 0 {
            return self.pages;
        }
        if self.size == 0 {
            return u32::from(!self.items.is_empty());
        }
        self.total.div_ceil(u64::from(self.size)) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Page selection for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Clamps to `page >= 1` and `1 <= size <= MAX_PAGE_SIZE`.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [("page", self.page.to_string()), ("size", self.size.to_string())]
    }
}
