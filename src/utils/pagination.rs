use serde::Serialize;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 25;

#[derive(Serialize, Debug)]
pub struct Paginated<T> {
    pub success: bool,
    pub count: usize,
    pub pagination: PaginatedMeta,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, pagination: PaginatedMeta) -> Paginated<T> {
        Self {
            success: true,
            count: data.len(),
            pagination,
            data,
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRef {
    pub page: u32,
    pub limit: u32,
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginatedMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
}

/// 1-indexed page window. Both values are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn positive_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|value| *value >= 1)
        .unwrap_or(default)
}

impl Pagination {
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: positive_or(page, DEFAULT_PAGE),
            limit: positive_or(limit, DEFAULT_LIMIT),
        }
    }

    fn start_index(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    fn end_index(&self) -> u64 {
        self.page as u64 * self.limit as u64
    }

    pub fn skip(&self) -> i64 {
        i64::try_from(self.start_index()).unwrap_or(i64::MAX)
    }

    pub fn take(&self) -> i64 {
        self.limit as i64
    }

    pub fn meta(&self, total: i64) -> PaginatedMeta {
        let total = u64::try_from(total).unwrap_or(0);

        PaginatedMeta {
            next: (self.end_index() < total).then(|| PageRef {
                page: self.page.saturating_add(1),
                limit: self.limit,
            }),
            prev: (self.page > 1).then(|| PageRef {
                page: self.page - 1,
                limit: self.limit,
            }),
        }
    }
}
