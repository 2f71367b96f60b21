use std::str::FromStr;

use serde::Serialize;

use crate::domain::invoice::{Invoice, InvoiceStatus};
use crate::domain::order::{Order, OrderStatus};

// ============================================================================
// Listing - search, status filter and pagination for the order and
// invoice tables
// ============================================================================

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A row the search box and status dropdown can act on.
pub trait TableRow {
    type Status: Copy + PartialEq;

    fn search_keys(&self) -> Vec<&str>;
    fn status(&self) -> Self::Status;
}

impl TableRow for Order {
    type Status = OrderStatus;

    fn search_keys(&self) -> Vec<&str> {
        vec![self.id().as_str(), self.customer_name.as_str(), self.destination.as_str()]
    }

    fn status(&self) -> OrderStatus {
        self.status
    }
}

impl TableRow for Invoice {
    type Status = InvoiceStatus;

    fn search_keys(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.order_id.as_str(), self.customer_name.as_str()]
    }

    fn status(&self) -> InvoiceStatus {
        self.status
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S: PartialEq> StatusFilter<S> {
    pub fn matches(&self, status: &S) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// Parses the dropdown values: "all" or a status label.
impl<S: FromStr> FromStr for StatusFilter<S> {
    type Err = S::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

/// Rows whose search keys contain `search` (case-insensitive) and whose status
/// passes `filter`, in their original order.
pub fn filter_rows<'a, R: TableRow>(
    rows: &'a [R],
    search: &str,
    filter: StatusFilter<R::Status>,
) -> Vec<&'a R> {
    let needle = search.to_lowercase();

    rows.iter()
        .filter(|row| filter.matches(&row.status()))
        .filter(|row| {
            needle.is_empty()
                || row.search_keys().iter().any(|key| key.to_lowercase().contains(&needle))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// 1-based index of the first row shown, 0 when there is nothing to show.
    pub fn first_row(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    pub fn last_row(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_row() + self.items.len() - 1
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// "Showing X to Y of N <noun>"
    pub fn showing(&self, noun: &str) -> String {
        format!(
            "Showing {} to {} of {} {}",
            self.first_row(),
            self.last_row(),
            self.total_rows,
            noun
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self { page_size: page_size.max(1) }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, rows: usize) -> usize {
        rows.div_ceil(self.page_size)
    }

    /// Requested pages outside `[1, total_pages]` are clamped; an empty
    /// listing is page 1 of 0.
    pub fn page<T: Clone>(&self, rows: &[T], requested: usize) -> Page<T> {
        let total_pages = self.total_pages(rows.len());
        let page = requested.clamp(1, total_pages.max(1));
        let start = (page - 1) * self.page_size;

        Page {
            items: rows.iter().skip(start).take(self.page_size).cloned().collect(),
            page,
            total_pages,
            total_rows: rows.len(),
            page_size: self.page_size,
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Search box, status dropdown and current page of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery<S> {
    search: String,
    filter: StatusFilter<S>,
    page: usize,
}

impl<S: Copy + PartialEq> TableQuery<S> {
    pub fn new() -> Self {
        Self { search: String::new(), filter: StatusFilter::All, page: 1 }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> StatusFilter<S> {
        self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_filter(&mut self, filter: StatusFilter<S>) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn go_to(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Filter then paginate. The stored page is left alone; the returned
    /// page number is the clamped one.
    pub fn apply<'a, R>(&self, rows: &'a [R], paginator: &Paginator) -> Page<&'a R>
    where
        R: TableRow<Status = S>,
    {
        let filtered = filter_rows(rows, &self.search, self.filter);
        paginator.page(&filtered, self.page)
    }
}

impl<S: Copy + PartialEq> Default for TableQuery<S> {
    fn default() -> Self {
        Self::new()
    }
}
