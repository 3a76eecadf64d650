//! Query state for remote list requests.
//!
//! A [`QuerySpec`] describes one desired result page: the date filter, the
//! search text, the page number and size, and any extra parameters a view
//! adds (such as a `status` filter). Every setter that changes the result set
//! resets the page to 1 so a stale page number is never requested against a
//! different collection.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;

use crate::error::{BackofficeError, Result};

/// Default number of rows per page when a view does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Inclusive calendar date range for custom filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Result<Self> {
        if start > end {
            return Err(BackofficeError::InvalidInput(format!(
                "date range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl FromStr for DateRange {
    type Err = BackofficeError;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s.split_once("..").ok_or_else(|| {
            BackofficeError::InvalidInput(format!(
                "invalid date range '{s}', expected YYYY-MM-DD..YYYY-MM-DD"
            ))
        })?;
        DateRange::new(parse_date(start)?, parse_date(end)?)
    }
}

/// Parse an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Result<Date> {
    s.trim()
        .parse::<Date>()
        .map_err(|e| BackofficeError::InvalidInput(format!("invalid date '{s}': {e}")))
}

/// Date filter applied by views that show time-bounded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFilter {
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
    LastYear,
    Custom(DateRange),
}

impl DateFilter {
    /// Preset filters in the order they are offered.
    pub const PRESETS: [DateFilter; 5] = [
        DateFilter::Today,
        DateFilter::ThisWeek,
        DateFilter::ThisMonth,
        DateFilter::ThisYear,
        DateFilter::LastYear,
    ];

    /// Value sent in the `filter` query parameter.
    pub fn wire_name(&self) -> &'static str {
        match self {
            DateFilter::Today => "today",
            DateFilter::ThisWeek => "this_week",
            DateFilter::ThisMonth => "this_month",
            DateFilter::ThisYear => "this_year",
            DateFilter::LastYear => "last_year",
            DateFilter::Custom(_) => "custom",
        }
    }

    /// Human label used in headers.
    pub fn label(&self) -> String {
        match self {
            DateFilter::Today => "Today".to_string(),
            DateFilter::ThisWeek => "This Week".to_string(),
            DateFilter::ThisMonth => "This Month".to_string(),
            DateFilter::ThisYear => "This Year".to_string(),
            DateFilter::LastYear => "Last Year".to_string(),
            DateFilter::Custom(range) => range.to_string(),
        }
    }

    /// Next preset in cycling order. A custom range cycles back to the first preset.
    pub fn next_preset(&self) -> DateFilter {
        let idx = Self::PRESETS.iter().position(|p| p == self);
        match idx {
            Some(i) => Self::PRESETS[(i + 1) % Self::PRESETS.len()],
            None => Self::PRESETS[0],
        }
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFilter::Custom(range) => write!(f, "{range}"),
            other => write!(f, "{}", other.wire_name()),
        }
    }
}

impl FromStr for DateFilter {
    type Err = BackofficeError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "today" => Ok(DateFilter::Today),
            "this_week" | "week" => Ok(DateFilter::ThisWeek),
            "this_month" | "month" => Ok(DateFilter::ThisMonth),
            "this_year" | "year" => Ok(DateFilter::ThisYear),
            "last_year" => Ok(DateFilter::LastYear),
            _ if s.contains("..") => Ok(DateFilter::Custom(s.parse()?)),
            _ => Err(BackofficeError::InvalidInput(format!(
                "unknown filter '{s}', expected one of today, this_week, this_month, this_year, last_year or YYYY-MM-DD..YYYY-MM-DD"
            ))),
        }
    }
}

/// Caller-owned description of the desired result page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuerySpec {
    filter: Option<DateFilter>,
    search: String,
    page: u32,
    page_size: u32,
    params: BTreeMap<String, String>,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QuerySpec {
    pub fn new(page_size: u32) -> Self {
        Self {
            filter: None,
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
            params: BTreeMap::new(),
        }
    }

    /// Builder-style filter for initial construction.
    pub fn with_filter(mut self, filter: Option<DateFilter>) -> Self {
        self.set_filter(filter);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.set_search(search);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_param(key, value);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.set_page(page);
        self
    }

    pub fn filter(&self) -> Option<&DateFilter> {
        self.filter.as_ref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Change the date filter. Returns true if the value changed.
    pub fn set_filter(&mut self, filter: Option<DateFilter>) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        self.page = 1;
        true
    }

    /// Change the search text. Surrounding whitespace is dropped, so only a
    /// different trimmed text counts as a change. Returns true if it changed.
    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into().trim().to_string();
        if self.search == search {
            return false;
        }
        self.search = search;
        self.page = 1;
        true
    }

    /// Change the page size. Returns true if the value changed.
    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        let page_size = page_size.max(1);
        if self.page_size == page_size {
            return false;
        }
        self.page_size = page_size;
        self.page = 1;
        true
    }

    /// Set a caller-supplied parameter. An empty value removes it.
    /// Returns true if the parameter set changed.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            return self.remove_param(&key);
        }
        if self.params.get(&key) == Some(&value) {
            return false;
        }
        self.params.insert(key, value);
        self.page = 1;
        true
    }

    pub fn remove_param(&mut self, key: &str) -> bool {
        if self.params.remove(key).is_some() {
            self.page = 1;
            return true;
        }
        false
    }

    /// Move to a page. Values below 1 are clamped to 1.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if self.page == page {
            return false;
        }
        self.page = page;
        true
    }

    /// Serialise into query parameters in a stable order.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.page_size.to_string()),
        ];

        if let Some(filter) = &self.filter {
            pairs.push(("filter".to_string(), filter.wire_name().to_string()));
            if let DateFilter::Custom(range) = filter {
                pairs.push(("start_date".to_string(), range.start().to_string()));
                pairs.push(("end_date".to_string(), range.end().to_string()));
            }
        }

        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.clone()));
        }

        for (key, value) in &self.params {
            pairs.push((key.clone(), value.clone()));
        }

        pairs
    }
}
