//! Pagination controls under a table.

use std::fmt;

/// Page position reported with a result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationMeta {
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

impl<T> From<&crate::binding::ResultPage<T>> for PaginationMeta {
    fn from(page: &crate::binding::ResultPage<T>) -> Self {
        Self {
            page: page.page,
            total_pages: page.total_pages,
            total_count: page.total_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    First,
    Previous,
    Next,
    Last,
    Page(u32),
}

/// Page sequence with fixed first/last pages and a window around `current`.
///
/// `edge` pages are always shown at each end and `around` pages on each side
/// of the current one; each gap collapses into one ellipsis.
fn page_sequence(total_pages: u32, current: u32, edge: u32, around: u32) -> Vec<PageItem> {
    if total_pages == 0 {
        return Vec::new();
    }
    // Exclusive range ends go one past the last page, so work in u64.
    let last = u64::from(total_pages);
    let current = u64::from(current).clamp(1, last);
    let (edge, around) = (u64::from(edge), u64::from(around));
    // Every page number below is at most `last`.
    let page = |n: u64| PageItem::Page(n as u32);

    let mut items = Vec::new();

    let left_end = (1 + edge).min(last + 1);
    items.extend((1..left_end).map(page));

    let mid_start = left_end.max(current.saturating_sub(around));
    let mid_end = (current + around + 1).min(last + 1);
    if mid_start > left_end {
        items.push(PageItem::Ellipsis);
    }
    items.extend((mid_start..mid_end).map(page));

    let right_start = mid_end.max(last.saturating_sub(edge) + 1);
    if right_start > mid_end {
        items.push(PageItem::Ellipsis);
    }
    items.extend((right_start..=last).map(page));

    items
}

/// Controls shown when a collection spans more than one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationBar {
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub items: Vec<PageItem>,
}

impl PaginationBar {
    /// `None` when everything fits on one page.
    pub fn from_meta(meta: PaginationMeta) -> Option<Self> {
        if meta.total_pages <= 1 {
            return None;
        }
        Some(Self {
            page: meta.page,
            total_pages: meta.total_pages,
            total_count: meta.total_count,
            items: page_sequence(meta.total_pages, meta.page, 1, 1),
        })
    }

    pub fn first_enabled(&self) -> bool {
        self.page > 1
    }

    pub fn previous_enabled(&self) -> bool {
        self.page > 1
    }

    pub fn next_enabled(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn last_enabled(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page a control leads to, or `None` if it is disabled.
    pub fn target(&self, control: PageControl) -> Option<u32> {
        match control {
            PageControl::First => self.first_enabled().then_some(1),
            PageControl::Previous => self.previous_enabled().then(|| self.page - 1),
            PageControl::Next => self.next_enabled().then(|| self.page + 1),
            PageControl::Last => self.last_enabled().then_some(self.total_pages),
            PageControl::Page(n) => {
                (n >= 1 && n <= self.total_pages && n != self.page).then_some(n)
            }
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Page {} of {} \u{b7} {} total",
            self.page, self.total_pages, self.total_count
        )
    }
}

impl fmt::Display for PaginationBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pages: Vec<String> = self
            .items
            .iter()
            .map(|item| match item {
                PageItem::Page(n) if *n == self.page => format!("[{n}]"),
                PageItem::Page(n) => n.to_string(),
                PageItem::Ellipsis => "\u{2026}".to_string(),
            })
            .collect();
        write!(f, "{}", pages.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(page: u32, total_pages: u32) -> Option<PaginationBar> {
        PaginationBar::from_meta(PaginationMeta {
            page,
            total_pages,
            total_count: u64::from(total_pages) * 15,
        })
    }

    #[test]
    fn test_absent_for_single_page() {
        assert!(bar(1, 1).is_none());
        assert!(bar(1, 0).is_none());
        assert!(bar(1, 2).is_some());
    }

    #[test]
    fn test_page_sequences() {
        let seq = |page, total| bar(page, total).unwrap().to_string();
        insta::assert_snapshot!(seq(1, 10), @"[1] 2 … 10");
        insta::assert_snapshot!(seq(5, 10), @"1 … 4 [5] 6 … 10");
        insta::assert_snapshot!(seq(3, 10), @"1 2 [3] 4 … 10");
        insta::assert_snapshot!(seq(10, 10), @"1 … 9 [10]");
        insta::assert_snapshot!(seq(2, 3), @"1 [2] 3");
    }

    #[test]
    fn test_huge_page_count() {
        let seq = |page, total| bar(page, total).unwrap().to_string();
        insta::assert_snapshot!(seq(1, u32::MAX), @"[1] 2 … 4294967295");
        insta::assert_snapshot!(seq(u32::MAX, u32::MAX), @"1 … 4294967294 [4294967295]");

        let first = bar(1, u32::MAX).unwrap();
        assert_eq!(first.target(PageControl::Last), Some(u32::MAX));
        assert_eq!(bar(u32::MAX, u32::MAX).unwrap().target(PageControl::Next), None);
    }

    #[test]
    fn test_controls_enablement() {
        let first = bar(1, 3).unwrap();
        assert!(!first.first_enabled() && !first.previous_enabled());
        assert!(first.next_enabled() && first.last_enabled());

        let last = bar(3, 3).unwrap();
        assert!(last.first_enabled() && last.previous_enabled());
        assert!(!last.next_enabled() && !last.last_enabled());
        assert_eq!(last.target(PageControl::Next), None);
        assert_eq!(last.target(PageControl::Last), None);
        assert_eq!(last.target(PageControl::Previous), Some(2));
        assert_eq!(last.target(PageControl::Page(4)), None);
        assert_eq!(last.target(PageControl::Page(1)), Some(1));
    }

    #[test]
    fn test_summary() {
        let bar = PaginationBar::from_meta(PaginationMeta {
            page: 1,
            total_pages: 3,
            total_count: 37,
        })
        .unwrap();
        assert_eq!(bar.summary(), "Page 1 of 3 · 37 total");
    }
}
