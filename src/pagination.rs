use std::{
    fmt::{Display, Formatter},
    ops::Range,
};

/// Splits a list of results into numbered pages, starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    total_items: usize,
    page_size: usize,
}

/// A control of a pagination bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageControl {
    Previous(usize),
    Page { number: usize, current: bool },
    Ellipsis,
    Next(usize),
}

impl Pagination {
    pub const DEFAULT_PAGE_SIZE: usize = 10;
    const MAX_VISIBLE_PAGES: usize = 5;

    /// A page size of `0` is treated as `1`.
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Self {
            total_items,
            page_size: page_size.max(1),
        }
    }

    #[inline]
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Bring a page number back between the first and the last page.
    ///
    /// There is always a first page, even when there is nothing to show.
    #[inline]
    pub fn clamp(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages().max(1))
    }

    /// The indices of the items shown on `page`.
    pub fn range(&self, page: usize) -> Range<usize> {
        let page = self.clamp(page);
        let start = ((page - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let range = self.range(page);
        &items[range.start.min(items.len())..range.end.min(items.len())]
    }

    /// The controls of a pagination bar centered around `page`.
    ///
    /// At most five page numbers are shown. The first and last pages are always reachable,
    /// with an ellipsis standing for the pages that are skipped. Nothing is shown when everything
    /// fits on one page.
    pub fn controls(&self, page: usize) -> Vec<PageControl> {
        let total_pages = self.total_pages();
        if total_pages <= 1 {
            return Vec::new();
        }

        let current = self.clamp(page);
        let mut start = current
            .saturating_sub(Self::MAX_VISIBLE_PAGES / 2)
            .max(1);
        let end = (start + Self::MAX_VISIBLE_PAGES - 1).min(total_pages);
        if end + 1 - start < Self::MAX_VISIBLE_PAGES {
            start = (end + 1).saturating_sub(Self::MAX_VISIBLE_PAGES).max(1);
        }

        let mut controls = Vec::with_capacity(Self::MAX_VISIBLE_PAGES + 6);
        if current > 1 {
            controls.push(PageControl::Previous(current - 1));
        }
        if start > 1 {
            controls.push(PageControl::Page {
                number: 1,
                current: false,
            });
            if start > 2 {
                controls.push(PageControl::Ellipsis);
            }
        }
        controls.extend((start..=end).map(|number| PageControl::Page {
            number,
            current: number == current,
        }));
        if end < total_pages {
            if end < total_pages - 1 {
                controls.push(PageControl::Ellipsis);
            }
            controls.push(PageControl::Page {
                number: total_pages,
                current: false,
            });
        }
        if current < total_pages {
            controls.push(PageControl::Next(current + 1));
        }
        controls
    }
}

impl Display for PageControl {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Previous(_) => write!(formatter, "‹ Previous"),
            Self::Page {
                number,
                current: true,
            } => write!(formatter, "[{number}]"),
            Self::Page { number, .. } => write!(formatter, "{number}"),
            Self::Ellipsis => write!(formatter, "..."),
            Self::Next(_) => write!(formatter, "Next ›"),
        }
    }
}
