use crate::{
    books::{parse_minimum_rating_count, Book},
    catalog::{Catalog, Report},
    error::ParserError,
    pagination::{PageControl, Pagination},
};

/// A change requested by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterRequest {
    /// Filter with an expression typed as text.
    Expression(String),
    /// Filter with an expression given token by token.
    Tokens(Vec<String>),
    /// Change the minimum rating count, as typed. Anything that is not a number means `0`.
    MinimumRatings(String),
    /// Move to another page of the current results.
    Page(usize),
    /// Remove the genre expression.
    Clear,
}

/// Identifies a submitted [`FilterRequest`].
///
/// Tickets are handed out in increasing order; only the latest one is current.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
enum Query {
    Text(String),
    Tokens(Vec<String>),
}

/// The state of a browsing session over a [`Catalog`].
///
/// The session is the only writer of its filter state: every change goes through
/// [`Session::submit()`], and [`Session::view()`] recomputes the results from that state.
///
/// # Examples
///
/// ```rust
/// use book_filter::{Book, Catalog, FilterRequest, Session};
///
/// let catalog = Catalog::new(vec![
///     Book::new("Dracula", &["Horror"]),
///     Book::new("Rebecca", &["Romance"]),
/// ]);
/// let mut session = Session::new(catalog, 10);
///
/// let ticket = session.submit(FilterRequest::Expression("NOT horror".to_string()));
/// assert!(session.is_current(ticket));
///
/// let view = session.view();
/// assert_eq!(1, view.filtered_books());
/// assert_eq!("Rebecca", view.books()[0].title());
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    catalog: Catalog,
    query: Query,
    minimum_rating_count: u64,
    page: usize,
    page_size: usize,
    latest: Ticket,
}

impl Session {
    pub fn new(catalog: Catalog, page_size: usize) -> Self {
        Self {
            catalog,
            query: Query::Text(String::new()),
            minimum_rating_count: 0,
            page: 1,
            page_size: page_size.max(1),
            latest: Ticket(0),
        }
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn minimum_rating_count(&self) -> u64 {
        self.minimum_rating_count
    }

    /// Apply a request.
    ///
    /// Changing the expression or the minimum rating count goes back to the first page.
    pub fn submit(&mut self, request: FilterRequest) -> Ticket {
        tracing::debug!(?request, "filter request");
        match request {
            FilterRequest::Expression(expression) => {
                self.query = Query::Text(expression.trim().to_owned());
                self.page = 1;
            }
            FilterRequest::Tokens(tokens) => {
                self.query = Query::Tokens(tokens);
                self.page = 1;
            }
            FilterRequest::MinimumRatings(text) => {
                self.minimum_rating_count = parse_minimum_rating_count(&text);
                self.page = 1;
            }
            FilterRequest::Page(page) => {
                self.page = page.max(1);
            }
            FilterRequest::Clear => {
                self.query = Query::Text(String::new());
                self.page = 1;
            }
        }

        self.latest = Ticket(self.latest.0 + 1);
        self.latest
    }

    /// Whether no request was submitted after the one identified by `ticket`.
    #[inline]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket == self.latest
    }

    /// Filter the catalog with the current state.
    ///
    /// A page past the end of the results shows the last page.
    pub fn view(&self) -> View<'_> {
        let report = match &self.query {
            Query::Text(expression) => self.catalog.filter(expression, self.minimum_rating_count),
            Query::Tokens(tokens) => self
                .catalog
                .filter_tokens(tokens, self.minimum_rating_count),
        };
        let pagination = Pagination::new(report.len(), self.page_size);
        View {
            page: pagination.clamp(self.page),
            total_books: self.catalog.len(),
            pagination,
            report,
        }
    }
}

/// One page of filtered results.
#[derive(Clone, Debug)]
pub struct View<'a> {
    report: Report<'a>,
    pagination: Pagination,
    page: usize,
    total_books: usize,
}

impl<'a> View<'a> {
    /// The books of the current page.
    pub fn books(&self) -> &[&'a Book] {
        self.pagination.slice(self.report.matches(), self.page)
    }

    #[inline]
    pub fn page(&self) -> usize {
        self.page
    }

    #[inline]
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages()
    }

    #[inline]
    pub fn total_books(&self) -> usize {
        self.total_books
    }

    #[inline]
    pub fn filtered_books(&self) -> usize {
        self.report.len()
    }

    pub fn controls(&self) -> Vec<PageControl> {
        self.pagination.controls(self.page)
    }

    #[inline]
    pub fn error(&self) -> Option<&ParserError> {
        self.report.error()
    }

    #[inline]
    pub fn report(&self) -> &Report<'a> {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::books::{a_book, a_library};

    fn titles<'a>(view: &View<'a>) -> Vec<&'a str> {
        view.books().iter().map(|book| book.title()).collect()
    }

    fn a_session(page_size: usize) -> Session {
        Session::new(Catalog::new(a_library()), page_size)
    }

    #[test]
    fn start_with_every_book() {
        let session = a_session(100);

        let view = session.view();

        assert_eq!(session.catalog().len(), view.total_books());
        assert_eq!(session.catalog().len(), view.filtered_books());
        assert_eq!(1, view.page());
        assert!(view.error().is_none());
    }

    #[test]
    fn can_filter_by_expression_and_minimum_ratings() {
        let mut session = a_session(10);

        session.submit(FilterRequest::Expression("horror".to_string()));
        session.submit(FilterRequest::MinimumRatings("100".to_string()));

        assert_eq!(vec!["The Shining", "Dracula"], titles(&session.view()));
    }

    #[test]
    fn can_filter_by_tokens() {
        let mut session = a_session(10);

        session.submit(FilterRequest::Tokens(vec![
            "Science Fiction".to_string(),
            "OR".to_string(),
            "Mystery".to_string(),
        ]));

        assert_eq!(vec!["Dune", "Gone Girl"], titles(&session.view()));
    }

    #[test]
    fn treat_a_non_numeric_minimum_as_zero() {
        let mut session = a_session(100);

        session.submit(FilterRequest::MinimumRatings("lots".to_string()));

        assert_eq!(0, session.minimum_rating_count());
        assert_eq!(session.catalog().len(), session.view().filtered_books());
    }

    #[test]
    fn report_parse_errors_and_show_every_book() {
        let mut session = a_session(100);

        session.submit(FilterRequest::Expression("(horror AND".to_string()));
        let view = session.view();

        assert_eq!(Some(&ParserError::UnexpectedEnd), view.error());
        assert_eq!(session.catalog().len(), view.filtered_books());
    }

    #[test]
    fn can_move_between_pages() {
        let mut session = a_session(3);

        session.submit(FilterRequest::Page(2));
        let view = session.view();

        assert_eq!(2, view.page());
        assert_eq!(3, view.total_pages());
        assert_eq!(vec!["The Shining", "Rebecca", "Gone Girl"], titles(&view));
    }

    #[test]
    fn show_the_last_page_past_the_end() {
        let mut session = a_session(3);

        session.submit(FilterRequest::Page(42));
        let view = session.view();

        assert_eq!(3, view.page());
        assert_eq!(2, view.books().len());
    }

    #[test]
    fn go_back_to_the_first_page_when_the_filter_changes() {
        let mut session = a_session(3);
        session.submit(FilterRequest::Page(2));

        session.submit(FilterRequest::Expression("classics".to_string()));

        assert_eq!(1, session.view().page());
    }

    #[test]
    fn can_clear_the_expression() {
        let mut session = a_session(100);
        session.submit(FilterRequest::Expression("romance".to_string()));

        session.submit(FilterRequest::Clear);

        assert_eq!(session.catalog().len(), session.view().filtered_books());
    }

    #[test]
    fn only_the_latest_request_is_current() {
        let mut session = a_session(10);

        let first = session.submit(FilterRequest::Expression("horror".to_string()));
        let second = session.submit(FilterRequest::Expression("romance".to_string()));

        assert!(!session.is_current(first));
        assert!(session.is_current(second));
        assert!(first < second);
    }

    #[test]
    fn can_page_through_the_sorted_results() {
        let books = (0..25)
            .map(|rating| a_book(&format!("book {rating}"), &["Fiction"], rating, 10))
            .collect();
        let mut session = Session::new(Catalog::new(books), 10);

        session.submit(FilterRequest::Page(3));
        let view = session.view();

        assert_eq!(
            vec!["book 4", "book 3", "book 2", "book 1", "book 0"],
            titles(&view)
        );
        assert_eq!(
            Some(&PageControl::Previous(2)),
            view.controls().first()
        );
    }
}
