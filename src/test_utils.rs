pub mod ast {
    macro_rules! or {
        ($left:expr, $right:expr) => {
            Node::Or(Box::new($left), Box::new($right))
        };
    }

    macro_rules! and {
        ($left:expr, $right:expr) => {
            Node::And(Box::new($left), Box::new($right))
        };
    }

    macro_rules! not {
        ($value:expr) => {
            Node::Not(Box::new($value))
        };
    }

    macro_rules! genre {
        ($name:expr) => {
            Node::Genre(($name).to_string())
        };
    }

    pub(crate) use and;
    pub(crate) use genre;
    pub(crate) use not;
    pub(crate) use or;
}

pub mod books {
    use crate::books::Book;
    use rust_decimal::Decimal;

    /// A book with an average rating given in hundredths (`412` is `4.12`).
    pub fn a_book(title: &str, genres: &[&str], average_rating: i64, rating_count: u64) -> Book {
        Book::new(title, genres).with_ratings(Decimal::new(average_rating, 2), rating_count)
    }

    pub fn a_library() -> Vec<Book> {
        vec![
            a_book("Dracula", &["Horror", "Classics", "Fiction"], 401, 1_234_567),
            a_book("Pride and Prejudice", &["Romance", "Classics"], 429, 4_300_000),
            a_book("Gone Girl", &["Thriller", "Mystery", "Fiction"], 412, 3_100_000),
            a_book("Rebecca", &["Romance", "Thriller", "Classics"], 426, 520_000),
            a_book("The Shining", &["horror", "fiction"], 427, 1_600_000),
            a_book("Dune", &["Science Fiction", "Classics"], 428, 1_400_000),
            a_book("Local Legends", &["Horror"], 350, 12),
            a_book("Untagged", &[], 500, 90),
        ]
    }
}
