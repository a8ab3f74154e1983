use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// A book of the catalog.
///
/// The field names follow the dataset produced by the scraper (`Title`, `Avg Rating`,
/// `Num Ratings`, ...). The ratings are usually stored as text there (`"4.12"`, `"1,234,567"`,
/// `"N/A"`) so they are parsed leniently: anything that is not a number becomes `0`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Author", default)]
    author: String,
    #[serde(rename = "Link", default)]
    link: String,
    #[serde(
        rename = "Avg Rating",
        default,
        deserialize_with = "deserialize_average_rating"
    )]
    average_rating: Decimal,
    #[serde(
        rename = "Num Ratings",
        default,
        deserialize_with = "deserialize_rating_count"
    )]
    rating_count: u64,
    #[serde(rename = "Genres", default, deserialize_with = "deserialize_genres")]
    genres: Vec<String>,
}

impl Book {
    /// Create a book with the given genres and no ratings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use book_filter::Book;
    /// use rust_decimal::Decimal;
    ///
    /// let book = Book::new("Dracula", &["Horror", "Classics"])
    ///     .with_author("Bram Stoker")
    ///     .with_ratings(Decimal::new(401, 2), 1_234_567);
    ///
    /// assert_eq!(1_234_567, book.rating_count());
    /// ```
    pub fn new(title: &str, genres: &[&str]) -> Self {
        Self {
            title: title.to_owned(),
            author: String::new(),
            link: String::new(),
            average_rating: Decimal::ZERO,
            rating_count: 0,
            genres: genres.iter().map(|genre| genre.to_string()).collect(),
        }
    }

    pub fn with_author(mut self, author: &str) -> Self {
        self.author = author.to_owned();
        self
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.link = link.to_owned();
        self
    }

    pub fn with_ratings(mut self, average_rating: Decimal, rating_count: u64) -> Self {
        self.average_rating = average_rating;
        self.rating_count = rating_count;
        self
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[inline]
    pub fn link(&self) -> &str {
        &self.link
    }

    #[inline]
    pub fn average_rating(&self) -> Decimal {
        self.average_rating
    }

    #[inline]
    pub fn rating_count(&self) -> u64 {
        self.rating_count
    }

    #[inline]
    pub fn genres(&self) -> &[String] {
        &self.genres
    }
}

/// Parse a rating count such as `"1,234,567"`.
///
/// Thousands separators and surrounding spaces are ignored. Returns `None` when the text is not a
/// non-negative integer.
pub fn parse_rating_count(text: &str) -> Option<u64> {
    let digits: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    digits.parse().ok()
}

/// Parse the minimum rating count typed by a user.
///
/// Leading digits are kept (thousands separators allowed) and everything else is ignored, so
/// `"250 ratings"` is `250` while `"abc"` or `"-5"` is `0`.
pub fn parse_minimum_rating_count(text: &str) -> u64 {
    let digits: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .take_while(char::is_ascii_digit)
        .collect();
    // Overflowing thresholds saturate.
    if digits.is_empty() {
        0
    } else {
        digits.parse().unwrap_or(u64::MAX)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Integer(u64),
    Float(f64),
    Text(String),
}

fn deserialize_average_rating<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let rating = match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Integer(value)) => Decimal::from(value),
        Some(RawNumber::Float(value)) => Decimal::try_from(value).unwrap_or_default(),
        Some(RawNumber::Text(text)) => Decimal::from_str(text.trim()).unwrap_or_else(|_| {
            tracing::debug!(rating = %text, "unparseable average rating, using 0");
            Decimal::ZERO
        }),
        None => Decimal::ZERO,
    };
    Ok(rating)
}

fn deserialize_rating_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Integer(value)) => value,
        Some(RawNumber::Float(value)) if value.is_finite() && value >= 0.0 => value as u64,
        Some(RawNumber::Float(_)) => 0,
        Some(RawNumber::Text(text)) => parse_rating_count(&text).unwrap_or_else(|| {
            tracing::debug!(count = %text, "unparseable rating count, using 0");
            0
        }),
        None => 0,
    };
    Ok(count)
}

fn deserialize_genres<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
