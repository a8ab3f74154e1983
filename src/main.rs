//! book-filter CLI: filter a book catalog by genre expression.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use book_filter::{Book, Catalog, FilterRequest, Pagination, Session, View};

#[derive(Parser)]
#[command(
    name = "book-filter",
    version,
    about = "Filter a book catalog by genre expression"
)]
struct Cli {
    /// Dataset to load: a JSON array of books, or JSON lines for `.jl`/`.jsonl` files.
    #[arg(long, global = true, default_value = "goodreads-books-data.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the books matching a genre expression, best rated first.
    Filter {
        /// Genre expression, e.g. "(horror OR thriller) AND NOT romance". Empty matches all.
        #[arg(long, short, default_value = "")]
        expression: String,

        /// Genre expression given token by token; genres may contain spaces.
        #[arg(long, num_args = 1.., conflicts_with = "expression")]
        tokens: Option<Vec<String>>,

        /// Minimum number of ratings. Anything that is not a number means 0.
        #[arg(long, default_value = "0")]
        min_ratings: String,

        /// Page to show, starting at 1.
        #[arg(long, default_value = "1")]
        page: usize,

        /// Books per page.
        #[arg(long, default_value_t = Pagination::DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Print the page as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the genres of the catalog with their number of books.
    Genres,
}

#[derive(Serialize)]
struct PageOutput<'a> {
    total_books: usize,
    filtered_books: usize,
    page: usize,
    total_pages: usize,
    error: Option<String>,
    books: &'a [&'a Book],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = Catalog::open(&cli.data).into_diagnostic()?;

    match cli.command {
        Commands::Filter {
            expression,
            tokens,
            min_ratings,
            page,
            page_size,
            json,
        } => {
            let mut session = Session::new(catalog, page_size);
            match tokens {
                Some(tokens) => session.submit(FilterRequest::Tokens(tokens)),
                None => session.submit(FilterRequest::Expression(expression)),
            };
            session.submit(FilterRequest::MinimumRatings(min_ratings));
            session.submit(FilterRequest::Page(page));

            let view = session.view();
            if let Some(error) = view.error() {
                eprintln!("Parse error: {error}");
            }
            if json {
                print_json(&view)?;
            } else {
                print_table(&view);
            }
        }

        Commands::Genres => {
            for genre in catalog.vocabulary().genres() {
                println!("{:>6}  {}", genre.books, genre.name);
            }
        }
    }

    Ok(())
}

fn print_json(view: &View<'_>) -> Result<()> {
    let output = PageOutput {
        total_books: view.total_books(),
        filtered_books: view.filtered_books(),
        page: view.page(),
        total_pages: view.total_pages(),
        error: view.error().map(ToString::to_string),
        books: view.books(),
    };
    let rendered = serde_json::to_string_pretty(&output).into_diagnostic()?;
    println!("{rendered}");
    Ok(())
}

fn print_table(view: &View<'_>) {
    println!("Total Books: {}", view.total_books());
    println!("Filtered Results: {}", view.filtered_books());
    println!();

    for book in view.books() {
        println!(
            "{:>5}  {:>10}  {} by {}",
            book.average_rating(),
            book.rating_count(),
            book.title(),
            book.author()
        );
        println!("{:19}{}", "", book.genres().join(", "));
        if !book.link().is_empty() {
            println!("{:19}{}", "", book.link());
        }
    }

    let controls = view.controls();
    if !controls.is_empty() {
        println!();
        let bar: Vec<String> = controls.iter().map(ToString::to_string).collect();
        println!("{}", bar.join("  "));
    }
}
