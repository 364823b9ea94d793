use std::collections::HashMap;
use std::fmt;

use event_emitter_rs::EventEmitter;
use serde::Deserialize;

use crate::book::{Book, BookKey};
use crate::error::CatalogError;
use crate::notice::{EmailChanged, EMAIL_CHANGED};

pub struct Reader {
    name: String,
    email: String,
    books: HashMap<BookKey, Option<i32>>,
    emitter: EventEmitter,
}

impl Reader {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Reader {
            name: name.into(),
            email: email.into(),
            books: HashMap::new(),
            emitter: EventEmitter::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn change_email(&mut self, address: impl Into<String>) {
        self.email = address.into();
        let notice = EmailChanged {
            name: self.name.clone(),
            email: self.email.clone(),
        };
        println!("{}", notice);
        self.emitter.emit(EMAIL_CHANGED, notice);
    }

    /// Records the book as read, overwriting any earlier entry for the same
    /// key. The rating is stored verbatim; only the book's own list checks
    /// the range.
    pub fn read_book(&mut self, book: &Book, rating: Option<i32>) {
        self.books.insert(book.key(), rating);
    }

    pub fn books(&self) -> &HashMap<BookKey, Option<i32>> {
        &self.books
    }

    pub fn books_read(&self) -> usize {
        self.books.len()
    }

    /// Sum of the ratings this reader actually gave, divided by the total
    /// number of books read. Unrated books count toward the divisor.
    pub fn average_rating(&self) -> Result<f64, CatalogError> {
        if self.books.is_empty() {
            return Err(CatalogError::NoBooksRead {
                email: self.email.clone(),
            });
        }
        let total: i32 = self.books.values().flatten().sum();
        Ok(f64::from(total) / self.books.len() as f64)
    }

    pub fn on<F, T>(&mut self, event: &str, listener: F)
    where
        for<'de> T: Deserialize<'de>,
        F: Fn(T) + Send + Sync + 'static,
    {
        self.emitter.on(event, listener);
    }
}

impl PartialEq for Reader {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl fmt::Display for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reader {}, email: {}, books read: {}",
            self.name,
            self.email,
            self.books.len()
        )
    }
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("books", &self.books)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn read_book_inserts_and_overwrites() {
        let mut reader = Reader::new("Alice", "alice@example.com");
        let dune = Book::fiction("Dune", "Frank Herbert", "0001");

        reader.read_book(&dune, None);
        assert_eq!(reader.books().get(&dune.key()), Some(&None));
        assert_eq!(reader.books_read(), 1);

        reader.read_book(&dune, Some(3));
        assert_eq!(reader.books().get(&dune.key()), Some(&Some(3)));
        assert_eq!(reader.books_read(), 1);
    }

    #[test]
    fn average_divides_by_all_books_read() {
        let mut reader = Reader::new("Alice", "alice@example.com");
        let rated = Book::new("Dune", "0001");
        let unrated = Book::new("Emma", "0002");

        reader.read_book(&rated, Some(4));
        reader.read_book(&unrated, None);

        // one 4 over two books read, not over one rated book
        assert_eq!(reader.average_rating().unwrap(), 2.0);
    }

    #[test]
    fn average_with_no_books_is_an_error() {
        let reader = Reader::new("Alice", "alice@example.com");
        assert_eq!(
            reader.average_rating(),
            Err(CatalogError::NoBooksRead {
                email: String::from("alice@example.com")
            })
        );
    }

    #[test]
    fn single_unrated_book_averages_to_zero() {
        let mut reader = Reader::new("Alice", "alice@example.com");
        let dune = Book::new("Dune", "0001");

        reader.read_book(&dune, None);
        assert_eq!(reader.average_rating().unwrap(), 0.0);
    }

    #[test]
    fn equality_is_by_email() {
        let alice = Reader::new("Alice", "alice@example.com");
        let also_alice = Reader::new("Alice Mary", "alice@example.com");
        let bob = Reader::new("Bob", "bob@example.com");

        assert_eq!(alice, also_alice);
        assert!(alice != bob);
    }

    #[test]
    fn change_email_updates_and_notifies() {
        let mut reader = Reader::new("Alice", "alice@example.com");

        let (tx, rx) = mpsc::channel::<EmailChanged>();
        reader.on(EMAIL_CHANGED, move |notice: EmailChanged| {
            tx.send(notice).unwrap();
        });

        reader.change_email("alice@club.org");
        assert_eq!(reader.email(), "alice@club.org");

        let notice = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(
            notice,
            EmailChanged {
                name: String::from("Alice"),
                email: String::from("alice@club.org"),
            }
        );
    }

    #[test]
    fn display_includes_book_count() {
        let mut reader = Reader::new("Alice", "alice@example.com");
        reader.read_book(&Book::new("Dune", "0001"), Some(4));
        assert_eq!(
            reader.to_string(),
            "Reader Alice, email: alice@example.com, books read: 1"
        );
    }
}
