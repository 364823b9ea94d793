use std::collections::HashMap;
use std::fmt;

use event_emitter_rs::EventEmitter;
use serde::Deserialize;

use crate::book::{Book, BookKey};
use crate::error::CatalogError;
use crate::notice::{UnknownReader, UNKNOWN_READER};
use crate::reader::Reader;

/// One shelved book with the number of times any reader recorded it.
#[derive(Debug)]
pub struct ShelfEntry {
    book: Book,
    read_count: u64,
}

impl ShelfEntry {
    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn read_count(&self) -> u64 {
        self.read_count
    }
}

/// Registry of every reader and every book at least one reader has read.
/// All state lives here; callers construct a catalog explicitly and drive it
/// sequentially.
pub struct Catalog {
    readers: HashMap<String, Reader>,
    shelf: HashMap<BookKey, ShelfEntry>,
    emitter: EventEmitter,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            readers: HashMap::new(),
            shelf: HashMap::new(),
            emitter: EventEmitter::new(),
        }
    }

    pub fn create_book(&self, title: impl Into<String>, isbn: impl Into<String>) -> Book {
        Book::new(title, isbn)
    }

    pub fn create_novel(
        &self,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Book {
        Book::fiction(title, author, isbn)
    }

    pub fn create_non_fiction(
        &self,
        title: impl Into<String>,
        subject: impl Into<String>,
        level: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Book {
        Book::non_fiction(title, subject, level, isbn)
    }

    /// Registers a reader under the email, silently replacing any reader
    /// already registered there. Initial books are recorded unrated.
    pub fn add_user(&mut self, name: &str, email: &str, user_books: Option<Vec<Book>>) {
        self.readers
            .insert(email.to_string(), Reader::new(name, email));
        if let Some(books) = user_books {
            for book in books {
                self.add_book_to_user(&book, email, None);
            }
        }
    }

    /// Records the book on the reader registered under `email`. An unknown
    /// email is reported and the whole operation no-ops.
    pub fn add_book_to_user(&mut self, book: &Book, email: &str, rating: Option<i32>) {
        let reader = match self.readers.get_mut(email) {
            Some(reader) => reader,
            None => {
                let notice = UnknownReader {
                    email: email.to_string(),
                };
                eprintln!("{}", notice);
                self.emitter.emit(UNKNOWN_READER, notice);
                return;
            }
        };
        reader.read_book(book, rating);
        if let Some(value) = rating {
            // out-of-range values are reported by the book and dropped
            let _ = book.add_rating(value);
        }
        self.shelf
            .entry(book.key())
            .and_modify(|entry| entry.read_count += 1)
            .or_insert_with(|| ShelfEntry {
                book: book.clone(),
                read_count: 1,
            });
    }

    pub fn print_catalog(&self) {
        for entry in self.shelf.values() {
            println!("{}", entry.book);
        }
    }

    pub fn print_users(&self) {
        for email in self.readers.keys() {
            println!("{}", email);
        }
    }

    /// Book with the strictly highest read-count, or `None` for an empty
    /// catalog. Ties keep the entry seen first.
    pub fn most_read_book(&self) -> Option<Book> {
        let mut most_read = 0;
        let mut found = None;
        for entry in self.shelf.values() {
            if entry.read_count > most_read {
                most_read = entry.read_count;
                found = Some(entry.book.clone());
            }
        }
        found
    }

    /// Book with the strictly highest average rating, or `None` for an
    /// empty catalog. A shelved book with no ratings has no average, and
    /// the whole query fails with `NoRatings`.
    pub fn highest_rated_book(&self) -> Result<Option<Book>, CatalogError> {
        let mut highest = 0.0;
        let mut found = None;
        for entry in self.shelf.values() {
            let average = entry.book.average_rating()?;
            if average > highest {
                highest = average;
                found = Some(entry.book.clone());
            }
        }
        Ok(found)
    }

    /// Name of the reader with the strictly highest average rating, or
    /// `None` when no reader beats the zero threshold. A registered reader
    /// with no books read fails the whole query with `NoBooksRead`.
    pub fn most_positive_user(&self) -> Result<Option<String>, CatalogError> {
        let mut highest = 0.0;
        let mut found = None;
        for reader in self.readers.values() {
            let average = reader.average_rating()?;
            if average > highest {
                highest = average;
                found = Some(reader.name().to_string());
            }
        }
        Ok(found)
    }

    pub fn reader(&self, email: &str) -> Option<&Reader> {
        self.readers.get(email)
    }

    pub fn reader_mut(&mut self, email: &str) -> Option<&mut Reader> {
        self.readers.get_mut(email)
    }

    pub fn readers(&self) -> impl Iterator<Item = &Reader> {
        self.readers.values()
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.shelf.values().map(ShelfEntry::book)
    }

    pub fn shelf(&self) -> impl Iterator<Item = &ShelfEntry> {
        self.shelf.values()
    }

    /// Read-count for the book under its current key, if shelved there.
    pub fn read_count(&self, book: &Book) -> Option<u64> {
        self.shelf.get(&book.key()).map(ShelfEntry::read_count)
    }

    pub fn on<F, T>(&mut self, event: &str, listener: F)
    where
        for<'de> T: Deserialize<'de>,
        F: Fn(T) + Send + Sync + 'static,
    {
        self.emitter.on(event, listener);
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("readers", &self.readers)
            .field("shelf", &self.shelf)
            .finish()
    }
}
