use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use event_emitter_rs::EventEmitter;
use serde::Deserialize;

use crate::error::CatalogError;
use crate::notice::{IsbnChanged, RatingRejected, ISBN_CHANGED, RATING_REJECTED};

/// Map key for a book, captured at association time. Keys are plain values,
/// so entries keyed by one can never be re-keyed by later mutation of the
/// book they were taken from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BookKey {
    pub title: String,
    pub isbn: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BookKind {
    Plain,
    Fiction { author: String },
    NonFiction { subject: String, level: String },
}

struct BookState {
    title: String,
    isbn: String,
    kind: BookKind,
    ratings: Vec<i32>,
}

/// Shared handle to one book. Clones point at the same state, so every
/// reader and the catalog observe the same rating list.
pub struct Book {
    state: Arc<RwLock<BookState>>,
    emitter: Arc<Mutex<EventEmitter>>,
}

impl Book {
    pub fn new(title: impl Into<String>, isbn: impl Into<String>) -> Self {
        Book::with_kind(title, isbn, BookKind::Plain)
    }

    pub fn fiction(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Book::with_kind(
            title,
            isbn,
            BookKind::Fiction {
                author: author.into(),
            },
        )
    }

    pub fn non_fiction(
        title: impl Into<String>,
        subject: impl Into<String>,
        level: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Book::with_kind(
            title,
            isbn,
            BookKind::NonFiction {
                subject: subject.into(),
                level: level.into(),
            },
        )
    }

    fn with_kind(title: impl Into<String>, isbn: impl Into<String>, kind: BookKind) -> Self {
        Book {
            state: Arc::new(RwLock::new(BookState {
                title: title.into(),
                isbn: isbn.into(),
                kind,
                ratings: Vec::new(),
            })),
            emitter: Arc::new(Mutex::new(EventEmitter::new())),
        }
    }

    // The state behind a poisoned lock is plain data and still usable.
    fn read(&self) -> RwLockReadGuard<'_, BookState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BookState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn emitter(&self) -> MutexGuard<'_, EventEmitter> {
        self.emitter.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn title(&self) -> String {
        self.read().title.clone()
    }

    pub fn isbn(&self) -> String {
        self.read().isbn.clone()
    }

    pub fn kind(&self) -> BookKind {
        self.read().kind.clone()
    }

    pub fn author(&self) -> Option<String> {
        match &self.read().kind {
            BookKind::Fiction { author } => Some(author.clone()),
            _ => None,
        }
    }

    pub fn subject(&self) -> Option<String> {
        match &self.read().kind {
            BookKind::NonFiction { subject, .. } => Some(subject.clone()),
            _ => None,
        }
    }

    pub fn level(&self) -> Option<String> {
        match &self.read().kind {
            BookKind::NonFiction { level, .. } => Some(level.clone()),
            _ => None,
        }
    }

    pub fn key(&self) -> BookKey {
        let state = self.read();
        BookKey {
            title: state.title.clone(),
            isbn: state.isbn.clone(),
        }
    }

    pub fn set_isbn(&self, new_isbn: impl Into<String>) {
        let notice = {
            let mut state = self.write();
            state.isbn = new_isbn.into();
            IsbnChanged {
                title: state.title.clone(),
                isbn: state.isbn.clone(),
            }
        };
        println!("{}", notice);
        self.emitter().emit(ISBN_CHANGED, notice);
    }

    /// Accepts values strictly between 0 and 5. Anything else is reported
    /// and dropped; the returned error is advisory and safe to ignore.
    pub fn add_rating(&self, rating: i32) -> Result<(), CatalogError> {
        if rating > 0 && rating < 5 {
            self.write().ratings.push(rating);
            return Ok(());
        }
        let notice = RatingRejected {
            title: self.title(),
            value: rating,
        };
        eprintln!("{}", notice);
        self.emitter().emit(RATING_REJECTED, notice);
        Err(CatalogError::InvalidRating { value: rating })
    }

    pub fn ratings(&self) -> Vec<i32> {
        self.read().ratings.clone()
    }

    pub fn average_rating(&self) -> Result<f64, CatalogError> {
        let state = self.read();
        if state.ratings.is_empty() {
            return Err(CatalogError::NoRatings {
                title: state.title.clone(),
            });
        }
        let total: i32 = state.ratings.iter().sum();
        Ok(f64::from(total) / state.ratings.len() as f64)
    }

    pub fn on<F, T>(&self, event: &str, listener: F)
    where
        for<'de> T: Deserialize<'de>,
        F: Fn(T) + Send + Sync + 'static,
    {
        self.emitter().on(event, listener);
    }
}

impl Clone for Book {
    fn clone(&self) -> Self {
        Book {
            state: Arc::clone(&self.state),
            emitter: Arc::clone(&self.emitter),
        }
    }
}

// Two books are the same book when title and ISBN match; variant fields and
// rating history are excluded.
impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Book {}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        match &state.kind {
            BookKind::Plain => write!(f, "{}", state.title),
            BookKind::Fiction { author } => write!(f, "{} by {}", state.title, author),
            BookKind::NonFiction { subject, level } => {
                write!(f, "{}, a {} manual on {}", state.title, level, subject)
            }
        }
    }
}

impl fmt::Debug for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("Book")
            .field("title", &state.title)
            .field("isbn", &state.isbn)
            .field("kind", &state.kind)
            .field("ratings", &state.ratings)
            .finish()
    }
}
