mod book;
mod catalog;
mod error;
mod notice;
mod reader;

pub use book::{Book, BookKey, BookKind};
pub use catalog::{Catalog, ShelfEntry};
pub use error::CatalogError;
pub use notice::{
    EmailChanged, IsbnChanged, RatingRejected, UnknownReader, EMAIL_CHANGED, ISBN_CHANGED,
    RATING_REJECTED, UNKNOWN_READER,
};
pub use reader::Reader;

// Re-export the EventEmitter from the event_emitter_rs crate
pub use event_emitter_rs::EventEmitter;
