use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    InvalidRating { value: i32 },
    NoRatings { title: String },
    NoBooksRead { email: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::InvalidRating { value } => {
                write!(f, "rating {} is outside the accepted range (1-4)", value)
            }
            CatalogError::NoRatings { title } => {
                write!(f, "no ratings recorded for {}", title)
            }
            CatalogError::NoBooksRead { email } => {
                write!(f, "reader {} has not read any books", email)
            }
        }
    }
}

impl std::error::Error for CatalogError {}
