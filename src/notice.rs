use std::fmt;

use serde::{Deserialize, Serialize};

pub const ISBN_CHANGED: &str = "IsbnChanged";
pub const EMAIL_CHANGED: &str = "EmailChanged";
pub const RATING_REJECTED: &str = "RatingRejected";
pub const UNKNOWN_READER: &str = "UnknownReader";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IsbnChanged {
    pub title: String,
    pub isbn: String,
}

impl fmt::Display for IsbnChanged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ISBN changed to {}", self.title, self.isbn)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmailChanged {
    pub name: String,
    pub email: String,
}

impl fmt::Display for EmailChanged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'s email was changed to {}", self.name, self.email)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingRejected {
    pub title: String,
    pub value: i32,
}

impl fmt::Display for RatingRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid rating {} for {}", self.value, self.title)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnknownReader {
    pub email: String,
}

impl fmt::Display for UnknownReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no reader registered under {}", self.email)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn display_forms() {
        let isbn = IsbnChanged {
            title: String::from("Dune"),
            isbn: String::from("0002"),
        };
        assert_eq!(isbn.to_string(), "Dune ISBN changed to 0002");

        let email = EmailChanged {
            name: String::from("Alice"),
            email: String::from("alice@example.com"),
        };
        assert_eq!(
            email.to_string(),
            "Alice's email was changed to alice@example.com"
        );

        let rejected = RatingRejected {
            title: String::from("Dune"),
            value: 9,
        };
        assert_eq!(rejected.to_string(), "invalid rating 9 for Dune");

        let unknown = UnknownReader {
            email: String::from("nobody@example.com"),
        };
        assert_eq!(
            unknown.to_string(),
            "no reader registered under nobody@example.com"
        );
    }
}
