//! Error type shared by every fallible list operation.

use std::fmt;

/// Misuse of a [`List`](crate::List) or one of its positions.
///
/// Both variants describe a programming error on the caller's side. They are
/// reported before the list is touched, so a failed call never leaves the
/// list partially modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The position does not belong to this list, denotes a removed node,
    /// or denotes the end where an element is required.
    InvalidIterator,
    /// The list has no elements.
    EmptyContainer,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidIterator => write!(f, "invalid iterator"),
            Error::EmptyContainer => write!(f, "container is empty"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn error_display() {
        assert_eq!(Error::InvalidIterator.to_string(), "invalid iterator");
        assert_eq!(Error::EmptyContainer.to_string(), "container is empty");
    }
}
