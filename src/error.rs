use thiserror::Error;

use crate::event::EventKind;
use itertools::Itertools;

pub type Result<T> = std::result::Result<T, DispatchError>;

/// Everything that can go wrong when a value is matched against a variant set at runtime.
///
/// With statically typed `Event`s none of these can happen: an incomplete `match` is rejected by
/// the compiler. They only show up at the edges, where untyped records come in or where handlers
/// are registered dynamically.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A record carried a discriminant outside the known set.
    #[error("unhandled variant: no variant with kind `{kind}`")]
    UnhandledVariant { kind: String },

    #[error("record has no `{field}` discriminant")]
    MissingDiscriminant { field: &'static str },

    #[error("malformed `{kind}` record: {source}")]
    Malformed {
        kind: EventKind,
        #[source]
        source: serde_json::Error,
    },

    /// A dynamically built handler table doesn't cover every kind.
    #[error("handlers missing for kinds: {}", .missing.iter().join(", "))]
    Incomplete { missing: Vec<String> },

    #[error("record {index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<DispatchError>,
    },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl DispatchError {
    pub fn unhandled<S: Into<String>>(kind: S) -> DispatchError {
        DispatchError::UnhandledVariant { kind: kind.into() }
    }

    pub fn is_unhandled_variant(&self) -> bool {
        match self {
            DispatchError::UnhandledVariant { .. } => true,
            DispatchError::AtIndex { source, .. } => source.is_unhandled_variant(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unhandled_names_the_kind() {
        let err = DispatchError::unhandled("Hackathon");
        assert_eq!(
            err.to_string(),
            "unhandled variant: no variant with kind `Hackathon`"
        );
        assert!(err.is_unhandled_variant());
    }

    #[test]
    fn incomplete_lists_missing_kinds() {
        let err = DispatchError::Incomplete {
            missing: vec!["Meetup".to_string(), "Webinar".to_string()],
        };
        assert_eq!(err.to_string(), "handlers missing for kinds: Meetup, Webinar");
        assert!(!err.is_unhandled_variant());
    }

    #[test]
    fn at_index_sees_through_to_cause() {
        let err = DispatchError::AtIndex {
            index: 2,
            source: Box::new(DispatchError::unhandled("Party")),
        };
        assert!(err.is_unhandled_variant());
        assert!(err.to_string().starts_with("record 2: "));
    }
}
