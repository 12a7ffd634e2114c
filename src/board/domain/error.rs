//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing validated task field values.
///
/// Each variant maps to exactly one input field so callers can build a
/// per-field message map for form display.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The title is empty after trimming.
    #[error("The title is required.")]
    EmptyTitle,

    /// The title exceeds the persisted column width.
    #[error("The title cannot be longer than 255 characters.")]
    TitleTooLong {
        /// Character count of the rejected title.
        actual: usize,
    },

    /// The description exceeds the allowed length.
    #[error("The description cannot be longer than 1000 characters.")]
    DescriptionTooLong {
        /// Character count of the rejected description.
        actual: usize,
    },
}

impl TaskValidationError {
    /// Returns the input field this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::DescriptionTooLong { .. } => "description",
        }
    }
}

/// Aggregated field validation failures for one mutation attempt.
///
/// Validation collects every failing field before returning, so a single
/// attempt reports all problems at once rather than failing fast.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("task validation failed: {}", format_messages(.errors))]
pub struct TaskValidationFailure {
    /// The individual field failures, in field order.
    pub errors: Vec<TaskValidationError>,
}

impl TaskValidationFailure {
    /// Wraps a non-empty list of field failures.
    #[must_use]
    pub const fn new(errors: Vec<TaskValidationError>) -> Self {
        Self { errors }
    }

    /// Returns a field-to-message mapping for form display.
    #[must_use]
    pub fn field_messages(&self) -> Vec<(&'static str, String)> {
        self.errors
            .iter()
            .map(|error| (error.field(), error.to_string()))
            .collect()
    }
}

fn format_messages(errors: &[TaskValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Error returned while parsing lane names from the boundary or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("The lane must be: pending, in progress or completed.")]
pub struct ParseLaneError(pub String);

/// Error returned while parsing change actions from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown change action: {0}")]
pub struct ParseActionError(pub String);
