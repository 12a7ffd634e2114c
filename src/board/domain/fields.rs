//! Validated text fields for board tasks.

use super::TaskValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated task title: trimmed, 1 to 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Largest title representable in the persisted column.
    pub const MAX_CHARS: usize = 255;

    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::EmptyTitle`] when the value is blank
    /// after trimming, or [`TaskValidationError::TitleTooLong`] when the
    /// trimmed value exceeds [`Self::MAX_CHARS`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        let actual = trimmed.chars().count();
        if actual > Self::MAX_CHARS {
            return Err(TaskValidationError::TitleTooLong { actual });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated task description: present and at most 1000 characters.
///
/// An absent description is modelled as `Option<TaskDescription>` being
/// `None`, never as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Largest description the board accepts.
    pub const MAX_CHARS: usize = 1000;

    /// Creates a validated, non-blank description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::DescriptionTooLong`] when the trimmed
    /// value exceeds [`Self::MAX_CHARS`] characters. Blank input is an
    /// error of usage here; use [`Self::from_input`] at the boundary to
    /// normalize blanks to absence.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let actual = trimmed.chars().count();
        if actual > Self::MAX_CHARS {
            return Err(TaskValidationError::DescriptionTooLong { actual });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Normalizes optional caller input: blank or missing becomes `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::DescriptionTooLong`] when a present
    /// value exceeds [`Self::MAX_CHARS`] characters.
    pub fn from_input(
        input: Option<impl Into<String>>,
    ) -> Result<Option<Self>, TaskValidationError> {
        let Some(value) = input else {
            return Ok(None);
        };
        let raw = value.into();
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Self::new(raw).map(Some)
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
