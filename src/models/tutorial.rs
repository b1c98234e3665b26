//! Tutorial Models
//!
//! The persisted record and the create/update payload.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use std::borrow::Cow;

use validator::{Validate, ValidationError};

use crate::constants::tutorial::MAX_TITLE_LENGTH;
use crate::error::ApiError;

/// `validator` length bounds are `u64`
const MAX_TITLE_LENGTH_U64: u64 = MAX_TITLE_LENGTH as u64;

/// PostgreSQL text columns cannot store U+0000
fn reject_nul(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::new("nul_character")
            .with_message(Cow::Borrowed("Text must not contain NUL characters")));
    }
    Ok(())
}

/// A persisted tutorial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tutorial {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "first tutorial title")]
    pub title: String,
    #[schema(example = "dummy data")]
    pub description: Option<String>,
    pub published: bool,
}

/// Create/update payload.
///
/// Unknown fields such as a client-supplied `id` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct TutorialRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(
        required(message = "Title is required"),
        length(max = MAX_TITLE_LENGTH_U64, message = "Title is too long"),
        custom(function = "reject_nul")
    )]
    #[schema(example = "new tutorial created")]
    pub title: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "reject_nul"))]
    #[schema(example = "dummy data")]
    pub description: Option<String>,

    #[serde(default)]
    pub published: Option<bool>,
}

/// A validated payload, ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialDraft {
    pub title: String,
    pub description: Option<String>,
    pub published: bool,
}

impl TutorialRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>, published: bool) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            published: Some(published),
        }
    }

    /// Validate the payload and turn it into a storable draft
    pub fn into_draft(self) -> Result<TutorialDraft, ApiError> {
        self.validate()?;

        let title = self
            .title
            .ok_or_else(|| ApiError::validation_field("title", "Title is required"))?;

        Ok(TutorialDraft {
            title,
            description: self.description,
            published: self.published.unwrap_or(false),
        })
    }
}

impl TutorialDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>, published: bool) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            published,
        }
    }

    /// Attach a store-assigned id
    pub fn into_tutorial(self, id: i64) -> Tutorial {
        Tutorial {
            id,
            title: self.title,
            description: self.description,
            published: self.published,
        }
    }
}

/// Empty and whitespace-only strings count as missing.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
