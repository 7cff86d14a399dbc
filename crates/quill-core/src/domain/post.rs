use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Minimum title length, counted in characters after trimming.
pub const TITLE_MIN_CHARS: usize = 3;

/// Post entity - represents a blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with generated ID and timestamps.
    pub fn new(draft: PostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and content, refreshing `updated_at`.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.content = draft.content;
        self.updated_at = Utc::now();
    }
}

/// Unvalidated title/content as received from a client.
#[derive(Debug, Clone, Default)]
pub struct PostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }
}

/// Title and content that passed validation.
///
/// Only [`PostDraft::parse`] builds one, so holding a draft means the
/// field constraints hold. The title is stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    content: String,
}

impl PostDraft {
    /// Validate client input, collecting every violated field.
    pub fn parse(input: PostInput) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = input.title.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() {
            errors.push("title", "Title is required");
        } else if title.chars().count() < TITLE_MIN_CHARS {
            errors.push(
                "title",
                format!("Title must be at least {TITLE_MIN_CHARS} characters long"),
            );
        }

        let content = input.content.unwrap_or_default();
        if content.is_empty() {
            errors.push("content", "Content is required");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            title: title.to_string(),
            content,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_parts(self) -> (String, String) {
        (self.title, self.content)
    }
}

/// A single field constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// All violations found while validating one input, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join(", "))
    }
}
