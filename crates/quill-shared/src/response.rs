//! Response bodies for the post resource API.

use serde::{Deserialize, Serialize};

use crate::dto::PostDto;

/// `GET /posts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsEnvelope {
    pub posts: Vec<PostDto>,
}

/// `GET /posts/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEnvelope {
    pub post: PostDto,
}

/// Confirmation for a write, carrying the affected post when there is one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostDto>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            post: None,
        }
    }

    pub fn with_post(message: impl Into<String>, post: PostDto) -> Self {
        Self {
            message: message.into(),
            post: Some(post),
        }
    }
}

/// Error body. Every failure carries a human-readable `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,

    /// Per-field messages, present only for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,

    /// Underlying cause, for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
            error: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn not_found() -> Self {
        Self::new("Post not found")
    }

    pub fn validation(errors: Vec<String>) -> Self {
        Self::new("Validation Error").with_errors(errors)
    }
}
