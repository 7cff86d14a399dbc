//! Domain entities - the core business objects.

mod post;

pub use post::{FieldViolation, Post, PostDraft, PostInput, TITLE_MIN_CHARS, ValidationErrors};
