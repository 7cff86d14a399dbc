//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains the post entity, its validation rules and the
//! operations over it, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::PostService;
