//! Data models for the annotation engine
//!
//! This module contains the plain data types shared by every layer:
//! annotations as produced by the upstream classifier, their review state,
//! and the error taxonomy.

pub mod annotation;
pub mod errors;

pub use annotation::{Annotation, AnnotationId, AnnotationKind, Payload, ReviewState};
pub use errors::AnnotationError;
