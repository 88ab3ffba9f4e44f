//! Core types for the conversion pipeline: builder, generator, and error handling.

pub mod builder;
pub mod error;

pub use builder::{ReportBuilder, ReportGenerator};
pub use error::{Error, Result};
