#![forbid(unsafe_code)]

//! Style model for mctext messages.
//!
//! This crate provides:
//! - [`Color`] for the fixed legacy palette (16 named colors plus reset)
//! - [`Decoration`] and [`FormatCode`] for the legacy marker-code table
//! - [`Style`] with tri-state decorations and cascading merge semantics

/// The legacy color palette.
pub mod color;
/// Legacy marker-code table.
pub mod format_code;
/// Style type and style transitions.
pub mod style;

pub use color::{Color, Rgb};
pub use format_code::{Decoration, FormatCode};
pub use style::{Cascade, CodeSeq, Style};

/// Errors from constructing style values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    /// A style field name or value outside the recognized set.
    #[error("invalid style value {value:?} for {field}")]
    InvalidStyleValue { field: String, value: String },
}

impl StyleError {
    pub(crate) fn invalid(field: &str, value: &str) -> Self {
        Self::InvalidStyleValue {
            field: field.to_owned(),
            value: value.to_owned(),
        }
    }
}
