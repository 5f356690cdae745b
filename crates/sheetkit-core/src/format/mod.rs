//! Display text for numbers, dates and text
//!
//! - [`render_general`] reproduces the `General` format
//! - [`render_with_pattern`] applies a number-format pattern of up to four
//!   sections (positive;negative;zero;text)
//! - [`format_notation`] converts between plain and scientific number text
//! - [`BuiltinFormats`] maps built-in format ids to patterns
//!
//! None of the renderers fail. Input a pattern cannot express comes back as
//! its own text; use [`validate_pattern`] to reject malformed patterns up
//! front.

mod builtin;
mod date;
mod decimal;
mod general;
mod literal;
mod notation;
mod number;
mod pattern;

pub use builtin::{BuiltinFormats, FIRST_CUSTOM_FORMAT_ID};
pub use general::render_general;
pub use notation::{format_notation, Notation};
pub use pattern::{
    render_with_options, render_with_pattern, validate_pattern, FormatValue, RenderOptions,
    MAX_SECTIONS,
};
