#![forbid(unsafe_code)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

//! # keel-style
//!
//! Style objects for keel components.
//!
//! - [`Style`] - attributes, colors, padding, width, border
//! - [`Color`] / [`ColorProfile`] - what reaches the terminal
//! - [`Border`] - box-drawing presets
//! - [`Theme`] - the palette components derive their styles from
//! - [`text`] - width-aware truncation and padding

pub mod border;
pub mod color;
pub mod style;
pub mod text;
pub mod theme;

pub use border::{Border, BorderKind};
pub use color::{Color, ColorParseError, ColorProfile, default_profile, set_default_profile};
pub use style::{Attrs, Style};
pub use text::{fit, pad_left, pad_right, strip_ansi, truncate, visible_width};
pub use theme::Theme;
