//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use texref_core::prelude::*;
//! ```

pub use crate::builder::{AnalysisResult, Texref};
pub use crate::document::Document;
pub use crate::error::{TexrefError, TexrefResult};
pub use crate::labels::{Label, LabelGraph, LabelId, Reference};
pub use crate::report::{print_json, print_plain, ColorChoice, PlainStyle, Style};
pub use crate::span::TextSpan;

#[cfg(feature = "inputs")]
pub use crate::inputs::{expand_inputs, InputFile};
