//! markup-highlight - incremental markup highlighting for rich-text editors
//!
//! The engine keeps a host buffer highlighted as it is edited. Rule tables
//! cover Markdown, AsciiDoc, reStructuredText and plain text. Edits are
//! debounced and rescanned over a window of lines; block constructs are
//! tracked by content hash so unchanged blocks are not reformatted.

pub mod annotate;
pub mod buffer;
pub mod config;
pub mod dirty;
pub mod error;
pub mod markup;
pub mod render;
pub mod section;
pub mod syntax;

pub use buffer::{HostBuffer, MemoryBuffer, SelectionRange};
pub use config::Config;
pub use error::{MarkupError, Result};
pub use markup::{Markup, MarkupBuilder};
pub use section::Section;
pub use syntax::{MarkupMode, MarkupStyle};
