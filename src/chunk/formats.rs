//! Output formats for chunk trees
//!
//! - bracket: the single-line `(S (NP The/DT rose/NN))` form
//! - treeviz: one node per line with box-drawing connectors
//! - json / yaml: the serde data model of [`Tree`](crate::chunk::ast::Tree)
//!
//! Every format implements [`Formatter`] and is looked up by name through a
//! [`FormatRegistry`].

pub mod bracket;
pub mod data;
pub mod registry;
pub mod treeviz;

pub use bracket::BracketFormatter;
pub use data::{JsonFormatter, YamlFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
