//! Grammar rules, split by production family.
//!
//! Each module adds methods to [`Parser`](super::parser::Parser):
//! - `items` - source units, contracts and every declaration form
//! - `types` - type names, parameters and identifier paths
//! - `statements` - blocks and statements, including declaration detection
//! - `expressions` - precedence-climbing expression parser

mod expressions;
mod items;
mod statements;
mod types;

pub use types::is_elementary_type_name;
