//! Input parsing and the in-memory table model.

mod parser;
mod source;
mod value;

pub use parser::{is_null_token, parse_datetime, Parser, ParserConfig};
pub use source::{Column, DataTable, SourceMetadata};
pub use value::{DataType, Value, ValueKey, ISO_FORMAT};
