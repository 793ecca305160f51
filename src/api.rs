//! Purpose: Define the public API boundary for the wsldb decoder.
//! Exports: Decode entry points, schema and datatype types, errors.
//! Role: The one public path callers and the CLI go through.
//! Invariants: Additive-only; internal module layout may change freely.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::datatype::{ColumnDescriptor, DecodeFn, Registry, SyntaxKind, Value};
pub use crate::core::decode::{decode_db, decode_file, Database};
pub use crate::core::display::{decode_all_for_display, decode_for_display};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::header::split_header;
pub use crate::core::lex::{lex_atom, lex_space, lex_string};
pub use crate::core::lookahead::Lookahead;
pub use crate::core::row::{decode_row, decode_values, Row};
pub use crate::core::schema::{parse_schema, Column, RelationDef, Schema};
pub use crate::core::source::{mem_lines, FileSource};
