// Core modules implementing lexing, decoding, schema, and error modeling.
pub mod datatype;
pub mod decode;
pub mod display;
pub mod error;
pub mod header;
pub mod lex;
pub mod lookahead;
pub mod row;
pub mod schema;
pub mod source;
