// Column datatypes: lexical syntax kinds, decoded values, and the
// registry mapping declared type names to column descriptors.
use serde::ser::{Serialize, Serializer};

use crate::core::display;
use crate::core::error::{Error, ErrorKind};

/// Which lexer a column's raw token goes through.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SyntaxKind {
    Atom,
    String,
}

/// A decoded column value.
///
/// `Bytes` carries the raw decoded content of a string literal, which is
/// not necessarily valid text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Atom(String),
    Bytes(Vec<u8>),
    Int(i64),
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Atom(text) => serializer.serialize_str(text),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Bytes(bytes) => serializer.serialize_str(&display::render_lossy(bytes)),
        }
    }
}

pub type DecodeFn = fn(&[u8]) -> Result<Value, Error>;

/// Syntax kind plus decode capability for one column. The decode function
/// is invoked on the raw token bytes regardless of syntax kind.
#[derive(Clone, Copy, Debug)]
pub struct ColumnDescriptor {
    syntax: SyntaxKind,
    decode: DecodeFn,
}

impl ColumnDescriptor {
    pub fn new(syntax: SyntaxKind, decode: DecodeFn) -> Self {
        Self { syntax, decode }
    }

    pub fn syntax(&self) -> SyntaxKind {
        self.syntax
    }

    pub fn decode(&self, raw: &[u8]) -> Result<Value, Error> {
        (self.decode)(raw)
    }
}

/// Registry of declared type names. The builtin set covers `atom`, `id`,
/// `string`, and `int`; callers may register further types or start from
/// an empty registry.
#[derive(Clone, Debug)]
pub struct Registry {
    types: Vec<(String, ColumnDescriptor)>,
}

impl Registry {
    pub fn empty() -> Self {
        Self { types: Vec::new() }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("atom", ColumnDescriptor::new(SyntaxKind::Atom, decode_atom));
        registry.register("id", ColumnDescriptor::new(SyntaxKind::Atom, decode_atom));
        registry.register(
            "string",
            ColumnDescriptor::new(SyntaxKind::String, decode_bytes),
        );
        registry.register("int", ColumnDescriptor::new(SyntaxKind::Atom, decode_int));
        registry
    }

    /// Adds or replaces a type binding.
    pub fn register(&mut self, name: impl Into<String>, descriptor: ColumnDescriptor) {
        let name = name.into();
        if let Some(slot) = self.types.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = descriptor;
            return;
        }
        self.types.push((name, descriptor));
    }

    pub fn lookup(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.types
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, descriptor)| descriptor)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn decode_atom(raw: &[u8]) -> Result<Value, Error> {
    // Lexed atoms are printable ASCII, but a custom caller may feed
    // arbitrary bytes through the descriptor directly.
    let text = display::decode_for_display(raw)?;
    Ok(Value::Atom(text))
}

fn decode_bytes(raw: &[u8]) -> Result<Value, Error> {
    Ok(Value::Bytes(raw.to_vec()))
}

fn decode_int(raw: &[u8]) -> Result<Value, Error> {
    let text = std::str::from_utf8(raw).ok();
    let parsed = text.and_then(|t| t.parse::<i64>().ok());
    match parsed {
        Some(n) => Ok(Value::Int(n)),
        None => Err(Error::new(ErrorKind::Decode).with_message(format!(
            "not a valid integer: \"{}\"",
            display::render_lossy(raw)
        ))),
    }
}
