// Schema model and the header-text grammar that produces it.
//
// Grammar, one relation per non-blank header line:
//
//     <relation> <column>:<type> [<column>:<type> ...]
//
// Type names resolve against a datatype registry.
use bstr::ByteSlice;

use crate::core::datatype::{ColumnDescriptor, Registry};
use crate::core::error::{Error, ErrorKind};

#[derive(Clone, Debug)]
pub struct Column {
    pub name: String,
    pub type_name: String,
    pub descriptor: ColumnDescriptor,
}

#[derive(Clone, Debug)]
pub struct RelationDef {
    pub name: String,
    pub columns: Vec<Column>,
}

/// Ordered set of declared relations. Declaration order is preserved and
/// drives the ordering of the decoded database.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    relations: Vec<RelationDef>,
}

impl Schema {
    pub fn relations(&self) -> &[RelationDef] {
        &self.relations
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Position of a relation by name, given as raw atom bytes.
    pub fn index_of(&self, name: &[u8]) -> Option<usize> {
        self.relations
            .iter()
            .position(|relation| relation.name.as_bytes() == name)
    }

    pub fn columns_of(&self, name: &[u8]) -> Option<&[Column]> {
        self.index_of(name)
            .map(|index| self.relations[index].columns.as_slice())
    }
}

fn schema_error(message: impl Into<String>, line: &[u8]) -> Error {
    Error::new(ErrorKind::Schema)
        .with_message(message)
        .with_line(line)
}

/// Parses header bytes into a [`Schema`], resolving column types against
/// `registry` (the builtin registry when `None`). An empty header yields
/// an empty schema.
pub fn parse_schema(header: &[u8], registry: Option<&Registry>) -> Result<Schema, Error> {
    let builtin;
    let registry = match registry {
        Some(registry) => registry,
        None => {
            builtin = Registry::builtin();
            &builtin
        }
    };

    let mut relations: Vec<RelationDef> = Vec::new();
    for line in header.split(|&b| b == b'\n') {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let text = match std::str::from_utf8(line) {
            Ok(text) => text,
            Err(err) => {
                return Err(schema_error("header line is not valid UTF-8", line).with_source(err));
            }
        };

        let mut fields = text.split_ascii_whitespace();
        let name = match fields.next() {
            Some(name) => name,
            None => continue,
        };
        if relations.iter().any(|relation| relation.name == name) {
            return Err(schema_error(
                format!("relation \"{name}\" declared twice"),
                line,
            ));
        }

        let mut columns = Vec::new();
        for field in fields {
            let (column, type_name) = match field.split_once(':') {
                Some(parts) => parts,
                None => {
                    return Err(schema_error(
                        format!("column \"{field}\" is missing a :type annotation"),
                        line,
                    ));
                }
            };
            if column.is_empty() || type_name.is_empty() {
                return Err(schema_error(
                    format!("column \"{field}\" has an empty name or type"),
                    line,
                ));
            }
            let descriptor = match registry.lookup(type_name) {
                Some(descriptor) => *descriptor,
                None => {
                    return Err(schema_error(
                        format!("unknown datatype \"{type_name}\" for column \"{column}\""),
                        line,
                    ));
                }
            };
            columns.push(Column {
                name: column.to_owned(),
                type_name: type_name.to_owned(),
                descriptor,
            });
        }
        relations.push(RelationDef {
            name: name.to_owned(),
            columns,
        });
    }

    Ok(Schema { relations })
}
