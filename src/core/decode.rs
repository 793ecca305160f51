// Whole-database orchestration: header, schema, then row accumulation.
use std::path::Path;

use bstr::ByteSlice;

use crate::core::datatype::Registry;
use crate::core::error::Error;
use crate::core::header::split_header;
use crate::core::lookahead::Lookahead;
use crate::core::row::{decode_row, Row};
use crate::core::schema::{parse_schema, Schema};
use crate::core::source::FileSource;

/// One-shot, read-only snapshot of a decoded database: the schema plus
/// every row, grouped by relation in file order.
///
/// Every declared relation is present, with an empty row list when the
/// file held no rows for it; undeclared relations cannot appear.
#[derive(Clone, Debug)]
pub struct Database {
    schema: Schema,
    rows: Vec<Vec<Row>>,
}

impl Database {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Rows of one relation, or `None` if the relation is not declared.
    pub fn rows(&self, relation: &str) -> Option<&[Row]> {
        self.schema
            .index_of(relation.as_bytes())
            .map(|index| self.rows[index].as_slice())
    }

    /// Iterates relations in schema order with their rows.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Row])> {
        self.schema
            .relations()
            .iter()
            .zip(&self.rows)
            .map(|(relation, rows)| (relation.name.as_str(), rows.as_slice()))
    }

    pub fn row_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Decodes a whole database from a line source.
///
/// When `header` is `None` the schema is read inline from the leading
/// `%`-prefixed lines; otherwise the given bytes are used and every line
/// of the source is data. Decoding is all-or-nothing: the first failure
/// aborts the call and no partial database is returned.
pub fn decode_db<I>(
    lines: I,
    header: Option<&[u8]>,
    registry: Option<&Registry>,
) -> Result<Database, Error>
where
    I: IntoIterator<Item = Result<Vec<u8>, Error>>,
{
    let mut lines = Lookahead::new(lines.into_iter());

    let inline_header;
    let header = match header {
        Some(header) => header,
        None => {
            inline_header = split_header(&mut lines)?;
            &inline_header
        }
    };
    let schema = parse_schema(header, registry)?;
    tracing::debug!(relations = schema.len(), "schema parsed");

    let mut rows: Vec<Vec<Row>> = vec![Vec::new(); schema.len()];
    for line in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (index, row) = decode_row(line, &schema)?;
        rows[index].push(row);
    }
    let database = Database { schema, rows };
    tracing::debug!(rows = database.row_count(), "database decoded");
    Ok(database)
}

/// Opens `path` in binary mode and decodes it as a WSL database. The file
/// handle is released on every exit path.
pub fn decode_file(
    path: impl AsRef<Path>,
    header: Option<&[u8]>,
    registry: Option<&Registry>,
) -> Result<Database, Error> {
    let source = FileSource::open(path)?;
    decode_db(source, header, registry)
}
