// Decoding of one data line: relation resolution, per-column tokenizing,
// and value assembly.
use crate::core::datatype::{SyntaxKind, Value};
use crate::core::display;
use crate::core::error::{Error, ErrorKind};
use crate::core::lex;
use crate::core::schema::{Column, Schema};

/// One decoded tuple of values.
pub type Row = Vec<Value>;

/// Decodes the value portion of a line, starting just past the relation
/// atom, against the ordered column list.
///
/// Each column consumes exactly one leading space, then one token of the
/// column's syntax kind, then runs the column's decoder on the raw token
/// bytes. The line must end exactly at the last value.
pub fn decode_values(line: &[u8], at: usize, columns: &[Column]) -> Result<Row, Error> {
    let mut values = Vec::with_capacity(columns.len());
    let mut at = at;
    for column in columns {
        at = lex::lex_space(line, at)?;
        let token_start = at;
        let value = match column.descriptor.syntax() {
            SyntaxKind::Atom => {
                let (raw, next) = lex::lex_atom(line, at)?;
                at = next;
                column.descriptor.decode(raw)
            }
            SyntaxKind::String => {
                let (raw, next) = lex::lex_string(line, at)?;
                at = next;
                column.descriptor.decode(&raw)
            }
        };
        // External decoders report in their own terms; pin the failure to
        // this line and token before it surfaces.
        let value = value.map_err(|err| err.with_line(line).with_offset(token_start))?;
        values.push(value);
    }
    if at != line.len() {
        return Err(Error::new(ErrorKind::TrailingData)
            .with_message("expected end of line after last value")
            .with_line(line)
            .with_offset(at));
    }
    Ok(values)
}

/// Decodes a full data line: the leading atom names the relation, the
/// rest are its values. Returns the relation's schema index and the row.
pub fn decode_row(line: &[u8], schema: &Schema) -> Result<(usize, Row), Error> {
    let (relation, at) = lex::lex_atom(line, 0)?;
    let index = match schema.index_of(relation) {
        Some(index) => index,
        None => {
            return Err(Error::new(ErrorKind::UnknownRelation)
                .with_message(format!(
                    "no such relation: \"{}\"",
                    display::render_lossy(relation)
                ))
                .with_line(line)
                .with_offset(0));
        }
    };
    let values = decode_values(line, at, &schema.relations()[index].columns)?;
    Ok((index, values))
}

#[cfg(test)]
mod tests {
    use super::{decode_row, decode_values};
    use crate::core::datatype::Value;
    use crate::core::error::ErrorKind;
    use crate::core::schema::{parse_schema, Schema};

    fn schema() -> Schema {
        parse_schema(b"person name:string age:int\nmarker\n", None).expect("schema")
    }

    #[test]
    fn row_decodes_relation_and_values() {
        let schema = schema();
        let (index, row) = decode_row(b"person \"Ada\" 36", &schema).expect("row");
        assert_eq!(index, 0);
        assert_eq!(row, vec![Value::Bytes(b"Ada".to_vec()), Value::Int(36)]);
    }

    #[test]
    fn zero_column_relation_accepts_a_bare_name() {
        let schema = schema();
        let (index, row) = decode_row(b"marker", &schema).expect("row");
        assert_eq!(index, 1);
        assert!(row.is_empty());
    }

    #[test]
    fn unknown_relation_is_named_in_the_error() {
        let schema = schema();
        let err = decode_row(b"city berlin", &schema).expect_err("unknown");
        assert_eq!(err.kind(), ErrorKind::UnknownRelation);
        let text = err.to_string();
        assert!(text.contains("city"));
        assert!(text.contains("city berlin"));
    }

    #[test]
    fn missing_value_fails_expecting_a_space() {
        let schema = schema();
        let err = decode_row(b"person \"Ada\"", &schema).expect_err("one value short");
        assert_eq!(err.kind(), ErrorKind::ExpectedSpace);
    }

    #[test]
    fn extra_value_is_trailing_data() {
        let schema = schema();
        let err = decode_row(b"person \"Ada\" 36 extra", &schema).expect_err("extra value");
        assert_eq!(err.kind(), ErrorKind::TrailingData);
    }

    #[test]
    fn double_space_before_a_value_is_rejected() {
        let schema = schema();
        // The second space fails the quote check of the string column;
        // an atom column would fail the atom lexer the same way.
        let err = decode_row(b"person  \"Ada\" 36", &schema).expect_err("double space");
        assert_eq!(err.kind(), ErrorKind::MalformedToken);
    }

    #[test]
    fn trailing_space_after_last_value_is_rejected() {
        let schema = schema();
        let err = decode_row(b"person \"Ada\" 36 ", &schema).expect_err("trailing space");
        assert_eq!(err.kind(), ErrorKind::TrailingData);
    }

    #[test]
    fn decode_failures_carry_line_context() {
        let schema = schema();
        let err = decode_row(b"person \"Ada\" 3x6", &schema).expect_err("bad int");
        assert_eq!(err.kind(), ErrorKind::Decode);
        let text = err.to_string();
        assert!(text.contains("person \"Ada\" 3x6"));
        assert!(text.contains("byte 13"));
    }

    #[test]
    fn wrong_syntax_kind_for_column_is_rejected() {
        let schema = schema();
        let err = decode_row(b"person Ada 36", &schema).expect_err("unquoted string");
        assert_eq!(err.kind(), ErrorKind::MalformedToken);
    }

    #[test]
    fn values_against_empty_columns_require_eol() {
        let schema = schema();
        let err = decode_values(b"marker x", 6, &[]).expect_err("trailing");
        assert_eq!(err.kind(), ErrorKind::TrailingData);
    }
}
