// Byte-level tokenizers for the three lexical shapes of a data line:
// bare atoms, quoted string literals, and the single-space separator.
use crate::core::error::{Error, ErrorKind};

const DEL: u8 = 0x7f;

fn err(kind: ErrorKind, message: impl Into<String>, line: &[u8], at: usize) -> Error {
    Error::new(kind)
        .with_message(message)
        .with_line(line)
        .with_offset(at)
}

fn is_atom_byte(b: u8) -> bool {
    b > 0x20 && b != DEL
}

/// Lexes an atom starting at `at`: a maximal, non-empty run of printable
/// non-space bytes. Returns the token and the first unconsumed offset.
pub fn lex_atom(line: &[u8], at: usize) -> Result<(&[u8], usize), Error> {
    let mut i = at;
    while i < line.len() && is_atom_byte(line[i]) {
        i += 1;
    }
    if i == at {
        return Err(err(
            ErrorKind::MalformedToken,
            "EOL or invalid character while expecting atom",
            line,
            at,
        ));
    }
    Ok((&line[at..i], i))
}

/// Lexes a quoted string literal starting at `at` and decodes its escape
/// sequences. Returns the decoded bytes and the offset just past the
/// closing quote.
pub fn lex_string(line: &[u8], at: usize) -> Result<(Vec<u8>, usize), Error> {
    let end = line.len();
    if at == end || line[at] != b'"' {
        return Err(err(
            ErrorKind::MalformedToken,
            "did not find expected string literal",
            line,
            at,
        ));
    }
    let mut out = Vec::new();
    let mut i = at + 1;
    while i < end {
        match line[i] {
            b'"' => return Ok((out, i + 1)),
            b'\\' => {
                if i + 1 == end {
                    return Err(err(
                        ErrorKind::MalformedEscape,
                        "escape sequence cut short by end of line",
                        line,
                        i,
                    ));
                }
                match line[i + 1] {
                    b'\\' => out.push(0x5c),
                    b'"' => out.push(0x22),
                    b'n' => out.push(0x0a),
                    b'r' => out.push(0x0d),
                    b't' => out.push(0x09),
                    b'x' => {
                        // \xHH needs exactly two further lowercase hex digits.
                        if i + 3 >= end {
                            return Err(err(
                                ErrorKind::MalformedEscape,
                                "hex escape cut short by end of line",
                                line,
                                i,
                            ));
                        }
                        let (hi, lo) = match (hex_value(line[i + 2]), hex_value(line[i + 3])) {
                            (Some(hi), Some(lo)) => (hi, lo),
                            _ => {
                                return Err(err(
                                    ErrorKind::MalformedEscape,
                                    "invalid hex digits in escape sequence",
                                    line,
                                    i,
                                ));
                            }
                        };
                        out.push(hi * 16 + lo);
                        i += 4;
                        continue;
                    }
                    _ => {
                        return Err(err(
                            ErrorKind::MalformedEscape,
                            "unknown escape sequence",
                            line,
                            i,
                        ));
                    }
                }
                i += 2;
            }
            b if b >= 0x20 && b != DEL => {
                out.push(b);
                i += 1;
            }
            _ => {
                return Err(err(
                    ErrorKind::MalformedToken,
                    "control byte inside string literal",
                    line,
                    i,
                ));
            }
        }
    }
    Err(err(
        ErrorKind::UnterminatedString,
        "string literal not closed before end of line",
        line,
        at,
    ))
}

/// Consumes exactly one space separating two tokens.
pub fn lex_space(line: &[u8], at: usize) -> Result<usize, Error> {
    if at == line.len() || line[at] != b' ' {
        return Err(err(
            ErrorKind::ExpectedSpace,
            "expected space character",
            line,
            at,
        ));
    }
    Ok(at + 1)
}

// Lowercase hex only; uppercase digits are rejected by the wire grammar.
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(10 + b - b'a'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{lex_atom, lex_space, lex_string};
    use crate::core::error::ErrorKind;

    #[test]
    fn atom_is_a_maximal_printable_run() {
        let (token, next) = lex_atom(b"person p1", 0).expect("atom");
        assert_eq!(token, b"person");
        assert_eq!(next, 6);

        let (token, next) = lex_atom(b"person p1", 7).expect("atom");
        assert_eq!(token, b"p1");
        assert_eq!(next, 9);
    }

    #[test]
    fn empty_atom_is_rejected() {
        let err = lex_atom(b"a ", 1).expect_err("space is not an atom");
        assert_eq!(err.kind(), ErrorKind::MalformedToken);

        let err = lex_atom(b"a", 1).expect_err("EOL is not an atom");
        assert_eq!(err.kind(), ErrorKind::MalformedToken);
    }

    #[test]
    fn atom_stops_at_del_byte() {
        let (token, next) = lex_atom(b"ab\x7fcd", 0).expect("atom");
        assert_eq!(token, b"ab");
        assert_eq!(next, 2);
    }

    #[test]
    fn plain_string_decodes_to_its_contents() {
        let (token, next) = lex_string(b"\"hello\" rest", 0).expect("string");
        assert_eq!(token, b"hello");
        assert_eq!(next, 7);
    }

    #[test]
    fn empty_string_is_valid() {
        let (token, next) = lex_string(b"\"\"", 0).expect("string");
        assert_eq!(token, b"");
        assert_eq!(next, 2);
    }

    #[test]
    fn named_escapes_decode() {
        let (token, _) = lex_string(br#""a\nb\tc\rd\\e\"f""#, 0).expect("string");
        assert_eq!(token, b"a\nb\tc\rd\\e\"f");
    }

    #[test]
    fn hex_escapes_decode_to_single_bytes() {
        let (token, _) = lex_string(br#""\x41\x42""#, 0).expect("string");
        assert_eq!(token, b"AB");

        let (token, _) = lex_string(br#""\x00\xff""#, 0).expect("string");
        assert_eq!(token, &[0x00, 0xff]);
    }

    #[test]
    fn uppercase_hex_is_rejected() {
        let err = lex_string(br#""\x4F""#, 0).expect_err("uppercase hex");
        assert_eq!(err.kind(), ErrorKind::MalformedEscape);
    }

    #[test]
    fn short_hex_escape_is_rejected() {
        let err = lex_string(br#""\x4"#, 0).expect_err("truncated hex");
        assert_eq!(err.kind(), ErrorKind::MalformedEscape);
    }

    #[test]
    fn unknown_escape_is_rejected() {
        let err = lex_string(br#""\y""#, 0).expect_err("unknown escape");
        assert_eq!(err.kind(), ErrorKind::MalformedEscape);
    }

    #[test]
    fn trailing_backslash_is_rejected() {
        let err = lex_string(br#""abc\"#, 0).expect_err("trailing backslash");
        assert_eq!(err.kind(), ErrorKind::MalformedEscape);
    }

    #[test]
    fn unterminated_string_is_rejected() {
        let err = lex_string(br#""abc"#, 0).expect_err("no closing quote");
        assert_eq!(err.kind(), ErrorKind::UnterminatedString);
    }

    #[test]
    fn control_byte_in_string_is_rejected() {
        let err = lex_string(b"\"a\x01b\"", 0).expect_err("control byte");
        assert_eq!(err.kind(), ErrorKind::MalformedToken);
    }

    #[test]
    fn missing_opening_quote_is_rejected() {
        let err = lex_string(b"abc", 0).expect_err("no opening quote");
        assert_eq!(err.kind(), ErrorKind::MalformedToken);
    }

    #[test]
    fn space_consumer_takes_exactly_one_space() {
        assert_eq!(lex_space(b"a b", 1).expect("space"), 2);

        let err = lex_space(b"ab", 1).expect_err("not a space");
        assert_eq!(err.kind(), ErrorKind::ExpectedSpace);

        let err = lex_space(b"a", 1).expect_err("EOL");
        assert_eq!(err.kind(), ErrorKind::ExpectedSpace);
    }

    // Canonical re-rendering of decoded string bytes; used to check that
    // decode(render(bytes)) round-trips for arbitrary byte content.
    fn render_string(bytes: &[u8]) -> Vec<u8> {
        let mut out = vec![b'"'];
        for &b in bytes {
            match b {
                b'\\' => out.extend_from_slice(br"\\"),
                b'"' => out.extend_from_slice(br#"\""#),
                0x0a => out.extend_from_slice(br"\n"),
                0x0d => out.extend_from_slice(br"\r"),
                0x09 => out.extend_from_slice(br"\t"),
                b if b >= 0x20 && b != 0x7f => out.push(b),
                b => out.extend_from_slice(format!("\\x{b:02x}").as_bytes()),
            }
        }
        out.push(b'"');
        out
    }

    #[test]
    fn string_render_then_lex_round_trips() {
        let cases: [&[u8]; 5] = [
            b"",
            b"plain text",
            b"quote \" backslash \\ tab\t",
            &[0x00, 0x01, 0x1f, 0x7f, 0xff],
            b"mixed \x01 content \xfe end",
        ];
        for case in cases {
            let rendered = render_string(case);
            let (decoded, next) = lex_string(&rendered, 0).expect("round trip");
            assert_eq!(decoded, case);
            assert_eq!(next, rendered.len());
        }
    }
}
