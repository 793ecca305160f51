// Strict-then-escape rendering of raw bytes for human-readable diagnostics.
use bstr::ByteSlice;

use crate::core::error::{Error, ErrorKind};

/// Decode `bytes` as strict UTF-8 for display purposes.
///
/// On invalid UTF-8 this does not hand back a lossily-substituted string;
/// it fails with an error whose message embeds a backslash-escaped
/// rendering of the bytes, so the caller still gets readable text on the
/// error path but can never mistake recovered garbage for valid content.
pub fn decode_for_display(bytes: &[u8]) -> Result<String, Error> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_owned()),
        Err(err) => Err(Error::new(ErrorKind::InvalidUtf8)
            .with_message(format!("not valid UTF-8: \"{}\"", bytes.escape_bytes()))
            .with_source(err)),
    }
}

/// Space-joined variant of [`decode_for_display`] over a sequence of
/// byte-strings, with the same strict-then-escape behavior per element.
pub fn decode_all_for_display<'a, I>(seq: I) -> Result<String, Error>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut out = String::new();
    for (i, bytes) in seq.into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&decode_for_display(bytes)?);
    }
    Ok(out)
}

/// Infallible rendering used when embedding bytes in an error message:
/// strict UTF-8 when possible, backslash-escaped otherwise.
pub fn render_lossy(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => bytes.escape_bytes().to_string(),
    }
}
