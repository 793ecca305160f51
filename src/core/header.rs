// Extraction of the inline schema header from the top of a database.
use bstr::ByteSlice;

use crate::core::error::Error;
use crate::core::lookahead::Lookahead;

/// Consumes the contiguous run of `%`-prefixed lines at the front of the
/// buffer and returns them, markers stripped, as one newline-joined blob.
///
/// Blank lines inside the run are dropped. The first non-blank line that
/// does not start with `%` is pushed back for the row decoder. Returns an
/// empty blob when no header is present; fails only when the underlying
/// source does.
pub fn split_header<I>(lines: &mut Lookahead<I>) -> Result<Vec<u8>, Error>
where
    I: Iterator<Item = Result<Vec<u8>, Error>>,
{
    let mut header = Vec::new();
    while let Some(line) = lines.next() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !trimmed.starts_with(b"%") {
            lines.pushback(trimmed.to_vec());
            break;
        }
        let body = trimmed.trim_start_with(|c| c == '%' || c == ' ');
        header.extend_from_slice(body);
        header.push(b'\n');
    }
    Ok(header)
}
