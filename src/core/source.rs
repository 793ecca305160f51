// Line sources feeding the decoder: file-backed and in-memory.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::core::error::{Error, ErrorKind};

/// Reads a file as a sequence of physical lines in binary mode, with the
/// trailing `\n` stripped, and a trailing `\r` as well so CRLF files
/// decode like their LF counterparts. The handle is released when the
/// source is dropped, on every exit path.
#[derive(Debug)]
pub struct FileSource {
    reader: BufReader<File>,
    path: PathBuf,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to open database file")
                .with_path(&path)
                .with_source(err)
        })?;
        Ok(Self {
            reader: BufReader::new(file),
            path,
        })
    }
}

impl Iterator for FileSource {
    type Item = Result<Vec<u8>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.last() == Some(&b'\n') {
                    line.pop();
                    if line.last() == Some(&b'\r') {
                        line.pop();
                    }
                }
                Some(Ok(line))
            }
            Err(err) => Some(Err(Error::new(ErrorKind::Io)
                .with_message("failed to read database file")
                .with_path(&self.path)
                .with_source(err))),
        }
    }
}

/// In-memory line source over a byte buffer, for tests and callers that
/// already hold the whole database. Splits on `\n` and strips `\r` the
/// same way [`FileSource`] does.
pub fn mem_lines(data: &[u8]) -> impl Iterator<Item = Result<Vec<u8>, Error>> + '_ {
    let mut parts = data.split(|&b| b == b'\n').peekable();
    std::iter::from_fn(move || {
        let part = parts.next()?;
        // A trailing newline produces one empty tail element, not a line.
        if parts.peek().is_none() && part.is_empty() {
            return None;
        }
        let line = match part.last() {
            Some(&b'\r') => &part[..part.len() - 1],
            _ => part,
        };
        Some(Ok(line.to_vec()))
    })
}

#[cfg(test)]
mod tests {
    use super::mem_lines;

    fn collect(data: &[u8]) -> Vec<Vec<u8>> {
        mem_lines(data).map(|line| line.expect("ok")).collect()
    }

    #[test]
    fn splits_on_newlines_and_drops_the_trailing_one() {
        assert_eq!(collect(b"a\nb\n"), vec![b"a".to_vec(), b"b".to_vec()]);
        assert_eq!(collect(b"a\nb"), vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn keeps_interior_empty_lines() {
        assert_eq!(
            collect(b"a\n\nb\n"),
            vec![b"a".to_vec(), Vec::new(), b"b".to_vec()]
        );
    }

    #[test]
    fn strips_carriage_returns() {
        assert_eq!(collect(b"a\r\nb\r\n"), vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(collect(b"").is_empty());
    }
}
