//! Line sources feeding the engine.
//!
//! Lines come back without their terminator and are decoded lossily, since
//! free-text columns in the input are not always valid UTF-8. A blank line
//! ends the stream.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use memmap2::Mmap;

pub trait LineSource {
    /// Next non-blank line, or `None` at end of stream.
    fn next_line(&mut self) -> io::Result<Option<Cow<'_, str>>>;
}

#[inline]
fn trim_terminator(mut line: &[u8]) -> &[u8] {
    if let [rest @ .., b'\n'] = line {
        line = rest;
    }
    if let [rest @ .., b'\r'] = line {
        line = rest;
    }
    line
}

#[inline]
fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

/// Reads lines straight out of a memory-mapped file.
pub struct MappedLines {
    mmap: Mmap,
    offset: usize,
    done: bool,
}

impl MappedLines {
    pub fn open(file: &File) -> io::Result<Self> {
        // SAFETY: the map is read-only and the file is not expected to be
        // truncated by another process while the run is in progress.
        let mmap = unsafe { Mmap::map(file)? };
        Ok(Self {
            mmap,
            offset: 0,
            done: false,
        })
    }
}

impl LineSource for MappedLines {
    fn next_line(&mut self) -> io::Result<Option<Cow<'_, str>>> {
        if self.done || self.offset >= self.mmap.len() {
            return Ok(None);
        }
        let rest = &self.mmap[self.offset..];
        let end = rest
            .iter()
            .position(|&x| x == b'\n')
            .map(|x| x + 1)
            .unwrap_or(rest.len());
        self.offset += end;

        let line = trim_terminator(&rest[..end]);
        if is_blank(line) {
            self.done = true;
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(line)))
    }
}

/// Reads lines from any buffered reader, such as stdin.
pub struct ReaderLines<R> {
    reader: R,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            done: false,
        }
    }
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    fn next_line(&mut self) -> io::Result<Option<Cow<'_, str>>> {
        if self.done {
            return Ok(None);
        }
        self.buf.clear();
        let read = self.reader.read_until(b'\n', &mut self.buf)?;
        let line = trim_terminator(&self.buf);
        if read == 0 || is_blank(line) {
            self.done = true;
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(line)))
    }
}

/// Opens `path` as a line source; `-` reads standard input.
pub fn open(path: &Path) -> io::Result<Box<dyn LineSource>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(ReaderLines::new(io::stdin().lock())));
    }
    let file = File::open(path)?;
    // Zero-length files cannot be mapped on every platform.
    if file.metadata()?.len() == 0 {
        return Ok(Box::new(ReaderLines::new(BufReader::new(file))));
    }
    Ok(Box::new(MappedLines::open(&file)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn drain(source: &mut dyn LineSource) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            out.push(line.into_owned());
        }
        out
    }

    #[test]
    fn reader_strips_terminators() {
        let mut source = ReaderLines::new("a|b\r\nc|d\ne|f".as_bytes());
        assert_eq!(drain(&mut source), ["a|b", "c|d", "e|f"]);
        assert!(source.next_line().unwrap().is_none());
    }

    #[test]
    fn blank_line_ends_stream() {
        let mut source = ReaderLines::new("a\n\nb\n".as_bytes());
        assert_eq!(drain(&mut source), ["a"]);

        let mut source = ReaderLines::new("a\n  \t\r\nb\n".as_bytes());
        assert_eq!(drain(&mut source), ["a"]);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut source = ReaderLines::new(&b"C1|caf\xe9\n"[..]);
        assert_eq!(drain(&mut source), ["C1|caf\u{fffd}"]);
    }

    #[test]
    fn mapped_file_matches_reader() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"one|1\r\ntwo|2\nthree|3").unwrap();
        file.flush().unwrap();

        let mut mapped = open(file.path()).unwrap();
        assert_eq!(drain(mapped.as_mut()), ["one|1", "two|2", "three|3"]);
    }

    #[test]
    fn empty_file_has_no_lines() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut source = open(file.path()).unwrap();
        assert!(source.next_line().unwrap().is_none());
    }
}
