//! Line sources - Sequential text input for the catalog and the engine.
//!
//! Every source strips surrounding whitespace and reports both an explicit
//! blank line and end of input as an empty string. The design block and the
//! arrival block are each terminated by that empty string. Bytes that are
//! not UTF-8 are replaced with U+FFFD, so a damaged line fails to parse on
//! its own instead of ending the stream.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Stdin, StdinLock};
use std::path::Path;

use crate::error::{EngineError, Result};

/// A sequential source of text lines.
pub trait LineSource {
    /// Next line with surrounding whitespace removed.
    ///
    /// Returns an empty string on a blank line or when the input is exhausted.
    fn next_line(&mut self) -> io::Result<String>;
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    #[inline]
    fn next_line(&mut self) -> io::Result<String> {
        (**self).next_line()
    }
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    #[inline]
    fn next_line(&mut self) -> io::Result<String> {
        (**self).next_line()
    }
}

/// Line source over any buffered reader.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Release the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> io::Result<String> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(String::new());
        }
        Ok(String::from_utf8_lossy(&self.buf).trim().to_owned())
    }
}

/// A flower stream read from a file. The file is closed on drop.
pub type FlowerFile = ReaderSource<BufReader<File>>;

impl ReaderSource<BufReader<File>> {
    /// Open the input file.
    ///
    /// # Errors
    /// [`EngineError::SourceUnavailable`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| EngineError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl ReaderSource<StdinLock<'static>> {
    /// Read the stream from standard input.
    pub fn stdin() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock())
    }
}

/// Line source over an in-memory sequence of lines.
#[derive(Clone, Debug)]
pub struct LinesSource<I> {
    lines: I,
}

impl<I> LinesSource<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new<T>(lines: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            lines: lines.into_iter(),
        }
    }
}

impl<I> LineSource for LinesSource<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    fn next_line(&mut self) -> io::Result<String> {
        Ok(self
            .lines
            .next()
            .map(|line| line.as_ref().trim().to_owned())
            .unwrap_or_default())
    }
}
