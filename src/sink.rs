//! Bouquet sinks - Where assembled bouquets are written.

use std::io::{self, Write};

use serde::Serialize;

use crate::command::Bouquet;

/// Receives bouquets in the order they are assembled.
pub trait BouquetSink {
    fn emit(&mut self, bouquet: &Bouquet) -> io::Result<()>;

    /// Flush any buffered output.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl BouquetSink for Vec<Bouquet> {
    fn emit(&mut self, bouquet: &Bouquet) -> io::Result<()> {
        self.push(bouquet.clone());
        Ok(())
    }
}

impl<K: BouquetSink + ?Sized> BouquetSink for &mut K {
    fn emit(&mut self, bouquet: &Bouquet) -> io::Result<()> {
        (**self).emit(bouquet)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Writes one bouquet per line in wire form, e.g. `ALr3t5`.
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> BouquetSink for LineSink<W> {
    fn emit(&mut self, bouquet: &Bouquet) -> io::Result<()> {
        writeln!(self.writer, "{bouquet}")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// One CSV row per stem of a bouquet.
#[derive(Debug, Serialize)]
struct StemRow {
    design: char,
    size: char,
    species: char,
    count: u32,
}

/// Writes bouquets as CSV with header `design,size,species,count`.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    /// Flush and release the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> BouquetSink for CsvSink<W> {
    fn emit(&mut self, bouquet: &Bouquet) -> io::Result<()> {
        for &(species, count) in bouquet.stems.iter().filter(|(_, n)| *n > 0) {
            self.writer
                .serialize(StemRow {
                    design: bouquet.design,
                    size: bouquet.size.as_char(),
                    species: species.as_char(),
                    count,
                })
                .map_err(io::Error::from)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
