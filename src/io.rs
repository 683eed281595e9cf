//! Write netlists to files, and read and write numeric row files

mod rows;
mod spectre;
mod writer;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub use rows::{check_row, read_rows, write_rows, Rows};
pub use spectre::SpectreWriter;
pub use writer::Writer;

use crate::netlist::Circuit;
use crate::{Error, Result};

/// Return the writer for a netlist file
///
/// Following extensions are supported: .scs, .spectre, or no extension for Spectre
pub fn writer_for(path: &Path) -> Result<SpectreWriter> {
    match path.extension() {
        None => Ok(SpectreWriter::new()),
        Some(s) => {
            if s == "scs" || s == "spectre" {
                Ok(SpectreWriter::new())
            } else {
                Err(Error::UnknownFormat(s.to_string_lossy().into_owned()))
            }
        }
    }
}

/// Write a circuit to a netlist file, followed by a newline
pub fn write_circuit_file(path: &Path, ckt: &Circuit) -> Result<()> {
    let writer = writer_for(path)?;
    let mut f = BufWriter::new(File::create(path)?);
    writer.dump_to_file(ckt, &mut f)?;
    writeln!(f)?;
    f.flush()?;
    Ok(())
}

/// Write a circuit to its own output path
pub fn write_circuit(ckt: &Circuit) -> Result<()> {
    let path = ckt.path().ok_or(Error::NoPath)?;
    write_circuit_file(path, ckt)
}

/// Read a file of comma-separated rows of numbers
pub fn read_rows_file(path: &Path) -> Result<Vec<Vec<f64>>> {
    let f = File::open(path)?;
    read_rows(f, path)
}

/// Write rows of numbers to a file
pub fn write_rows_file(path: &Path, rows: &[Vec<f64>]) -> Result<()> {
    let mut f = BufWriter::new(File::create(path)?);
    write_rows(&mut f, rows)?;
    f.flush()?;
    Ok(())
}
