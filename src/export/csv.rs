use super::{encode, DatasetSink, EncodedTable};
use crate::error::Result;
use crate::model::Dataset;
use log::info;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes the one-hot encoded table as comma separated values.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSink for CsvSink {
    fn write(&self, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        info!("Encoding {} recipes", dataset.rows.len());
        let table = encode(dataset);
        let mut w = BufWriter::new(File::create(&self.path)?);
        write_table(&mut w, &table)?;
        w.flush()?;

        info!(
            "Wrote {} rows x {} columns to {}",
            table.rows.len(),
            table.headers.len(),
            self.path.display()
        );
        Ok(())
    }
}

pub(crate) fn write_table<W: Write>(mut w: W, table: &EncodedTable) -> io::Result<()> {
    write_row(&mut w, &table.headers)?;
    for row in &table.rows {
        write_row(&mut w, row)?;
    }
    Ok(())
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\n")
}
