use super::DatasetSink;
use crate::error::Result;
use crate::model::Dataset;
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes the dataset rows as they are, without one-hot encoding.
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DatasetSink for JsonSink {
    fn write(&self, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut w = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut w, &dataset.rows)?;
        w.flush()?;

        info!("Wrote {} rows to {}", dataset.rows.len(), self.path.display());
        Ok(())
    }
}
