//! JSON dataset file.

use crate::error::{DirectoryError, Result};
use orgdir_types::Dataset;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// A dataset document on disk.
///
/// A missing or empty file loads as an empty dataset. Saving never leaves a
/// partially written file at `path`.
#[derive(Debug, Clone)]
pub struct DatasetFile {
    path: PathBuf,
}

impl DatasetFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<Dataset> {
        if !self.exists() {
            return Ok(Dataset::new());
        }

        let file = File::open(&self.path)?;
        if file.metadata()?.len() == 0 {
            return Ok(Dataset::new());
        }

        let dataset: Dataset = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            DirectoryError::InvalidFormat(format!("{}: {}", self.path.display(), e))
        })?;

        log::debug!(
            "Read dataset {}: {} buildings, {} activities, {} organizations",
            self.path.display(),
            dataset.buildings.len(),
            dataset.activities.len(),
            dataset.organizations.len()
        );
        Ok(dataset)
    }

    pub fn save(&self, dataset: &Dataset) -> Result<()> {
        let temp_path = self.temp_path();

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, dataset)?;
        writer.write_all(b"\n")?;

        writer.flush()?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&temp_path, &self.path)?;
        self.sync_parent_dir()?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        if let Some(name) = temp.file_name() {
            let mut new_name = name.to_string_lossy().into_owned();
            new_name.push_str(".tmp");
            temp.set_file_name(new_name);
        }
        temp
    }

    fn sync_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }
        Ok(())
    }
}
