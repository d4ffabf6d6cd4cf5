use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;
use zip::ZipArchive;

mod config;
pub mod models;
pub use config::*;
use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
}

#[derive(Debug, Default, Clone)]
pub enum StorageType {
    #[default]
    None,
    Zip(PathBuf),
    Directory(PathBuf),
}

/// Streams the tables of a GTFS feed row by row.
#[derive(Debug, Default, Clone)]
pub struct GtfsReader {
    config: Config,
    storage: StorageType,
}

impl GtfsReader {
    pub fn new(config: self::Config) -> Self {
        Self {
            config,
            storage: Default::default(),
        }
    }

    pub fn from_zip<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.storage = StorageType::Zip(path.into());
        self
    }

    pub fn from_directory<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.storage = StorageType::Directory(path.into());
        self
    }

    /// Picks zip or directory storage depending on what `path` is.
    pub fn from_path<P: Into<PathBuf>>(self, path: P) -> Self {
        let path = path.into();
        if path.is_dir() {
            self.from_directory(path)
        } else {
            self.from_zip(path)
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stream_stops<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsStop)),
    {
        self.stream(&self.config.stops_file_name, f)
    }

    pub fn stream_routes<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsRoute)),
    {
        self.stream(&self.config.routes_file_name, f)
    }

    pub fn stream_trips<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsTrip)),
    {
        self.stream(&self.config.trips_file_name, f)
    }

    pub fn stream_stop_times<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsStopTime)),
    {
        self.stream(&self.config.stop_times_file_name, f)
    }

    pub fn stream_transfers<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsTransfer)),
    {
        self.stream(&self.config.transfers_file_name, f)
    }

    fn stream<T, F>(&self, file_name: &str, f: F) -> Result<(), self::Error>
    where
        T: DeserializeOwned,
        F: FnMut((usize, T)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => stream_from_zip(path, file_name, f),
            StorageType::Directory(path) => stream_from_directory(path, file_name, f),
        }
    }
}

fn stream_from_zip<T, F>(zip_path: &Path, file_name: &str, f: F) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let zip_file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(zip_file)?;
    let index = archive
        .index_for_name(file_name)
        .ok_or(self::Error::FileNotFound(file_name.to_string()))?;
    let file = archive.by_index(index)?;
    stream_csv(file, file_name, f)
}

fn stream_from_directory<T, F>(dir: &Path, file_name: &str, f: F) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let path = dir.join(file_name);
    if !path.is_file() {
        return Err(self::Error::FileNotFound(file_name.to_string()));
    }
    stream_csv(File::open(path)?, file_name, f)
}

fn stream_csv<R, T, F>(reader: R, file_name: &str, f: F) -> Result<(), self::Error>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut skipped = 0usize;
    reader
        .deserialize()
        .filter_map(|row| match row {
            Ok(row) => Some(row),
            Err(err) => {
                skipped += 1;
                debug!("Skipping malformed row in {file_name}: {err}");
                None
            }
        })
        .enumerate()
        .for_each(f);
    if skipped > 0 {
        debug!("Skipped {skipped} rows in {file_name}");
    }
    Ok(())
}
