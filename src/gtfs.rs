//! Loader for the PTV GTFS schedule archive.
//!
//! The archive nests one GTFS feed per mode partition: every top-level directory `<mode>/`
//! holds a `<mode>/google_transit.zip`, itself holding one `*.txt` CSV file per table.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::PathBuf;

use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{DecodeError, Error, Result};
use crate::schema::{ColumnType, FieldTypes};
use crate::transport::{HttpTransport, blocking_client};

pub const DEFAULT_FEED_URL: &str = "http://data.ptv.vic.gov.au/downloads/gtfs.zip";

const INNER_ARCHIVE: &str = "google_transit.zip";
const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

/// A single CSV value. Empty fields are `Missing`, never an empty string.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Missing,
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }
}

/// One rectangular table; every row has exactly one cell per column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    types: Vec<ColumnType>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_types(&self) -> &[ColumnType] {
        &self.types
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[index])
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[index]).collect())
    }
}

/// Tables of one mode partition, keyed by table name (file name without `.txt`).
pub type Partition = BTreeMap<String, Table>;

/// Every partition of the archive, keyed by partition name.
pub type StaticFeed = BTreeMap<String, Partition>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedSource {
    /// Downloaded in full before parsing
    Remote(String),
    Local(PathBuf),
}

impl FeedSource {
    /// A source containing `://` is a URL, anything else a local path. Both must name a
    /// `.zip` file.
    pub fn parse(source: &str) -> Result<Self> {
        if !source.ends_with(".zip") {
            return Err(Error::InvalidFeedSource(source.to_owned()));
        }
        if source.contains("://") {
            Ok(FeedSource::Remote(source.to_owned()))
        } else {
            Ok(FeedSource::Local(PathBuf::from(source)))
        }
    }
}

impl Default for FeedSource {
    fn default() -> Self {
        FeedSource::Remote(DEFAULT_FEED_URL.to_owned())
    }
}

/// Reads the archive from a URL or local path.
pub fn read_gtfs_zip(source: &str, types: &FieldTypes) -> Result<StaticFeed> {
    match FeedSource::parse(source)? {
        FeedSource::Remote(url) => {
            let client = blocking_client(None, concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))?;
            read_gtfs_zip_remote(&client, &url, types)
        }
        FeedSource::Local(path) => read_gtfs_archive(File::open(path)?, types),
    }
}

/// Downloads the whole archive through `transport`, then parses it from memory.
pub fn read_gtfs_zip_remote<T: HttpTransport>(
    transport: &T,
    url: &str,
    types: &FieldTypes,
) -> Result<StaticFeed> {
    debug!(url, "downloading schedule archive");
    let resp = transport.get(url)?;
    if !resp.is_success() {
        return Err(Error::Http {
            status: resp.status,
        });
    }
    debug!(bytes = resp.body.len(), "schedule archive downloaded");
    read_gtfs_archive(Cursor::new(resp.body), types)
}

/// Walks an opened outer archive.
pub fn read_gtfs_archive<R: Read + Seek>(reader: R, types: &FieldTypes) -> Result<StaticFeed> {
    let mut archive = ZipArchive::new(reader)?;
    let mut feed = StaticFeed::new();

    for partition in partition_names(&archive) {
        let mut inner = open_partition(&mut archive, &partition)?;
        let mut tables = Partition::new();

        let members: Vec<String> = inner
            .file_names()
            .filter(|name| name.ends_with(".txt"))
            .map(String::from)
            .collect();
        for member in members {
            let table_name = member.trim_end_matches(".txt").to_owned();
            let mut bytes = Vec::new();
            inner.by_name(&member)?.read_to_end(&mut bytes)?;
            let table = read_table(&bytes, &table_name, types)?;
            debug!(partition = partition.as_str(), table = table_name.as_str(), rows = table.len(), "loaded table");
            tables.insert(table_name, table);
        }

        feed.insert(partition, tables);
    }

    Ok(feed)
}

/// Builds the gtfs-structures model of one partition.
pub fn read_partition_gtfs<R: Read + Seek>(reader: R, partition: &str) -> Result<gtfs_structures::Gtfs> {
    let mut archive = ZipArchive::new(reader)?;
    let bytes = partition_bytes(&mut archive, partition)?;
    Ok(gtfs_structures::Gtfs::from_reader(Cursor::new(bytes))?)
}

/// Top-level directory entries, in archive order.
fn partition_names<R: Read + Seek>(archive: &ZipArchive<R>) -> Vec<String> {
    let mut names: Vec<String> = archive
        .file_names()
        .filter_map(|name| name.strip_suffix('/'))
        .filter(|name| !name.is_empty() && !name.contains('/'))
        .map(String::from)
        .collect();
    names.dedup();
    names
}

fn partition_bytes<R: Read + Seek>(archive: &mut ZipArchive<R>, partition: &str) -> Result<Vec<u8>> {
    let path = format!("{partition}/{INNER_ARCHIVE}");
    let mut file = match archive.by_name(&path) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => {
            return Err(Error::MissingPartitionArchive {
                partition: partition.to_owned(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    // the inner archive needs Seek, which compressed members do not offer
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

fn open_partition<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    partition: &str,
) -> Result<ZipArchive<Cursor<Vec<u8>>>> {
    let bytes = partition_bytes(archive, partition)?;
    Ok(ZipArchive::new(Cursor::new(bytes))?)
}

/// Parses one CSV member, coercing each column to its declared type.
pub fn read_table(bytes: &[u8], table_name: &str, types: &FieldTypes) -> Result<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let csv_error = |source: csv::Error| DecodeError::Csv {
        table: table_name.to_owned(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);
    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();
    let column_types: Vec<ColumnType> = columns
        .iter()
        .map(|c| types.column_type(table_name, c))
        .collect();

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record).map_err(csv_error)? {
        let mut row = Vec::with_capacity(columns.len());
        for (i, (column, ty)) in columns.iter().zip(&column_types).enumerate() {
            let raw = record.get(i).unwrap_or("");
            row.push(parse_cell(raw, *ty, table_name, column)?);
        }
        rows.push(row);
    }

    Ok(Table {
        columns,
        types: column_types,
        rows,
    })
}

fn parse_cell(raw: &str, ty: ColumnType, table: &str, column: &str) -> Result<Cell> {
    if raw.is_empty() {
        return Ok(Cell::Missing);
    }
    let invalid = || DecodeError::Column {
        table: table.to_owned(),
        column: column.to_owned(),
        value: raw.to_owned(),
        expected: ty.name(),
    };
    let cell = match ty {
        ColumnType::Text => Cell::Text(raw.to_owned()),
        ColumnType::Integer => Cell::Integer(raw.trim().parse().map_err(|_| invalid())?),
        ColumnType::Float => Cell::Float(raw.trim().parse().map_err(|_| invalid())?),
    };
    Ok(cell)
}
