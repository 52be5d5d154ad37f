use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the REST client, the schedule archive loader and the realtime decoder.
#[derive(Error, Debug)]
pub enum Error {
    /// The endpoint path did not start with `/`
    #[error("endpoint must start with '/', got '{0}'")]
    InvalidEndpoint(String),
    #[error("unsupported disruption status '{0}', expected 'current' or 'planned'")]
    UnsupportedDisruptionStatus(String),
    #[error("unsupported expand option '{0}'")]
    UnsupportedExpand(String),
    /// The remote answered with a non-success status. The body is never parsed.
    #[error("HTTP error: status {status}")]
    Http { status: u16 },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The request failed before any status was received
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("impossible to read archive")]
    Io(#[from] std::io::Error),
    #[error("archive source must be a .zip file, got '{0}'")]
    InvalidFeedSource(String),
    #[error("partition '{partition}' has no google_transit.zip")]
    MissingPartitionArchive { partition: String },
    #[error("impossible to build the typed GTFS model")]
    Gtfs(#[from] gtfs_structures::Error),
}

/// A payload that reached us but could not be read into the expected shape.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid JSON body")]
    Json(#[from] serde_json::Error),
    #[error("invalid protocol buffer payload")]
    Protobuf(#[from] prost::DecodeError),
    #[error("invalid zip archive")]
    Zip(#[from] zip::result::ZipError),
    #[error("impossible to read csv table '{table}'")]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },
    #[error("table '{table}', column '{column}': '{value}' is not a valid {expected}")]
    Column {
        table: String,
        column: String,
        value: String,
        expected: &'static str,
    },
    /// A proto2 `required` field was absent from the wire payload
    #[error("{message} is missing required field '{field}'")]
    MissingRequiredField {
        message: &'static str,
        field: &'static str,
    },
    /// The response envelope did not carry the collection we unwrap
    #[error("response has no '{0}' field")]
    MissingField(&'static str),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(DecodeError::Json(e))
    }
}

impl From<prost::DecodeError> for Error {
    fn from(e: prost::DecodeError) -> Self {
        Error::Decode(DecodeError::Protobuf(e))
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Decode(DecodeError::Zip(e))
    }
}
