//! Client for the Public Transport Victoria (PTV) timetable API v3, plus readers for the PTV
//! GTFS schedule archive and GTFS-realtime feeds.
//!
//! ```no_run
//! use ptvdata::{Credentials, PtvClient, RouteParameters};
//!
//! let client = PtvClient::new(Credentials::new(1000001, "my-api-key"))?;
//! let routes = client.get_all_routes(&RouteParameters::default())?;
//! println!("{} routes", routes.len());
//! # Ok::<(), ptvdata::Error>(())
//! ```

pub mod client;
pub mod error;
pub mod gtfs;
pub mod params;
pub mod query;
pub mod realtime;
pub mod schema;
pub mod signing;
pub mod transport;
pub mod types;

pub use client::{ClientConfig, PtvClient};
pub use error::{DecodeError, Error, Result};
pub use gtfs::{
    Cell, DEFAULT_FEED_URL, FeedSource, Partition, StaticFeed, Table, read_gtfs_archive,
    read_gtfs_zip, read_gtfs_zip_remote, read_partition_gtfs,
};
pub use params::{
    DepartureParameters, DisruptionParameters, DisruptionStatus, Expand, OutletGeolocationParameters,
    OutletParameters, RouteParameters, SearchParameters, StopsByDistanceParameters,
};
pub use query::{OneOrMany, QueryString, ToQuery};
pub use realtime::{FlatValue, Scalar, decode_feed_message, flatten_feed, parse_feed_binary};
pub use schema::{ColumnType, FieldTypes};
pub use signing::{API_HOST, Credentials, build_signed_url};
pub use transport::{HttpResponse, HttpTransport};
