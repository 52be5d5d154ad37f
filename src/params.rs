//! Optional parameter sets accepted by the Timetable API endpoints.
//!
//! Every field is optional; unset fields are left out of the request so the API applies its
//! documented default.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::Error;
use crate::query::{OneOrMany, QueryString, ToQuery};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisruptionStatus {
    Current,
    Planned,
}

impl DisruptionStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DisruptionStatus::Current => "current",
            DisruptionStatus::Planned => "planned",
        }
    }
}

impl fmt::Display for DisruptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisruptionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "current" => Ok(DisruptionStatus::Current),
            "planned" => Ok(DisruptionStatus::Planned),
            _ => Err(Error::UnsupportedDisruptionStatus(s.to_owned())),
        }
    }
}

/// Objects the departures and runs endpoints can return in full.
///
/// `Run` must be expanded to receive `VehiclePosition` and `VehicleDescriptor` information.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Expand {
    All,
    Stop,
    Route,
    Run,
    Direction,
    Disruption,
    VehiclePosition,
    VehicleDescriptor,
    None,
}

impl Expand {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Expand::All => "All",
            Expand::Stop => "Stop",
            Expand::Route => "Route",
            Expand::Run => "Run",
            Expand::Direction => "Direction",
            Expand::Disruption => "Disruption",
            Expand::VehiclePosition => "VehiclePosition",
            Expand::VehicleDescriptor => "VehicleDescriptor",
            Expand::None => "None",
        }
    }

    pub const fn all() -> [Expand; 9] {
        [
            Expand::All,
            Expand::Stop,
            Expand::Route,
            Expand::Run,
            Expand::Direction,
            Expand::Disruption,
            Expand::VehiclePosition,
            Expand::VehicleDescriptor,
            Expand::None,
        ]
    }
}

impl fmt::Display for Expand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Expand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expand::all()
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnsupportedExpand(s.to_owned()))
    }
}

/// `/v3/routes`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteParameters {
    pub route_types: Option<OneOrMany<u32>>,
    /// Free text matched against route names
    pub route_name: Option<String>,
}

impl ToQuery for RouteParameters {
    fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        query
            .many("route_types", self.route_types.as_ref())
            .text("route_name", self.route_name.as_deref());
        query
    }
}

/// `/v3/departures/route_type/{route_type}/stop/{stop_id}[/route/{route_id}]`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DepartureParameters {
    /// Only honoured by the stop-wide endpoint
    pub platform_numbers: Option<OneOrMany<u32>>,
    pub direction_id: Option<u32>,
    /// `stop_id` is a GTFS stop id
    pub gtfs: Option<bool>,
    /// Defaults to now on the server
    pub date_utc: Option<DateTime<Utc>>,
    pub max_results: Option<u32>,
    pub include_cancelled: Option<bool>,
    /// Requires `max_results` > 0
    pub look_backwards: Option<bool>,
    pub expand: Option<OneOrMany<Expand>>,
    pub include_geopath: Option<bool>,
}

impl ToQuery for DepartureParameters {
    fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        query
            .many("platform_numbers", self.platform_numbers.as_ref())
            .param("direction_id", self.direction_id)
            .flag("gtfs", self.gtfs)
            .timestamp("date_utc", self.date_utc.as_ref())
            .param("max_results", self.max_results)
            .flag("include_cancelled", self.include_cancelled)
            .flag("look_backwards", self.look_backwards)
            .many("expand", self.expand.as_ref())
            .flag("include_geopath", self.include_geopath);
        query
    }
}

/// `/v3/disruptions[...]`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisruptionParameters {
    pub route_types: Option<OneOrMany<u32>>,
    /// Values returned by the disruption modes endpoint
    pub disruption_modes: Option<OneOrMany<u32>>,
    pub disruption_status: Option<DisruptionStatus>,
}

impl ToQuery for DisruptionParameters {
    fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        query
            .many("route_types", self.route_types.as_ref())
            .many("disruption_modes", self.disruption_modes.as_ref())
            .param("disruption_status", self.disruption_status);
        query
    }
}

/// `/v3/outlets`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutletParameters {
    /// Server default is 30
    pub max_results: Option<u32>,
}

impl ToQuery for OutletParameters {
    fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        query.param("max_results", self.max_results);
        query
    }
}

/// `/v3/outlets/location/{latitude},{longitude}`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutletGeolocationParameters {
    /// Metres, server default is 300
    pub max_distance: Option<f64>,
    pub max_results: Option<u32>,
}

impl ToQuery for OutletGeolocationParameters {
    fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        query
            .param("max_distance", self.max_distance)
            .param("max_results", self.max_results);
        query
    }
}

/// `/v3/search/{search_term}`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchParameters {
    pub route_types: Option<OneOrMany<u32>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub max_distance: Option<f64>,
    /// Reserved by the API, currently unavailable
    pub include_addresses: Option<bool>,
    pub include_outlets: Option<bool>,
    pub match_stop_by_suburb: Option<bool>,
    pub match_route_by_suburb: Option<bool>,
    pub match_stop_by_gtfs_stop_id: Option<bool>,
}

impl ToQuery for SearchParameters {
    fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        query
            .many("route_types", self.route_types.as_ref())
            .param("latitude", self.latitude)
            .param("longitude", self.longitude)
            .param("max_distance", self.max_distance)
            .flag("include_addresses", self.include_addresses)
            .flag("include_outlets", self.include_outlets)
            .flag("match_stop_by_suburb", self.match_stop_by_suburb)
            .flag("match_route_by_suburb", self.match_route_by_suburb)
            .flag("match_stop_by_gtfs_stop_id", self.match_stop_by_gtfs_stop_id);
        query
    }
}

/// `/v3/stops/location/{latitude},{longitude}`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StopsByDistanceParameters {
    pub route_types: Option<OneOrMany<u32>>,
    pub max_results: Option<u32>,
    pub max_distance: Option<f64>,
    pub stop_disruptions: Option<bool>,
}

impl ToQuery for StopsByDistanceParameters {
    fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        query
            .many("route_types", self.route_types.as_ref())
            .param("max_results", self.max_results)
            .param("max_distance", self.max_distance)
            .flag("stop_disruptions", self.stop_disruptions);
        query
    }
}
