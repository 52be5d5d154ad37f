//! Response shapes of the Timetable API v3.
//!
//! These mirror the Swagger definitions (`V3.*`) field for field. Every field is optional since
//! the API omits or nulls fields depending on the mode and the requested expansions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Status {
    pub version: Option<String>,
    /// 0 = offline, 1 = online
    pub health: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteServiceStatus {
    pub description: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Route {
    pub route_service_status: Option<RouteServiceStatus>,
    pub route_type: Option<i32>,
    pub route_id: Option<i64>,
    pub route_name: Option<String>,
    pub route_number: Option<String>,
    pub route_gtfs_id: Option<String>,
    pub geopath: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteResponse {
    pub route: Option<Route>,
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteType {
    pub route_type_name: Option<String>,
    pub route_type: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Stop {
    pub stop_distance: Option<f64>,
    pub stop_suburb: Option<String>,
    pub stop_name: Option<String>,
    pub stop_id: Option<i64>,
    pub route_type: Option<i32>,
    pub stop_latitude: Option<f64>,
    pub stop_longitude: Option<f64>,
    pub stop_landmark: Option<String>,
    pub stop_sequence: Option<i32>,
    pub disruption_ids: Vec<i64>,
    pub routes: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StopsResponse {
    pub stops: Vec<Stop>,
    pub disruptions: HashMap<String, Disruption>,
    pub geopath: Vec<serde_json::Value>,
    pub status: Option<Status>,
}

/// `V3.StopDetails`; amenity, accessibility and staffing blocks are kept as raw JSON.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StopDetails {
    pub disruption_ids: Vec<i64>,
    pub station_type: Option<String>,
    pub station_description: Option<String>,
    pub route_type: Option<i32>,
    pub stop_location: Option<serde_json::Value>,
    pub stop_amenities: Option<serde_json::Value>,
    pub stop_accessibility: Option<serde_json::Value>,
    pub stop_staffing: Option<serde_json::Value>,
    pub routes: Vec<serde_json::Value>,
    pub stop_id: Option<i64>,
    pub stop_name: Option<String>,
    pub stop_landmark: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StopResponse {
    pub stop: Option<StopDetails>,
    pub disruptions: HashMap<String, Disruption>,
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Departure {
    pub stop_id: Option<i64>,
    pub route_id: Option<i64>,
    /// -1 when the run identifier is alphanumeric, see `run_ref`
    pub run_id: Option<i64>,
    pub run_ref: Option<String>,
    pub direction_id: Option<i64>,
    pub disruption_ids: Vec<i64>,
    pub scheduled_departure_utc: Option<String>,
    pub estimated_departure_utc: Option<String>,
    pub at_platform: Option<bool>,
    pub platform_number: Option<String>,
    pub flags: Option<String>,
    /// Not contiguous; order by it to get chronological departures of one run
    pub departure_sequence: Option<i64>,
}

/// Departures plus the sibling collections keyed by identifier.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DeparturesResponse {
    pub departures: Vec<Departure>,
    pub stops: HashMap<String, Stop>,
    pub routes: HashMap<String, Route>,
    pub runs: HashMap<String, Run>,
    pub directions: HashMap<String, Direction>,
    pub disruptions: HashMap<String, Disruption>,
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Direction {
    pub route_direction_description: Option<String>,
    pub direction_id: Option<i64>,
    pub direction_name: Option<String>,
    pub route_id: Option<i64>,
    pub route_type: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectionsResponse {
    pub directions: Vec<Direction>,
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VehiclePosition {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub easting: Option<f64>,
    pub northing: Option<f64>,
    pub direction: Option<String>,
    pub bearing: Option<f64>,
    pub supplier: Option<String>,
    pub datetime_utc: Option<String>,
    pub expiry_time: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VehicleDescriptor {
    pub operator: Option<String>,
    pub id: Option<String>,
    pub low_floor: Option<bool>,
    pub air_conditioned: Option<bool>,
    pub description: Option<String>,
    pub supplier: Option<String>,
    pub length: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Run {
    pub run_id: Option<i64>,
    pub run_ref: Option<String>,
    pub route_id: Option<i64>,
    pub route_type: Option<i32>,
    pub final_stop_id: Option<i64>,
    pub destination_name: Option<String>,
    pub status: Option<String>,
    pub direction_id: Option<i64>,
    pub run_sequence: Option<i64>,
    pub express_stop_count: Option<i64>,
    pub vehicle_position: Option<VehiclePosition>,
    pub vehicle_descriptor: Option<VehicleDescriptor>,
    pub geopath: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunsResponse {
    pub runs: Vec<Run>,
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunResponse {
    pub run: Option<Run>,
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisruptionDirection {
    pub route_direction_id: Option<i64>,
    pub direction_id: Option<i64>,
    pub direction_name: Option<String>,
    pub service_time: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisruptionRoute {
    pub route_type: Option<i32>,
    pub route_id: Option<i64>,
    pub route_name: Option<String>,
    pub route_number: Option<String>,
    pub route_gtfs_id: Option<String>,
    pub direction: Option<DisruptionDirection>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisruptionStop {
    pub stop_id: Option<i64>,
    pub stop_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Disruption {
    pub disruption_id: Option<i64>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub disruption_status: Option<String>,
    pub disruption_type: Option<String>,
    pub published_on: Option<String>,
    pub last_updated: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub routes: Vec<DisruptionRoute>,
    pub stops: Vec<DisruptionStop>,
    pub colour: Option<String>,
    pub display_on_board: Option<bool>,
    pub display_status: Option<bool>,
}

/// Disruptions grouped by mode (`general`, `metro_train`, `metro_tram`, ...).
pub type Disruptions = HashMap<String, Vec<Disruption>>;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisruptionsResponse {
    pub disruptions: Disruptions,
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisruptionResponse {
    pub disruption: Option<Disruption>,
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisruptionMode {
    pub disruption_mode_name: Option<String>,
    pub disruption_mode: Option<i32>,
}

/// `V3.Outlet`, `V3.OutletGeolocation` and `V3.ResultOutlet` share this shape; only the
/// location based ones carry `outlet_distance`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Outlet {
    pub outlet_distance: Option<f64>,
    pub outlet_slid_spid: Option<String>,
    pub outlet_name: Option<String>,
    pub outlet_business: Option<String>,
    pub outlet_latitude: Option<f64>,
    pub outlet_longitude: Option<f64>,
    pub outlet_suburb: Option<String>,
    pub outlet_postcode: Option<i32>,
    pub outlet_business_hour_mon: Option<String>,
    pub outlet_business_hour_tue: Option<String>,
    pub outlet_business_hour_wed: Option<String>,
    pub outlet_business_hour_thur: Option<String>,
    pub outlet_business_hour_fri: Option<String>,
    pub outlet_business_hour_sat: Option<String>,
    pub outlet_business_hour_sun: Option<String>,
    pub outlet_notes: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutletsResponse {
    pub outlets: Vec<Outlet>,
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchResult {
    pub stops: Vec<Stop>,
    pub routes: Vec<Route>,
    pub outlets: Vec<Outlet>,
    pub status: Option<Status>,
}

/// The fare estimate endpoint answers in PascalCase, unlike the rest of the API.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FareEstimateResponse {
    pub fare_estimate_result_status: Option<FareEstimateResultStatus>,
    pub fare_estimate_result: Option<FareEstimateResult>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FareEstimateResultStatus {
    pub status_code: Option<i32>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FareEstimateResult {
    pub is_early_bird: Option<bool>,
    pub is_journey_in_free_tram_zone: Option<bool>,
    pub is_this_weekend_journey: Option<bool>,
    pub zone_info: Option<ZoneInfo>,
    pub passenger_fares: Vec<PassengerFare>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ZoneInfo {
    pub min_zone: Option<i32>,
    pub max_zone: Option<i32>,
    pub unique_zones: Vec<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PassengerFare {
    #[serde(rename = "PassengerType")]
    pub passenger_type: Option<String>,
    #[serde(rename = "Fare2HourPeak")]
    pub fare_2_hour_peak: Option<f64>,
    #[serde(rename = "Fare2HourOffPeak")]
    pub fare_2_hour_off_peak: Option<f64>,
    #[serde(rename = "FareDailyPeak")]
    pub fare_daily_peak: Option<f64>,
    #[serde(rename = "FareDailyOffPeak")]
    pub fare_daily_off_peak: Option<f64>,
    #[serde(rename = "Pass7Days")]
    pub pass_7_days: Option<f64>,
    #[serde(rename = "Pass28To69DayPerDay")]
    pub pass_28_to_69_day_per_day: Option<f64>,
    #[serde(rename = "Pass70PlusDayPerDay")]
    pub pass_70_plus_day_per_day: Option<f64>,
    #[serde(rename = "WeekendCap")]
    pub weekend_cap: Option<f64>,
    #[serde(rename = "HolidayCap")]
    pub holiday_cap: Option<f64>,
}
