//! Blocking client for the PTV Timetable API v3.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{DecodeError, Error, Result};
use crate::params::{
    DepartureParameters, DisruptionParameters, OutletGeolocationParameters, OutletParameters,
    RouteParameters, SearchParameters, StopsByDistanceParameters,
};
use crate::query::{ToQuery, encode_component};
use crate::signing::{API_HOST, Credentials, signed_url};
use crate::transport::{HttpTransport, blocking_client};
use crate::types::{
    DeparturesResponse, DirectionsResponse, DisruptionMode, DisruptionResponse, Disruptions,
    DisruptionsResponse, FareEstimateResponse, Outlet, OutletsResponse, Route, RouteResponse,
    RouteType, RunResponse, RunsResponse, SearchResult, StopResponse, StopsResponse,
};

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Scheme and host, without a trailing slash
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_HOST.to_owned(),
            timeout: Some(Duration::from_secs(30)),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// One session shared by every call made through the client.
pub struct PtvClient<T = reqwest::blocking::Client> {
    credentials: Credentials,
    base_url: String,
    transport: T,
}

impl PtvClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let transport = blocking_client(config.timeout, &config.user_agent)?;
        Ok(Self::with_transport(credentials, &config.base_url, transport))
    }
}

impl<T: HttpTransport> PtvClient<T> {
    pub fn with_transport(credentials: Credentials, base_url: &str, transport: T) -> Self {
        Self {
            credentials,
            base_url: base_url.trim_end_matches('/').to_owned(),
            transport,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// GETs `endpoint` and parses the body as JSON.
    ///
    /// Anonymous requests (`needs_auth == false`) only make sense for the Swagger docs.
    pub fn fetch(&self, endpoint: &str, needs_auth: bool) -> Result<Value> {
        let url = if needs_auth {
            signed_url(
                &self.base_url,
                endpoint,
                self.credentials.dev_id(),
                self.credentials.api_key(),
            )?
        } else {
            format!("{}{}", self.base_url, endpoint)
        };

        debug!(endpoint, needs_auth, "requesting");
        let resp = self.transport.get(&url)?;
        if !resp.is_success() {
            warn!(endpoint, status = resp.status, "request failed");
            return Err(Error::Http {
                status: resp.status,
            });
        }
        debug!(endpoint, status = resp.status, bytes = resp.body.len(), "response received");

        Ok(serde_json::from_slice(&resp.body)?)
    }

    fn get<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R> {
        let value = self.fetch(endpoint, true)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetches the envelope and returns only its `key` collection.
    fn get_field<R: DeserializeOwned>(&self, endpoint: &str, key: &'static str) -> Result<R> {
        let mut value = self.fetch(endpoint, true)?;
        let field = value
            .get_mut(key)
            .map(Value::take)
            .ok_or(DecodeError::MissingField(key))?;
        Ok(serde_json::from_value(field)?)
    }

    /// `/swagger/docs/v3`, the only anonymous endpoint
    pub fn get_docs(&self) -> Result<Value> {
        self.fetch("/swagger/docs/v3", false)
    }

    pub fn get_all_routes(&self, params: &RouteParameters) -> Result<Vec<Route>> {
        self.get_field(&params.to_query().append_to("/v3/routes"), "routes")
    }

    pub fn get_all_route_types(&self) -> Result<Vec<RouteType>> {
        self.get_field("/v3/route_types", "route_types")
    }

    /// Disruptions grouped by mode
    pub fn get_all_disruptions(&self, params: &DisruptionParameters) -> Result<Disruptions> {
        self.get_field(&params.to_query().append_to("/v3/disruptions"), "disruptions")
    }

    pub fn get_all_disruption_modes(&self) -> Result<Vec<DisruptionMode>> {
        self.get_field("/v3/disruptions/modes", "disruption_modes")
    }

    pub fn get_all_outlets(&self, params: &OutletParameters) -> Result<Vec<Outlet>> {
        self.get_field(&params.to_query().append_to("/v3/outlets"), "outlets")
    }

    /// `params` are sent with the request. The client this API was first wrapped by built them
    /// and then left them off; which behaviour the API owner intends is unconfirmed.
    pub fn get_search_results(
        &self,
        search_term: &str,
        params: &SearchParameters,
    ) -> Result<SearchResult> {
        let endpoint = format!("/v3/search/{}", encode_component(search_term));
        self.get(&params.to_query().append_to(&endpoint))
    }

    /// Departures at a stop, optionally restricted to one route.
    pub fn get_departures(
        &self,
        stop_id: u64,
        route_type: u32,
        route_id: Option<u64>,
        params: &DepartureParameters,
    ) -> Result<DeparturesResponse> {
        let endpoint = match route_id {
            Some(route_id) => format!(
                "/v3/departures/route_type/{route_type}/stop/{stop_id}/route/{route_id}"
            ),
            None => format!("/v3/departures/route_type/{route_type}/stop/{stop_id}"),
        };
        self.get(&params.to_query().append_to(&endpoint))
    }

    /// Disruptions for a route, a stop, both, or neither.
    pub fn get_disruptions(
        &self,
        route_id: Option<u64>,
        stop_id: Option<u64>,
        params: &DisruptionParameters,
    ) -> Result<DisruptionsResponse> {
        let endpoint = match (route_id, stop_id) {
            (None, None) => "/v3/disruptions".to_owned(),
            (None, Some(stop_id)) => format!("/v3/disruptions/stop/{stop_id}"),
            (Some(route_id), None) => format!("/v3/disruptions/route/{route_id}"),
            (Some(route_id), Some(stop_id)) => {
                format!("/v3/disruptions/route/{route_id}/stop/{stop_id}")
            }
        };
        self.get(&params.to_query().append_to(&endpoint))
    }

    pub fn get_disruption_info(&self, disruption_id: u64) -> Result<DisruptionResponse> {
        self.get(&format!("/v3/disruptions/{disruption_id}"))
    }

    pub fn get_fare_estimate(&self, min_zone: u32, max_zone: u32) -> Result<FareEstimateResponse> {
        self.get(&format!(
            "/v3/fare_estimate/min_zone/{min_zone}/max_zone/{max_zone}"
        ))
    }

    pub fn get_nearby_outlets(
        &self,
        latitude: f64,
        longitude: f64,
        params: &OutletGeolocationParameters,
    ) -> Result<OutletsResponse> {
        let endpoint = format!("/v3/outlets/location/{latitude},{longitude}");
        self.get(&params.to_query().append_to(&endpoint))
    }

    pub fn get_route_info(&self, route_id: u64) -> Result<RouteResponse> {
        self.get(&format!("/v3/routes/{route_id}"))
    }

    pub fn get_route_directions(&self, route_id: u64) -> Result<DirectionsResponse> {
        self.get(&format!("/v3/directions/route/{route_id}"))
    }

    pub fn get_route_runs(&self, route_id: u64, route_type: Option<u32>) -> Result<RunsResponse> {
        let endpoint = match route_type {
            Some(route_type) => format!("/v3/runs/route/{route_id}/route_type/{route_type}"),
            None => format!("/v3/runs/route/{route_id}"),
        };
        self.get(&endpoint)
    }

    pub fn get_route_stops(&self, route_id: u64, route_type: u32) -> Result<StopsResponse> {
        self.get(&format!(
            "/v3/stops/route/{route_id}/route_type/{route_type}"
        ))
    }

    pub fn get_direction_info(
        &self,
        direction_id: u64,
        route_type: Option<u32>,
    ) -> Result<DirectionsResponse> {
        let endpoint = match route_type {
            Some(route_type) => format!("/v3/directions/{direction_id}/route_type/{route_type}"),
            None => format!("/v3/directions/{direction_id}"),
        };
        self.get(&endpoint)
    }

    /// Every run sharing `run_ref`, across modes
    pub fn get_run_info(&self, run_ref: &str) -> Result<RunsResponse> {
        self.get(&format!("/v3/runs/{}", encode_component(run_ref)))
    }

    pub fn get_run_info_for_route_type(&self, run_ref: &str, route_type: u32) -> Result<RunResponse> {
        self.get(&format!(
            "/v3/runs/{}/route_type/{route_type}",
            encode_component(run_ref)
        ))
    }

    pub fn get_stop_info(&self, stop_id: u64, route_type: u32) -> Result<StopResponse> {
        self.get(&format!("/v3/stops/{stop_id}/route_type/{route_type}"))
    }

    pub fn get_nearby_stops(
        &self,
        latitude: f64,
        longitude: f64,
        params: &StopsByDistanceParameters,
    ) -> Result<StopsResponse> {
        let endpoint = format!("/v3/stops/location/{latitude},{longitude}");
        self.get(&params.to_query().append_to(&endpoint))
    }
}
