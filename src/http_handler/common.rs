use super::http_request::request_common::RequestError;
use super::http_response::response_common::ResponseError;
use strum_macros::Display;

/// One radio/tracker unit known to the Borealis service.
///
/// `name` is the unique catalog key; `partial_imei` is a short identifying
/// fragment that is not globally unique by itself.
#[derive(serde::Deserialize, Debug, Clone)]
pub(crate) struct Modem {
    name: String,
    #[serde(default, rename = "partialImei")]
    partial_imei: String,
    #[serde(default)]
    org: String,
}

impl Modem {
    pub(crate) fn name(&self) -> &str { &self.name }
    pub(crate) fn org(&self) -> &str { &self.org }

    /// The display label shown to operators, e.g. `(12345) BOREALIS-01`.
    pub(crate) fn list_name(&self) -> String { format!("({}) {}", self.partial_imei, self.name) }
}

/// One recorded flight of a modem, as returned by the flight-list endpoint.
#[derive(serde::Deserialize, Debug, Clone)]
pub(crate) struct Flight {
    uid: u64,
    date: String,
}

impl Flight {
    pub(crate) fn uid(&self) -> u64 { self.uid }
    pub(crate) fn date(&self) -> &str { &self.date }
}

/// One telemetry sample of a flight.
///
/// `uid` and `timestamp` are mandatory on the wire; every other field
/// defaults to zero when the service omits it.
#[derive(serde::Deserialize, Debug, Clone)]
pub(crate) struct FlightPoint {
    uid: u64,
    #[serde(rename = "datetime")]
    timestamp: i64,
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    longitude: f64,
    #[serde(default)]
    altitude: f64,
    #[serde(default)]
    vertical_velocity: f64,
    #[serde(default)]
    ground_speed: f64,
    #[serde(default)]
    satellites: u32,
    #[serde(default)]
    input_pins: u32,
    #[serde(default)]
    output_pins: u32,
}

impl FlightPoint {
    pub(crate) fn uid(&self) -> u64 { self.uid }
    pub(crate) fn timestamp(&self) -> i64 { self.timestamp }
    pub(crate) fn vertical_velocity(&self) -> f64 { self.vertical_velocity }
    pub(crate) fn ground_speed(&self) -> f64 { self.ground_speed }
    pub(crate) fn satellites(&self) -> u32 { self.satellites }

    /// Position triple (latitude, longitude, altitude).
    pub(crate) fn coor_alt(&self) -> (f64, f64, f64) {
        (self.latitude, self.longitude, self.altitude)
    }
}

#[derive(Debug, Display)]
pub(crate) enum HTTPError {
    HTTPRequestError(RequestError),
    HTTPResponseError(ResponseError),
}

impl std::error::Error for HTTPError {}

impl From<RequestError> for HTTPError {
    fn from(value: RequestError) -> Self { HTTPError::HTTPRequestError(value) }
}

impl From<ResponseError> for HTTPError {
    fn from(value: ResponseError) -> Self { HTTPError::HTTPResponseError(value) }
}

impl HTTPError {
    /// True when the failure was reaching the service at all, as opposed to
    /// the service answering with an error.
    pub(crate) fn is_no_connection(&self) -> bool {
        matches!(
            self,
            HTTPError::HTTPRequestError(RequestError::NoConnection)
                | HTTPError::HTTPResponseError(ResponseError::NoConnection)
        )
    }
}
