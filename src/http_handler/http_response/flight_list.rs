use super::super::common::Flight;
use super::response_common::SerdeJSONBodyHTTPResponseType;

/// Response type for the /meta/flights endpoint, a bare JSON array of
/// flights ordered chronologically with the most recent flight last.
#[derive(serde::Deserialize, Debug)]
#[serde(transparent)]
pub(crate) struct FlightListResponse {
    flights: Vec<Flight>,
}

impl SerdeJSONBodyHTTPResponseType for FlightListResponse {}

impl FlightListResponse {
    /// Most recent flight of the modem, or `None` when it has never flown.
    pub(crate) fn into_latest_flight(mut self) -> Option<Flight> { self.flights.pop() }
}
