use super::super::http_response::flight_list::FlightListResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Request type for the /meta/flights endpoint.
#[derive(Debug)]
pub(crate) struct FlightListRequest {
    /// Catalog name of the modem whose flights are listed.
    pub(crate) modem_name: String,
}

impl NoBodyHTTPRequestType for FlightListRequest {}

impl HTTPRequestType for FlightListRequest {
    type Response = FlightListResponse;
    fn endpoint(&self) -> &'static str { "/meta/flights" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![("modem_name", self.modem_name.clone())]
    }
}
