use super::super::http_response::update::UpdateResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the /update endpoint.
#[derive(serde::Serialize, Debug)]
pub(crate) struct UpdateRequest {
    /// The uid of the flight being tracked.
    pub(crate) uid: u64,
    /// Cutoff time in epoch seconds; only points newer than this are returned.
    pub(crate) datetime: i64,
}

impl JSONBodyHTTPRequestType for UpdateRequest {
    /// The type of the json body.
    type Body = UpdateRequest;
    /// Returns the serializable object.
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for UpdateRequest {
    type Response = UpdateResponse;
    fn endpoint(&self) -> &'static str { "/update" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
