use super::super::common::FlightPoint;
use super::response_common::SerdeJSONBodyHTTPResponseType;

/// Response type for the /update endpoint.
#[derive(serde::Deserialize, Debug)]
pub(crate) struct UpdateResponse {
    /// Whether any point newer than the requested cutoff exists.
    update: bool,
    /// The points newer than the cutoff, oldest first. Absent or irrelevant
    /// when `update` is false.
    #[serde(default)]
    result: Vec<FlightPoint>,
}

impl SerdeJSONBodyHTTPResponseType for UpdateResponse {}

impl UpdateResponse {
    /// The freshest point of the batch, or `None` when the service reports
    /// no update. "No update yet" is the normal polling outcome, not an
    /// error.
    pub(crate) fn into_latest_point(mut self) -> Option<FlightPoint> {
        if !self.update {
            return None;
        }
        self.result.pop()
    }
}
