use super::super::common::Modem;
use super::response_common::SerdeJSONBodyHTTPResponseType;

/// Response type for the /meta/modems endpoint, a bare JSON array of modems.
#[derive(serde::Deserialize, Debug)]
#[serde(transparent)]
pub(crate) struct ModemListResponse {
    modems: Vec<Modem>,
}

impl SerdeJSONBodyHTTPResponseType for ModemListResponse {}

impl ModemListResponse {
    pub(crate) fn into_modems(self) -> Vec<Modem> { self.modems }
}
