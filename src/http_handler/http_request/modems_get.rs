use super::super::http_response::modem_list::ModemListResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

#[derive(Debug)]
pub(crate) struct ModemListRequest {}

impl NoBodyHTTPRequestType for ModemListRequest {}

impl HTTPRequestType for ModemListRequest {
    type Response = ModemListResponse;
    fn endpoint(&self) -> &'static str { "/meta/modems" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
