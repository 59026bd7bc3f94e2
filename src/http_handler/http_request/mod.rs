pub(crate) mod flights_get;
pub(crate) mod modems_get;
pub(crate) mod request_common;
pub(crate) mod update_post;
