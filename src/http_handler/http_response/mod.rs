pub(crate) mod flight_list;
pub(crate) mod modem_list;
pub(crate) mod response_common;
pub(crate) mod update;
