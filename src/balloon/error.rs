use crate::http_handler::common::HTTPError;
use std::fmt;

/// Failure modes of a [`BalloonSession`](super::session::BalloonSession)
/// operation.
///
/// "No update yet" is deliberately not in here; polling operations report it
/// as `Ok(None)` / `Ok(0)`.
#[derive(Debug)]
pub(crate) enum BalloonError {
    /// The requested identifier is not in the modem catalog.
    ModemNotFound(String),
    /// The selected modem has no recorded flights.
    NoFlightsAvailable(String),
    /// The selected flight produced no point within the baseline window.
    NoActivePoint,
    /// A query operation was called before any modem was selected.
    NoModemSelected,
    /// The service returned a point older than the one already tracked.
    OutOfOrderPoint { last: i64, current: i64 },
    /// Transport or service failure.
    Http(HTTPError),
}

impl fmt::Display for BalloonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalloonError::ModemNotFound(name) => {
                write!(f, "{name} is not a valid modem")
            }
            BalloonError::NoFlightsAvailable(name) => {
                write!(f, "modem {name} has no recorded flights")
            }
            BalloonError::NoActivePoint => {
                write!(f, "no recent flight point, check that the flight is active")
            }
            BalloonError::NoModemSelected => write!(f, "no modem selected"),
            BalloonError::OutOfOrderPoint { last, current } => {
                write!(f, "service returned out-of-order point ({current} < {last})")
            }
            BalloonError::Http(err) => write!(f, "request failed: {err}"),
        }
    }
}

impl std::error::Error for BalloonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BalloonError::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HTTPError> for BalloonError {
    fn from(value: HTTPError) -> Self { BalloonError::Http(value) }
}

impl BalloonError {
    /// True when the underlying cause was failing to reach the service.
    pub(crate) fn is_no_connection(&self) -> bool {
        matches!(self, BalloonError::Http(err) if err.is_no_connection())
    }
}
