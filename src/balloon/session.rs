use super::error::BalloonError;
use crate::http_handler::common::{FlightPoint, Modem};
use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_request::{
    flights_get::FlightListRequest,
    modems_get::ModemListRequest,
    request_common::{JSONBodyHTTPRequestType, NoBodyHTTPRequestType},
    update_post::UpdateRequest,
};
use crate::warn;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Lookback window for the baseline point fetched right after selection.
const BASELINE_WINDOW_SECS: i64 = 3600;

static LIST_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d*\) (.+)$").unwrap());

/// The modem, flight and last observed point currently being tracked.
///
/// All three belong together: bundling them keeps a failed re-selection from
/// leaving the session half-updated.
#[derive(Debug)]
struct Selection {
    modem: Modem,
    flight_uid: u64,
    flight_date: String,
    last_point: FlightPoint,
}

/// A tracking session against the Borealis service.
///
/// Holds the modem catalog loaded at init, the current [`Selection`] (if
/// any), and the request client shared with the rest of the application.
/// `last_point` only ever advances; every poll asks the service for points
/// newer than it and adopts the freshest one returned.
#[derive(Debug)]
pub(crate) struct BalloonSession {
    request_client: Arc<HTTPClient>,
    modem_catalog: HashMap<String, Modem>,
    selection: Option<Selection>,
}

impl BalloonSession {
    /// Fetches the modem catalog and builds a session around it.
    ///
    /// This is the only implicit network access the session performs; it is
    /// an explicit init step so a connectivity failure surfaces as an error
    /// instead of a half-built session.
    pub(crate) async fn init(request_client: Arc<HTTPClient>) -> Result<Self, BalloonError> {
        let modems =
            ModemListRequest {}.send_request(&request_client).await?.into_modems();
        let modem_catalog =
            modems.into_iter().map(|m| (m.name().to_string(), m)).collect();
        Ok(BalloonSession { request_client, modem_catalog, selection: None })
    }

    /// Operator-facing labels of all reporting modems, sorted.
    pub(crate) fn modem_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> =
            self.modem_catalog.values().map(Modem::list_name).collect();
        titles.sort();
        titles
    }

    /// Binds the session to a modem and loads its most recent flight plus a
    /// baseline point from the last hour.
    ///
    /// Accepts either a bare catalog name or an operator-facing label of the
    /// form `(<partialImei>) <name>`. Session state is only replaced once
    /// every fetch has succeeded, so a failed selection leaves the previous
    /// one intact.
    pub(crate) async fn select_modem(&mut self, identifier: &str) -> Result<(), BalloonError> {
        let name = LIST_NAME_REGEX
            .captures(identifier)
            .and_then(|c| c.get(1))
            .map_or(identifier, |m| m.as_str());
        let modem = self
            .modem_catalog
            .get(name)
            .cloned()
            .ok_or_else(|| BalloonError::ModemNotFound(name.to_string()))?;

        let flight = FlightListRequest { modem_name: modem.name().to_string() }
            .send_request(&self.request_client)
            .await?
            .into_latest_flight()
            .ok_or_else(|| BalloonError::NoFlightsAvailable(name.to_string()))?;

        let since = chrono::Utc::now().timestamp() - BASELINE_WINDOW_SECS;
        let baseline = self
            .get_update(flight.uid(), since)
            .await?
            .ok_or(BalloonError::NoActivePoint)?;

        self.selection = Some(Selection {
            modem,
            flight_uid: flight.uid(),
            flight_date: flight.date().to_string(),
            last_point: baseline,
        });
        Ok(())
    }

    /// Asks the service for points of flight `uid` newer than `since` and
    /// returns the freshest one, or `None` when nothing new exists yet.
    async fn get_update(
        &self,
        uid: u64,
        since: i64,
    ) -> Result<Option<FlightPoint>, BalloonError> {
        let response = UpdateRequest { uid, datetime: since }
            .send_request(&self.request_client)
            .await?;
        Ok(response.into_latest_point())
    }

    fn tracked(&self) -> Result<(u64, i64), BalloonError> {
        self.selection
            .as_ref()
            .map(|sel| (sel.flight_uid, sel.last_point.timestamp()))
            .ok_or(BalloonError::NoModemSelected)
    }

    /// Current best-known position (latitude, longitude, altitude),
    /// refreshed against the service first if a newer point exists.
    pub(crate) async fn position(&mut self) -> Result<(f64, f64, f64), BalloonError> {
        let (uid, last_ts) = self.tracked()?;
        if let Some(point) = self.get_update(uid, last_ts).await? {
            if point.timestamp() >= last_ts {
                if let Some(sel) = self.selection.as_mut() {
                    sel.last_point = point;
                }
            } else {
                warn!(
                    "Ignoring out-of-order point ({} < {last_ts})",
                    point.timestamp()
                );
            }
        }
        let sel = self.selection.as_ref().ok_or(BalloonError::NoModemSelected)?;
        Ok(sel.last_point.coor_alt())
    }

    /// Seconds elapsed between the tracked point and the newest available
    /// one, advancing tracking to the newer point.
    ///
    /// Returns `Ok(0)` and leaves the session untouched when the service has
    /// nothing newer. An out-of-order point is a data-integrity error and
    /// does not advance tracking.
    pub(crate) async fn time_delta(&mut self) -> Result<i64, BalloonError> {
        let (uid, last_ts) = self.tracked()?;
        let Some(point) = self.get_update(uid, last_ts).await? else {
            return Ok(0);
        };
        let delta = point.timestamp() - last_ts;
        if delta < 0 {
            return Err(BalloonError::OutOfOrderPoint {
                last: last_ts,
                current: point.timestamp(),
            });
        }
        if let Some(sel) = self.selection.as_mut() {
            sel.last_point = point;
        }
        Ok(delta)
    }

    /// Human-readable block describing the tracked modem, flight and
    /// position, refreshed like [`Self::position`].
    pub(crate) async fn info_summary(&mut self) -> Result<String, BalloonError> {
        let (lat, lng, alt) = self.position().await?;
        let sel = self.selection.as_ref().ok_or(BalloonError::NoModemSelected)?;
        Ok(format!(
            "Modem: {}, org: {}\nDate: {}\nCoordinates: ({lat}, {lng})\nAltitude: {alt}\nBalloon selected!",
            sel.modem.list_name(),
            sel.modem.org(),
            sel.flight_date,
        ))
    }

    pub(crate) fn selected_modem(&self) -> Option<&Modem> {
        self.selection.as_ref().map(|sel| &sel.modem)
    }

    pub(crate) fn active_flight(&self) -> Option<(u64, &str)> {
        self.selection.as_ref().map(|sel| (sel.flight_uid, sel.flight_date.as_str()))
    }

    pub(crate) fn last_point(&self) -> Option<&FlightPoint> {
        self.selection.as_ref().map(|sel| &sel.last_point)
    }
}
