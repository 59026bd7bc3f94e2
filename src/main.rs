#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod balloon;
mod http_handler;
mod logger;

use crate::balloon::session::BalloonSession;
use crate::http_handler::http_client::HTTPClient;
use std::{env, sync::Arc, time::Duration};

const DEFAULT_BASE_URL: &str = "https://borealis.rci.montana.edu/api";
const POLL_INTERVAL: Duration = Duration::from_secs(10);

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let base_url_var = env::var("BOREALIS_BASE_URL");
    let base_url = base_url_var.as_ref().map_or(DEFAULT_BASE_URL, |v| v.as_str());
    let client = Arc::new(HTTPClient::new(base_url));

    let mut session = match BalloonSession::init(Arc::clone(&client)).await {
        Ok(session) => session,
        Err(err) if err.is_no_connection() => {
            fatal!("No internet connection detected, please connect and relaunch ({err})")
        }
        Err(err) => fatal!("Could not load modem catalog: {err}"),
    };

    info!("Reporting modems:");
    for title in session.modem_titles() {
        log!("  {title}");
    }

    let modem_arg = env::args().nth(1).or_else(|| env::var("BOREALIS_MODEM").ok());
    let Some(identifier) = modem_arg else {
        fatal!("No modem given, pass a label as first argument or set BOREALIS_MODEM")
    };

    if let Err(err) = session.select_modem(&identifier).await {
        fatal!("Could not select modem {identifier}: {err}");
    }
    if let Some(modem) = session.selected_modem() {
        info!("Balloon {} selected", modem.list_name());
    }
    if let Some((uid, date)) = session.active_flight() {
        event!("Tracking flight {uid} launched {date}");
    }
    match session.info_summary().await {
        Ok(summary) => info!("{summary}"),
        Err(err) => error!("Could not fetch the flight summary: {err}"),
    }

    loop {
        tokio::time::sleep(POLL_INTERVAL).await;
        match session.time_delta().await {
            Ok(0) => event!("No new point yet"),
            Ok(delta) => {
                if let Some(point) = session.last_point() {
                    let (lat, lng, alt) = point.coor_alt();
                    info!("New point after {delta}s: ({lat}, {lng}) at {alt}m");
                    event!(
                        "flight {}: vertical velocity {} m/s, ground speed {} m/s, {} satellites",
                        point.uid(),
                        point.vertical_velocity(),
                        point.ground_speed(),
                        point.satellites()
                    );
                }
            }
            Err(err) if err.is_no_connection() => {
                fatal!("Lost connection to the Borealis service ({err})")
            }
            Err(err) => warn!("Update poll failed: {err}"),
        }
    }
}
