use super::error::BalloonError;
use super::session::BalloonSession;
use crate::http_handler::http_client::HTTPClient;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FLIGHT_UID: u64 = 7;
const T1: i64 = 1_700_000_000;

async fn catalog_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/meta/modems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Foo", "partialImei": "12345", "org": "X"},
            {"name": "Bar", "partialImei": "67890", "org": "Y"},
        ])))
        .mount(&server)
        .await;
    server
}

async fn session_for(server: &MockServer) -> BalloonSession {
    let client = Arc::new(HTTPClient::new(&server.uri()));
    BalloonSession::init(client).await.unwrap()
}

async fn mount_flights(server: &MockServer, modem_name: &str, flights: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/meta/flights"))
        .and(query_param("modem_name", modem_name))
        .respond_with(ResponseTemplate::new(200).set_body_json(flights))
        .mount(server)
        .await;
}

async fn mount_update(server: &MockServer, response: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}

/// Update response matched only for a specific `datetime` cutoff in the
/// request body. Specific mocks must be mounted before any catch-all one.
async fn mount_update_since(server: &MockServer, since: i64, response: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/update"))
        .and(body_partial_json(json!({"datetime": since})))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}

fn point_json(timestamp: i64, lat: f64, lng: f64, alt: f64) -> serde_json::Value {
    json!({
        "uid": FLIGHT_UID,
        "datetime": timestamp,
        "latitude": lat,
        "longitude": lng,
        "altitude": alt,
    })
}

#[tokio::test]
async fn select_then_position_returns_latest_point() {
    let server = catalog_server().await;
    mount_flights(&server, "Foo", json!([{"uid": FLIGHT_UID, "date": "2024-01-01"}])).await;
    mount_update(
        &server,
        json!({"update": true, "result": [point_json(T1, 45.0, -110.0, 1200.0)]}),
    )
    .await;

    let mut session = session_for(&server).await;
    session.select_modem("Foo").await.unwrap();

    assert_eq!(session.position().await.unwrap(), (45.0, -110.0, 1200.0));
    assert_eq!(session.selected_modem().unwrap().name(), "Foo");
    assert_eq!(session.active_flight(), Some((FLIGHT_UID, "2024-01-01")));
    let point = session.last_point().unwrap();
    assert_eq!(point.uid(), FLIGHT_UID);
    assert_eq!(point.timestamp(), T1);
}

#[tokio::test]
async fn selection_takes_the_most_recent_flight_and_point() {
    let server = catalog_server().await;
    mount_flights(
        &server,
        "Foo",
        json!([
            {"uid": 3, "date": "2023-06-15"},
            {"uid": FLIGHT_UID, "date": "2024-01-01"},
        ]),
    )
    .await;
    mount_update(
        &server,
        json!({"update": true, "result": [
            point_json(T1, 45.0, -110.0, 1200.0),
            point_json(T1 + 60, 45.1, -110.1, 1260.0),
        ]}),
    )
    .await;

    let mut session = session_for(&server).await;
    session.select_modem("Foo").await.unwrap();

    assert_eq!(session.active_flight(), Some((FLIGHT_UID, "2024-01-01")));
    assert_eq!(session.last_point().unwrap().timestamp(), T1 + 60);
}

#[tokio::test]
async fn unknown_modem_is_rejected_and_state_kept() {
    let server = catalog_server().await;
    mount_flights(&server, "Foo", json!([{"uid": FLIGHT_UID, "date": "2024-01-01"}])).await;
    mount_update(
        &server,
        json!({"update": true, "result": [point_json(T1, 45.0, -110.0, 1200.0)]}),
    )
    .await;

    let mut session = session_for(&server).await;
    session.select_modem("Foo").await.unwrap();

    let err = session.select_modem("Baz").await.unwrap_err();
    assert!(matches!(err, BalloonError::ModemNotFound(name) if name == "Baz"));
    assert_eq!(session.active_flight(), Some((FLIGHT_UID, "2024-01-01")));
    assert_eq!(session.selected_modem().unwrap().name(), "Foo");
}

#[tokio::test]
async fn display_label_and_bare_name_select_the_same_modem() {
    let server = catalog_server().await;
    mount_flights(&server, "Foo", json!([{"uid": FLIGHT_UID, "date": "2024-01-01"}])).await;
    mount_update(
        &server,
        json!({"update": true, "result": [point_json(T1, 45.0, -110.0, 1200.0)]}),
    )
    .await;

    let mut session = session_for(&server).await;
    session.select_modem("(12345) Foo").await.unwrap();
    let via_label = session.selected_modem().unwrap().name().to_string();

    session.select_modem("Foo").await.unwrap();
    assert_eq!(session.selected_modem().unwrap().name(), via_label);
}

#[tokio::test]
async fn no_flights_means_no_selection() {
    let server = catalog_server().await;
    mount_flights(&server, "Bar", json!([])).await;

    let mut session = session_for(&server).await;
    let err = session.select_modem("Bar").await.unwrap_err();
    assert!(matches!(err, BalloonError::NoFlightsAvailable(name) if name == "Bar"));
    assert!(session.selected_modem().is_none());
}

#[tokio::test]
async fn inactive_flight_yields_no_active_point() {
    let server = catalog_server().await;
    mount_flights(&server, "Foo", json!([{"uid": FLIGHT_UID, "date": "2024-01-01"}])).await;
    mount_update(&server, json!({"update": false})).await;

    let mut session = session_for(&server).await;
    let err = session.select_modem("Foo").await.unwrap_err();
    assert!(matches!(err, BalloonError::NoActivePoint));
    assert!(session.selected_modem().is_none());
}

#[tokio::test]
async fn no_update_returns_zero_delta_and_keeps_the_point() {
    let server = catalog_server().await;
    mount_flights(&server, "Foo", json!([{"uid": FLIGHT_UID, "date": "2024-01-01"}])).await;
    mount_update_since(&server, T1, json!({"update": false})).await;
    mount_update(
        &server,
        json!({"update": true, "result": [point_json(T1, 45.0, -110.0, 1200.0)]}),
    )
    .await;

    let mut session = session_for(&server).await;
    session.select_modem("Foo").await.unwrap();

    assert_eq!(session.time_delta().await.unwrap(), 0);
    assert_eq!(session.last_point().unwrap().timestamp(), T1);
    assert_eq!(session.position().await.unwrap(), (45.0, -110.0, 1200.0));
}

#[tokio::test]
async fn deltas_track_strictly_increasing_timestamps() {
    let t2 = T1 + 45;
    let t3 = t2 + 80;
    let server = catalog_server().await;
    mount_flights(&server, "Foo", json!([{"uid": FLIGHT_UID, "date": "2024-01-01"}])).await;
    mount_update_since(
        &server,
        T1,
        json!({"update": true, "result": [point_json(t2, 45.1, -110.1, 1500.0)]}),
    )
    .await;
    mount_update_since(
        &server,
        t2,
        json!({"update": true, "result": [point_json(t3, 45.2, -110.2, 1900.0)]}),
    )
    .await;
    mount_update_since(&server, t3, json!({"update": false})).await;
    // catch-all serves the baseline fetch, whose cutoff is "now - 1h"
    mount_update(
        &server,
        json!({"update": true, "result": [point_json(T1, 45.0, -110.0, 1200.0)]}),
    )
    .await;

    let mut session = session_for(&server).await;
    session.select_modem("Foo").await.unwrap();
    assert_eq!(session.last_point().unwrap().timestamp(), T1);

    assert_eq!(session.time_delta().await.unwrap(), t2 - T1);
    assert_eq!(session.time_delta().await.unwrap(), t3 - t2);
    assert_eq!(session.time_delta().await.unwrap(), 0);
    assert_eq!(session.last_point().unwrap().timestamp(), t3);
}

#[tokio::test]
async fn out_of_order_point_is_surfaced_not_adopted() {
    let server = catalog_server().await;
    mount_flights(&server, "Foo", json!([{"uid": FLIGHT_UID, "date": "2024-01-01"}])).await;
    mount_update_since(
        &server,
        T1,
        json!({"update": true, "result": [point_json(T1 - 50, 44.9, -109.9, 900.0)]}),
    )
    .await;
    mount_update(
        &server,
        json!({"update": true, "result": [point_json(T1, 45.0, -110.0, 1200.0)]}),
    )
    .await;

    let mut session = session_for(&server).await;
    session.select_modem("Foo").await.unwrap();

    let err = session.time_delta().await.unwrap_err();
    assert!(matches!(
        err,
        BalloonError::OutOfOrderPoint { last, current } if last == T1 && current == T1 - 50
    ));
    assert_eq!(session.last_point().unwrap().timestamp(), T1);
}

#[tokio::test]
async fn missing_telemetry_fields_default_to_zero() {
    let server = catalog_server().await;
    mount_flights(&server, "Foo", json!([{"uid": FLIGHT_UID, "date": "2024-01-01"}])).await;
    mount_update(
        &server,
        json!({"update": true, "result": [{"uid": FLIGHT_UID, "datetime": T1}]}),
    )
    .await;

    let mut session = session_for(&server).await;
    session.select_modem("Foo").await.unwrap();

    assert_eq!(session.position().await.unwrap(), (0.0, 0.0, 0.0));
    let point = session.last_point().unwrap();
    assert_eq!(point.satellites(), 0);
    assert_eq!(point.vertical_velocity(), 0.0);
    assert_eq!(point.ground_speed(), 0.0);
}

#[tokio::test]
async fn modem_titles_are_sorted_display_labels() {
    let server = catalog_server().await;
    let session = session_for(&server).await;
    assert_eq!(session.modem_titles(), vec!["(12345) Foo", "(67890) Bar"]);
}

#[tokio::test]
async fn info_summary_describes_the_tracked_flight() {
    let server = catalog_server().await;
    mount_flights(&server, "Foo", json!([{"uid": FLIGHT_UID, "date": "2024-01-01"}])).await;
    mount_update(
        &server,
        json!({"update": true, "result": [point_json(T1, 45.0, -110.0, 1200.0)]}),
    )
    .await;

    let mut session = session_for(&server).await;
    session.select_modem("Foo").await.unwrap();

    let summary = session.info_summary().await.unwrap();
    assert!(summary.contains("Modem: (12345) Foo, org: X"));
    assert!(summary.contains("Date: 2024-01-01"));
    assert!(summary.contains("Coordinates: (45, -110)"));
    assert!(summary.contains("Altitude: 1200"));
}

#[tokio::test]
async fn query_before_selection_is_a_precondition_error() {
    let server = catalog_server().await;
    let mut session = session_for(&server).await;
    assert!(matches!(
        session.position().await.unwrap_err(),
        BalloonError::NoModemSelected
    ));
    assert!(matches!(
        session.time_delta().await.unwrap_err(),
        BalloonError::NoModemSelected
    ));
}

#[tokio::test]
async fn unreachable_service_reports_no_connection() {
    // A pooled `MockServer::start()` server keeps listening after drop; a
    // builder-created server shuts down, leaving the port genuinely dead.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let client = Arc::new(HTTPClient::new(&uri));
    let err = BalloonSession::init(client).await.unwrap_err();
    assert!(err.is_no_connection());
}
