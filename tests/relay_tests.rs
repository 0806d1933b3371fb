//! # Relay Handler Tests
//!
//! Drive the relay router in-process and check status codes, JSON bodies,
//! CORS headers, and what reaches the printer socket.

mod common;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use common::{closed_port, fake_printer, ticket_json};
use ticket_relay::PrinterConfig;
use ticket_relay::server::{AppState, RelayConfig, router};

fn app_with_printer(ip: &str, port: u16) -> Router {
    let config = RelayConfig {
        default_printer: PrinterConfig {
            ip: ip.to_string(),
            port,
            timeout: 1000,
            ..Default::default()
        },
        ..Default::default()
    };
    router(Arc::new(AppState::new(config)))
}

fn app() -> Router {
    router(Arc::new(AppState::new(RelayConfig::default())))
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: impl Into<Body>,
) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// ============================================================================
// SERVICE ROUTES
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(), Method::GET, "/health", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "service": "printer-service" }));
}

#[tokio::test]
async fn test_cors_headers_on_every_response() {
    let response = app()
        .oneshot(Request::get("/nowhere").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let headers = response.headers();

    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET, POST, PUT, OPTIONS"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn test_options_preflight_any_path() {
    for uri in ["/api/printer/print/daypass", "/does/not/exist"] {
        let (status, body) = send(app(), Method::OPTIONS, uri, Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
    }
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (status, body) = send(app(), Method::GET, "/api/printer/list", Body::empty()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn test_wrong_method_is_json_404() {
    let (status, body) =
        send(app(), Method::GET, "/api/printer/print/daypass", Body::empty()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not found" }));

    let (status, _) =
        send(app(), Method::DELETE, "/api/printer/config/printer1", Body::empty()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// PRINTER CONFIG AND CONNECTIVITY
// ============================================================================

#[tokio::test]
async fn test_get_config_returns_default_for_any_id() {
    for id in ["printer1", "printer7"] {
        let uri = format!("/api/printer/config/{}", id);
        let (status, body) = send(app(), Method::GET, &uri, Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "printer1");
        assert_eq!(body["ip"], "192.168.192.168");
        assert_eq!(body["port"], 9100);
        assert_eq!(body["isDefault"], true);
    }
}

#[tokio::test]
async fn test_undecodable_printer_id_still_served() {
    let (status, body) = send(app(), Method::GET, "/api/printer/config/%FF", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "printer1");

    let (status, body) = send(app(), Method::PUT, "/api/printer/config/%FF", "{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "printer configuration updated successfully" })
    );

    let app = app_with_printer("127.0.0.1", closed_port().await);
    let (status, body) = send(app, Method::POST, "/api/printer/test/%FF", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["connected"], false);
}

#[tokio::test]
async fn test_put_config_is_acknowledged_not_stored() {
    let update = json!({ "ip": "10.0.0.50", "port": 9101 }).to_string();
    let (status, body) = send(app(), Method::PUT, "/api/printer/config/printer1", update).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "printer configuration updated successfully" })
    );

    let (_, config) = send(app(), Method::GET, "/api/printer/config/printer1", Body::empty()).await;
    assert_eq!(config["ip"], "192.168.192.168");
}

#[tokio::test]
async fn test_connection_unreachable_is_200() {
    let app = app_with_printer("127.0.0.1", closed_port().await);
    let (status, body) = send(app, Method::POST, "/api/printer/test/printer1", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "connected": false, "error": "Could not connect to printer" })
    );
}

#[tokio::test]
async fn test_connection_reachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let app = app_with_printer("127.0.0.1", port);
    let (status, body) = send(app, Method::POST, "/api/printer/test/any", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "connected": true, "error": "" }));
}

// ============================================================================
// PRINTING
// ============================================================================

#[tokio::test]
async fn test_print_day_pass() {
    let (port, printer) = fake_printer().await;
    let app = app_with_printer("127.0.0.1", port);

    let body = ticket_json(r#", "totalAmount": 2, "routeName": "Monastir""#);
    let (status, response) = send(app, Method::POST, "/api/printer/print/daypass", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({ "message": "day pass ticket printed successfully" })
    );

    let received = printer.await.unwrap();
    assert_eq!(&received[..2], &[0x1B, 0x40]);
    assert!(received.ends_with(&[0x0A, 0x0A, 0x0A, 0x1D, 0x56, 0x00]));

    let text = String::from_utf8(received[2..received.len() - 6].to_vec()).unwrap();
    assert!(text.starts_with("================================\n  STE DHRAIFF SERVICES\n"));
    assert!(text.contains("   PASS JOURNÉE"));
    assert!(text.contains("Route: Monastir"));
    assert!(text.contains("Montant: 2.00 TND"));
    assert!(text.contains("Date: 19/10/2026 08:05"));
}

#[tokio::test]
async fn test_print_exit_pass_to_ticket_printer() {
    let (port, printer) = fake_printer().await;
    // The default printer is unreachable; the ticket names its own.
    let app = app_with_printer("127.0.0.1", closed_port().await);

    let body = ticket_json(&format!(
        r#", "totalAmount": 21.2, "basePrice": 2.5, "seatNumber": 8, "vehicleCapacity": 8,
            "printerConfig": {{ "ip": "127.0.0.1", "port": {} }}"#,
        port
    ));
    let (status, response) = send(app, Method::POST, "/api/printer/print/exitpass", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({ "message": "exit pass ticket printed successfully" })
    );

    let text = String::from_utf8(printer.await.unwrap()).unwrap();
    assert!(text.contains("AUTORISATION SORTIE"));
    assert!(text.contains("Frais de service: 1.20 TND"));
    assert!(text.contains("Montant Total: 21.20 TND"));
}

#[tokio::test]
async fn test_print_missing_total_amount_is_500() {
    let app = app_with_printer("127.0.0.1", closed_port().await);
    let (status, body) =
        send(app, Method::POST, "/api/printer/print/daypass", ticket_json("")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("totalAmount"));
}

#[tokio::test]
async fn test_print_invalid_json_is_500() {
    let (status, body) =
        send(app(), Method::POST, "/api/printer/print/exitpass", "{not json").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_print_printer_down_is_500() {
    let app = app_with_printer("127.0.0.1", closed_port().await);
    let body = ticket_json(r#", "totalAmount": 2"#);
    let (status, response) = send(app, Method::POST, "/api/printer/print/daypass", body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        response["error"]
            .as_str()
            .unwrap()
            .starts_with("Connection failed")
    );
}
