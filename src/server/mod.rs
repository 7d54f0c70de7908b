//! HTTP surface: shared state, router, and the three request handlers.
//!
//! Each handler is a stateless request→response transform with at most one
//! outbound provider call. Expected failures are mapped to JSON envelopes at
//! this boundary; nothing is retried.

mod envelope;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::client::{TwilioClient, TwilioError};
use crate::domain::{DeliveryReceipt, MessageText, OutboundSms, RawPhoneNumber, SenderNumber};
use envelope::{
    EmergencyFailed, EmergencySent, HealthBody, RequestFailed, SmsRequest, TestSent,
    TestSmsRequest,
};

const MISSING_EMERGENCY_FIELDS: &str = "Missing required fields: to and message";
const MISSING_TEST_FIELD: &str = "Missing required field: to";
const TEST_MESSAGE_BODY: &str = "This is a test message from the emergency SMS relay.";

#[derive(Clone)]
/// Read-only state shared by all handlers: the provider client and the
/// configured sender number, both injected at construction time.
pub struct AppState {
    client: TwilioClient,
    sender: SenderNumber,
}

impl AppState {
    pub fn new(client: TwilioClient, sender: SenderNumber) -> Self {
        Self { client, sender }
    }
}

/// Build the relay's router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/send-emergency-sms", post(send_emergency_sms))
        .route("/test-sms", post(send_test_sms))
        .with_state(state)
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody::now())
}

async fn send_emergency_sms(
    State(state): State<AppState>,
    Json(request): Json<SmsRequest>,
) -> Response {
    let to = request.to.clone().unwrap_or_default();
    let message = request.message.clone().unwrap_or_default();
    let (Ok(to), Ok(message)) = (RawPhoneNumber::new(to), MessageText::new(message)) else {
        return validation_failure(MISSING_EMERGENCY_FIELDS);
    };

    let to = to.normalized();
    tracing::info!(
        to = to.raw(),
        contact = request.contact_name.as_deref().unwrap_or("unknown"),
        has_location = request.has_location.unwrap_or(false),
        "forwarding emergency sms"
    );

    let sms = OutboundSms::new(to.clone(), state.sender.clone(), message);
    match state.client.send_message(sms).await {
        Ok(receipt) => {
            tracing::info!(
                sid = receipt.sid.as_str(),
                status = receipt.status.as_str(),
                "provider accepted emergency sms"
            );
            (StatusCode::OK, Json(EmergencySent::new(&receipt, &to))).into_response()
        }
        Err(err) => {
            log_provider_failure(&err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(EmergencyFailed::from_error(&err)),
            )
                .into_response()
        }
    }
}

async fn send_test_sms(
    State(state): State<AppState>,
    Json(request): Json<TestSmsRequest>,
) -> Response {
    let Ok(to) = RawPhoneNumber::new(request.to.unwrap_or_default()) else {
        return validation_failure(MISSING_TEST_FIELD);
    };

    // The test path sends the number exactly as received; only the emergency
    // path normalizes.
    tracing::info!(to = to.raw(), "forwarding test sms");
    match dispatch_test(&state, to).await {
        Ok(receipt) => (StatusCode::OK, Json(TestSent::new(&receipt))).into_response(),
        Err(err) => {
            log_provider_failure(&err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RequestFailed::from_error(&err)),
            )
                .into_response()
        }
    }
}

async fn dispatch_test(
    state: &AppState,
    to: RawPhoneNumber,
) -> Result<DeliveryReceipt, TwilioError> {
    let body = MessageText::new(TEST_MESSAGE_BODY)?;
    let sms = OutboundSms::new(to, state.sender.clone(), body);
    state.client.send_message(sms).await
}

fn validation_failure(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(RequestFailed::validation(message)),
    )
        .into_response()
}

fn log_provider_failure(err: &TwilioError) {
    match err {
        TwilioError::Api { code, message, .. } => {
            if code.is_auth_error() {
                tracing::error!(
                    code = code.as_i64(),
                    detail = %message,
                    "provider rejected the account credentials"
                );
            } else if code.is_retryable() {
                tracing::warn!(
                    code = code.as_i64(),
                    detail = %message,
                    "provider temporarily refused the message"
                );
            } else {
                tracing::error!(
                    code = code.as_i64(),
                    detail = %message,
                    "provider rejected the message"
                );
            }
        }
        other => tracing::error!(error = %other, "message-create call failed"),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, header};
    use mockito::Matcher;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::client::Credentials;

    use super::*;

    const MESSAGES_PATH: &str = "/2010-04-01/Accounts/ACtest/Messages.json";

    /// An api_base that refuses connections; used by tests that must not
    /// reach the provider.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn app(api_base: &str) -> Router {
        let client = TwilioClient::builder(Credentials::from_parts("ACtest", "secret").unwrap())
            .api_base(api_base)
            .build()
            .unwrap();
        router(AppState::new(
            client,
            SenderNumber::new("+15550009999").unwrap(),
        ))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn health_reports_status_and_parseable_timestamp() {
        let (status, body) = send(app(UNREACHABLE), "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn emergency_rejects_empty_body() {
        let (status, body) =
            send(app(UNREACHABLE), "POST", "/send-emergency-sms", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], MISSING_EMERGENCY_FIELDS);
    }

    #[tokio::test]
    async fn emergency_rejects_empty_message() {
        let (status, body) = send(
            app(UNREACHABLE),
            "POST",
            "/send-emergency-sms",
            Some(json!({"to": "5551234567", "message": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn emergency_normalizes_and_relays_the_provider_receipt() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", MESSAGES_PATH)
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("To".into(), "+15551234567".into()),
                Matcher::UrlEncoded("From".into(), "+15550009999".into()),
                Matcher::UrlEncoded("Body".into(), "help".into()),
            ]))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sid": "SM123", "status": "queued"}"#)
            .create_async()
            .await;

        let (status, body) = send(
            app(&server.url()),
            "POST",
            "/send-emergency-sms",
            Some(json!({
                "to": "5551234567",
                "message": "help",
                "contactName": "Alice",
                "hasLocation": true
            })),
        )
        .await;

        mock.assert_async().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["messageSid"], "SM123");
        assert_eq!(body["status"], "queued");
        assert_eq!(body["to"], "+15551234567");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn emergency_surfaces_the_provider_error_code() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", MESSAGES_PATH)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                r#"
                {
                  "code": 21211,
                  "message": "The 'To' number is not a valid phone number.",
                  "more_info": "https://www.twilio.com/docs/errors/21211",
                  "status": 400
                }
                "#,
            )
            .create_async()
            .await;

        let (status, body) = send(
            app(&server.url()),
            "POST",
            "/send-emergency-sms",
            Some(json!({"to": "not a number", "message": "help"})),
        )
        .await;

        mock.assert_async().await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], 21211);
        assert_eq!(body["error"], "The 'To' number is not a valid phone number.");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_endpoint_rejects_missing_to() {
        let (status, body) = send(app(UNREACHABLE), "POST", "/test-sms", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], MISSING_TEST_FIELD);
    }

    #[tokio::test]
    async fn test_endpoint_sends_the_fixed_body_without_normalizing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", MESSAGES_PATH)
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("To".into(), "5551234567".into()),
                Matcher::UrlEncoded("Body".into(), TEST_MESSAGE_BODY.into()),
            ]))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sid": "SM456", "status": "queued"}"#)
            .create_async()
            .await;

        let (status, body) = send(
            app(&server.url()),
            "POST",
            "/test-sms",
            Some(json!({"to": "5551234567"})),
        )
        .await;

        mock.assert_async().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["messageSid"], "SM456");
        assert_eq!(body["message"], "Test SMS sent successfully");
    }

    #[tokio::test]
    async fn test_endpoint_surfaces_provider_failures() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", MESSAGES_PATH)
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code": 20003, "message": "Authentication Error - invalid username", "status": 401}"#)
            .create_async()
            .await;

        let (status, body) = send(
            app(&server.url()),
            "POST",
            "/test-sms",
            Some(json!({"to": "+15551234567"})),
        )
        .await;

        mock.assert_async().await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Authentication Error - invalid username");
    }
}
