use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use leads_core::{
    config::DeliveryConfig, DeliveryError, FormSession, FormKind, Notifier, Outcome,
    TelegramNotifier,
};
use parking_lot::Mutex;
use std::{net::SocketAddr, sync::Arc};

#[derive(Clone)]
struct StubChat {
    status: StatusCode,
    received: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

async fn send_message(
    State(stub): State<StubChat>,
    Path(bot): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> StatusCode {
    stub.received.lock().push((bot, body));
    stub.status
}

async fn spawn_stub(status: StatusCode) -> (SocketAddr, StubChat) {
    let stub = StubChat {
        status,
        received: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/:bot/sendMessage", post(send_message))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, stub)
}

fn delivery_config(addr: SocketAddr) -> DeliveryConfig {
    DeliveryConfig {
        api_base_url: format!("http://{}/", addr),
        bot_token: "4242-secret".to_string(),
        chat_id: "-100777".to_string(),
        request_timeout_seconds: 5,
    }
}

#[tokio::test]
async fn test_posts_chat_id_and_text_to_bot_endpoint() {
    let (addr, stub) = spawn_stub(StatusCode::OK).await;
    let notifier = TelegramNotifier::new(&delivery_config(addr)).unwrap();

    notifier.deliver("hello there").await.unwrap();

    let received = stub.received.lock();
    assert_eq!(received.len(), 1);
    let (bot, body) = &received[0];
    assert_eq!(bot, "bot4242-secret");
    assert_eq!(body["chat_id"], "-100777");
    assert_eq!(body["text"], "hello there");
}

#[tokio::test]
async fn test_non_success_status_is_rejected() {
    let (addr, stub) = spawn_stub(StatusCode::BAD_REQUEST).await;
    let notifier = TelegramNotifier::new(&delivery_config(addr)).unwrap();

    let result = notifier.deliver("hello").await;

    assert!(matches!(result, Err(DeliveryError::Rejected(400))));
    assert_eq!(stub.received.lock().len(), 1);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let notifier = TelegramNotifier::new(&delivery_config(addr)).unwrap();
    let result = notifier.deliver("hello").await;

    assert!(matches!(result, Err(DeliveryError::Transport(_))));
}

#[tokio::test]
async fn test_session_delivers_rendered_contact_message() {
    let (addr, stub) = spawn_stub(StatusCode::OK).await;
    let notifier = TelegramNotifier::new(&delivery_config(addr)).unwrap();

    let session = FormSession::new(FormKind::Contact, 10);
    session.set_field("name", "  Ann  ");
    session.set_field("email", "ann@example.com");
    session.set_field("subject", "Quote");
    session.set_field("message", "Need a landing page built.");

    let report = session.submit(&notifier).await.unwrap();
    assert_eq!(report.outcome, Outcome::Delivered);
    assert_eq!(session.cooldown_remaining(), 10);

    let received = stub.received.lock();
    assert_eq!(
        received[0].1["text"],
        "📩 NEW CONTACT MESSAGE\n\n👤 Name: Ann\n📧 Email: ann@example.com\n📌 Subject: Quote\n📝 Message: Need a landing page built."
    );
}

#[tokio::test]
async fn test_session_reports_failure_when_endpoint_rejects() {
    let (addr, _stub) = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR).await;
    let notifier = TelegramNotifier::new(&delivery_config(addr)).unwrap();

    let session = FormSession::new(FormKind::Contact, 10);
    session.set_field("name", "Ann");
    session.set_field("email", "ann@example.com");
    session.set_field("subject", "Quote");
    session.set_field("message", "Need a landing page built.");

    let report = session.submit(&notifier).await.unwrap();
    assert_eq!(report.outcome, Outcome::DeliveryFailed);
    assert_eq!(report.toast.title, "Failed to Send");
    assert_eq!(session.fields().get("name"), "Ann");
    assert_eq!(session.cooldown_remaining(), 10);
}
