use docchat::core::action::{Action, Effect, Request, update};
use docchat::core::controller::perform;
use docchat::core::file_list::FileRow;
use docchat::core::state::App;
use docchat::core::transcript::EntryBody;
use docchat::gateway::{FileEntry, Gateway, GatewayError, HttpGateway, UploadFile};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string_contains, header_regex, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// An address nothing is listening on.
fn dead_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Applies `action` and performs dispatched requests until the chain settles.
async fn drive(app: &mut App, gateway: &dyn Gateway, action: Action) -> Effect {
    let mut effect = update(app, action);
    while let Effect::Dispatch(request) = effect {
        effect = update(app, perform(gateway, request).await);
    }
    effect
}

fn message_texts(app: &App) -> Vec<String> {
    app.transcript
        .entries()
        .iter()
        .filter_map(|e| match &e.body {
            EntryBody::Message { text, .. } => Some(text.clone()),
            EntryBody::Note(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

// ============================================================================
// GET /files
// ============================================================================

#[tokio::test]
async fn test_list_files_accepts_both_entry_shapes() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [
                "plain.pdf",
                { "name": "report.pdf", "size": "1.2 KB", "url": "/raw_files/report.pdf" }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(mock_server.uri());
    let files = gateway.list_files().await.unwrap();

    assert_eq!(files.len(), 2);
    assert_eq!(files[0], FileEntry::named("plain.pdf"));
    assert_eq!(files[1].name, "report.pdf");
    assert_eq!(files[1].size.as_deref(), Some("1.2 KB"));
    assert_eq!(
        files[1].url.as_deref(),
        Some(format!("{}/raw_files/report.pdf", mock_server.uri()).as_str())
    );
}

#[tokio::test]
async fn test_list_files_empty() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": [] })))
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(format!("{}/", mock_server.uri()));
    assert!(gateway.list_files().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_files_malformed_body_is_transport() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(mock_server.uri());
    assert!(matches!(
        gateway.list_files().await,
        Err(GatewayError::Transport(_))
    ));
}

// ============================================================================
// POST /ingest
// ============================================================================

#[tokio::test]
async fn test_upload_sends_multipart_file_field() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"policy.pdf\""))
        .and(body_string_contains("application/pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "suggestions": ["1. What is covered?", "2. How do I claim?"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(mock_server.uri());
    let receipt = gateway
        .upload_file(UploadFile {
            name: "policy.pdf".to_string(),
            bytes: b"%PDF-1.4 test".to_vec(),
        })
        .await
        .unwrap();

    assert_eq!(
        receipt.suggestions,
        Some(vec![
            "1. What is covered?".to_string(),
            "2. How do I claim?".to_string()
        ])
    );
}

#[tokio::test]
async fn test_upload_server_error_carries_detail() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "Could not parse PDF" })),
        )
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(mock_server.uri());
    let err = gateway
        .upload_file(UploadFile {
            name: "broken.pdf".to_string(),
            bytes: vec![0, 1, 2],
        })
        .await
        .unwrap_err();

    match err {
        GatewayError::Server { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "Could not parse PDF");
        }
        other => panic!("expected a server failure, got {other:?}"),
    }
}

// ============================================================================
// POST /ask
// ============================================================================

#[tokio::test]
async fn test_ask_posts_question_json() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .and(body_json(json!({ "question": "What is the refund policy?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Refunds are issued within 14 days.",
            "citations": [
                { "source": "policy.pdf", "page": 3, "content": "Refunds are issued within 14 days of purchase." }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(mock_server.uri());
    let answer = gateway.ask("What is the refund policy?").await.unwrap();

    assert_eq!(answer.answer, "Refunds are issued within 14 days.");
    let citations = answer.citations.unwrap();
    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].source, "policy.pdf");
    assert_eq!(citations[0].page, Some(3));
}

#[tokio::test]
async fn test_ask_without_citations() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "No idea." })))
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(mock_server.uri());
    let answer = gateway.ask("?").await.unwrap();
    assert_eq!(answer.answer, "No idea.");
    assert!(answer.citations.is_none());
}

#[tokio::test]
async fn test_ask_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(mock_server.uri());
    match gateway.ask("hello").await {
        Err(GatewayError::Server { status, detail }) => {
            assert_eq!(status, 500);
            assert_eq!(detail, "internal error");
        }
        other => panic!("expected a server failure, got {other:?}"),
    }
}

// ============================================================================
// DELETE /reset
// ============================================================================

#[tokio::test]
async fn test_reset_success_ignores_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/reset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "reset" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(mock_server.uri());
    assert!(gateway.reset_all().await.is_ok());
}

#[tokio::test]
async fn test_reset_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/reset"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(mock_server.uri());
    match gateway.reset_all().await {
        // Empty body falls back to the status reason
        Err(GatewayError::Server { status, detail }) => {
            assert_eq!(status, 500);
            assert_eq!(detail, "Internal Server Error");
        }
        other => panic!("expected a server failure, got {other:?}"),
    }
}

// ============================================================================
// Transport failures
// ============================================================================

#[tokio::test]
async fn test_unreachable_backend_is_transport_failure() {
    let gateway = HttpGateway::new(dead_address());
    assert!(matches!(
        gateway.list_files().await,
        Err(GatewayError::Transport(_))
    ));
    assert!(matches!(
        gateway.ask("anyone there?").await,
        Err(GatewayError::Transport(_))
    ));
    assert!(matches!(
        gateway.reset_all().await,
        Err(GatewayError::Transport(_))
    ));
}

// ============================================================================
// End-to-end flows through the reducer
// ============================================================================

#[tokio::test]
async fn test_startup_and_ask_flow() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{ "name": "policy.pdf", "size": "2 KB", "url": "/raw_files/policy.pdf" }]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Refunds take 14 days.",
            "citations": [{ "source": "policy.pdf", "page": 3, "content": "short" }]
        })))
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(mock_server.uri());
    let mut app = App::new(mock_server.uri());

    drive(&mut app, &gateway, Action::Init).await;
    assert_eq!(app.files.file_count(), 1);
    assert!(matches!(&app.files.rows()[0], FileRow::File(f) if f.name == "policy.pdf"));

    app.input = "What is the refund policy?".to_string();
    let effect = drive(&mut app, &gateway, Action::SubmitQuestion).await;
    assert_eq!(effect, Effect::FocusInput);
    assert!(app.controls_enabled());
    assert_eq!(app.transcript.placeholder_count(), 0);

    let last = app.transcript.entries().last().unwrap();
    match &last.body {
        EntryBody::Message { text, citations } => {
            assert_eq!(text, "Refunds take 14 days.");
            assert_eq!(citations, &vec!["- [policy.pdf p.3] short...".to_string()]);
        }
        other => panic!("expected an answer, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reset_failure_restores_file_list() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/reset"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": ["a.pdf"] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(mock_server.uri());
    let mut app = App::new(mock_server.uri());

    drive(&mut app, &gateway, Action::RequestReset).await;
    let effect = update(&mut app, Action::ResolveConfirmation(true));
    assert_eq!(effect, Effect::Dispatch(Request::Reset));
    drive_effect(&mut app, &gateway, effect).await;

    assert_eq!(app.alert.as_deref(), Some("Failed to reset system."));
    assert_eq!(app.files.file_count(), 1);
    assert!(!message_texts(&app).iter().any(|t| t.contains("reset successfully")));
}

#[tokio::test]
async fn test_upload_failure_reports_inline_without_refresh() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Only PDF files are supported." })),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": [] })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = std::env::temp_dir().join(format!("docchat-upload-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("notes.txt");
    std::fs::write(&file, "hello").unwrap();

    let gateway = HttpGateway::new(mock_server.uri());
    let mut app = App::new(mock_server.uri());
    drive(&mut app, &gateway, Action::FileChosen(Some(file))).await;

    assert_eq!(
        message_texts(&app),
        vec!["❌ Upload failed: Only PDF files are supported.".to_string()]
    );
}

/// Continues a chain from an already-computed effect.
async fn drive_effect(app: &mut App, gateway: &dyn Gateway, mut effect: Effect) -> Effect {
    while let Effect::Dispatch(request) = effect {
        effect = update(app, perform(gateway, request).await);
    }
    effect
}
