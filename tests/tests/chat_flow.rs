use application::{ChatController, ReplySource};
use domain::{
    ChatTransport, ChatTurn, Intent, LoanSuggestion, ResponsePayload, Role, TransportError,
    HISTORY_WINDOW,
};
use infrastructure::{Config, HttpTransport};
use presentation::cli::{Cli, CliApp};
use presentation::screen::ChatScreen;
use std::time::Duration;
use tests::{start_stub, start_stub_with_health, StubReply};

fn mortgage() -> LoanSuggestion {
    LoanSuggestion {
        id: "home_plus".into(),
        name: "HomePlus Mortgage".into(),
        description: "Flexible home loan.".into(),
        min_amount: 50_000,
        max_amount: 750_000,
        interest_rate: 6.25,
        term_months: vec![180, 360],
        eligibility: vec!["Credit score 680+".into()],
    }
}

async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/chat/respond")
}

#[tokio::test]
async fn server_reply_is_shown_verbatim() {
    let stub = start_stub(StubReply::text("Consider an emergency fund first.")).await;
    let transport = HttpTransport::new(&stub.chat_url()).unwrap();
    let mut controller = ChatController::seeded(transport, 1);

    let reply = controller.submit("where do I start?").await.unwrap();

    assert_eq!(reply.source, ReplySource::Server);
    assert_eq!(reply.content, "Consider an emergency fund first.");
    let requests = stub.state.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].message, "where do I start?");
    assert!(requests[0].history.is_empty());
}

#[tokio::test]
async fn server_error_status_falls_back() {
    let stub = start_stub(StubReply::Raw {
        status: 500,
        body: "{\"detail\":\"boom\"}".into(),
    })
    .await;
    let transport = HttpTransport::new(&stub.chat_url()).unwrap();

    let err = transport.send_message("hi", &[]).await.unwrap_err();
    assert!(matches!(err, TransportError::Status { status: 500, .. }));

    let mut controller = ChatController::seeded(transport, 4);
    let reply = controller.submit("help me with my debt").await.unwrap();
    assert_eq!(reply.source, ReplySource::Fallback);
    assert_eq!(reply.intent, Some(Intent::Help));
    assert!(Intent::Help.pool().contains(&reply.content.as_str()));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let stub = start_stub(StubReply::Raw {
        status: 200,
        body: "{\"answer\":\"wrong field\"}".into(),
    })
    .await;
    let transport = HttpTransport::new(&stub.chat_url()).unwrap();

    let err = transport.send_message("hi", &[]).await.unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)));

    let mut controller = ChatController::seeded(transport, 2);
    let reply = controller.submit("I want to invest").await.unwrap();
    assert_eq!(reply.intent, Some(Intent::Investment));
}

#[tokio::test]
async fn unreachable_backend_answers_locally() {
    let transport = HttpTransport::new(&closed_port_url().await).unwrap();
    assert!(!transport.probe_health().await);

    let mut controller = ChatController::seeded(transport, 8);
    let reply = controller.submit("xyz123").await.unwrap();

    assert_eq!(reply.source, ReplySource::Fallback);
    assert_eq!(reply.intent, Some(Intent::Default));
    assert_eq!(controller.session().len(), 2);
    assert_eq!(controller.session().turns()[1].role(), Role::Assistant);
}

#[tokio::test]
async fn history_window_is_last_eight_turns_oldest_first() {
    let stub = start_stub(StubReply::text("noted")).await;
    let transport = HttpTransport::new(&stub.chat_url()).unwrap();
    let mut controller = ChatController::seeded(transport, 1);

    for i in 0..9 {
        controller.submit(&format!("turn {i}")).await.unwrap();
    }

    let requests = stub.state.requests();
    assert_eq!(requests.len(), 9);
    let last = &requests[8];
    assert_eq!(last.message, "turn 8");
    assert_eq!(last.history.len(), HISTORY_WINDOW);
    assert_eq!(last.history[0], ChatTurn::user("turn 4"));
    assert_eq!(last.history[1], ChatTurn::assistant("noted"));
    assert_eq!(last.history[HISTORY_WINDOW - 2], ChatTurn::user("turn 7"));
}

#[tokio::test]
async fn suggestions_pass_through() {
    let payload = ResponsePayload {
        reply: "Here are some options.".into(),
        suggestions: vec![mortgage()],
        source: Some("rule".into()),
    };
    let stub = start_stub(StubReply::Json(payload)).await;
    let transport = HttpTransport::new(&stub.chat_url()).unwrap();
    let mut controller = ChatController::seeded(transport, 1);

    let reply = controller.submit("I need a home loan").await.unwrap();

    assert_eq!(reply.source, ReplySource::Server);
    assert_eq!(reply.suggestions, vec![mortgage()]);
}

#[tokio::test]
async fn recovered_backend_is_used_again() {
    let stub = start_stub(StubReply::Raw {
        status: 503,
        body: String::new(),
    })
    .await;
    let transport = HttpTransport::new(&stub.chat_url()).unwrap();
    let mut controller = ChatController::seeded(transport, 5);

    let first = controller.submit("hello").await.unwrap();
    assert_eq!(first.source, ReplySource::Fallback);

    stub.state.set_reply(StubReply::text("Back online."));
    let second = controller.submit("hello again").await.unwrap();
    assert_eq!(second.source, ReplySource::Server);
    assert_eq!(second.content, "Back online.");

    let requests = stub.state.requests();
    assert_eq!(requests[1].history.len(), 2);
    assert_eq!(requests[1].history[1].content(), first.content);
}

#[tokio::test]
async fn health_probe_reflects_backend_status() {
    let healthy = start_stub(StubReply::text("ok")).await;
    let transport = HttpTransport::new(&healthy.chat_url()).unwrap();
    assert!(transport.probe_health().await);

    let degraded = start_stub_with_health(StubReply::text("ok"), false).await;
    let transport = HttpTransport::new(&degraded.chat_url()).unwrap();
    assert!(!transport.probe_health().await);
}

fn one_shot_app(endpoint: String, seed: u64) -> CliApp {
    let cli = Cli {
        endpoint: Some(endpoint),
        seed: Some(seed),
        ..Cli::default()
    };
    let mut config = Config::default();
    cli.apply(&mut config);
    CliApp::with_config(config)
}

#[tokio::test]
async fn one_shot_prints_server_reply_and_suggestions() {
    let payload = ResponsePayload {
        reply: "A fixed-rate mortgage could suit you.".into(),
        suggestions: vec![mortgage()],
        source: Some("llm".into()),
    };
    let stub = start_stub(StubReply::Json(payload)).await;
    let app = one_shot_app(stub.chat_url(), 1);
    let mut screen = ChatScreen::new(Vec::new(), Duration::ZERO);

    app.answer_once("should I buy a house?", &mut screen).await.unwrap();

    let output = String::from_utf8(screen.into_inner()).unwrap();
    assert!(output.contains("A fixed-rate mortgage could suit you."));
    assert!(output.contains("HomePlus Mortgage"));
    assert!(output.contains("$50,000 to $750,000"));
    assert_eq!(stub.state.requests()[0].message, "should I buy a house?");
}

#[tokio::test]
async fn one_shot_answers_locally_when_backend_is_down() {
    let app = one_shot_app(closed_port_url().await, 6);
    let mut screen = ChatScreen::new(Vec::new(), Duration::ZERO);

    app.answer_once("how do I save more", &mut screen).await.unwrap();

    let output = String::from_utf8(screen.into_inner()).unwrap();
    assert!(Intent::Savings
        .pool()
        .iter()
        .any(|reply| output.contains(reply)));
}

#[tokio::test]
async fn one_shot_rejects_blank_message() {
    let stub = start_stub(StubReply::text("unused")).await;
    let app = one_shot_app(stub.chat_url(), 1);
    let mut screen = ChatScreen::new(Vec::new(), Duration::ZERO);

    assert!(app.answer_once("   ", &mut screen).await.is_err());
    assert!(stub.state.requests().is_empty());
}
