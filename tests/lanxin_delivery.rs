//! End-to-end delivery tests for the Lanxin bot against a mock webhook.

use beacon::payload::LanxinMessage;
use beacon::prelude::*;
use beacon::{LANXIN_BOT_NAME, signature};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Helpers
// =============================================================================

async fn webhook(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/bot/hook/messages/create"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

fn hook_url(server: &MockServer) -> String {
    format!("{}/v1/bot/hook/messages/create?hook_token=abc", server.uri())
}

/// Wait until the server has seen `count` requests and decode them.
async fn delivered(server: &MockServer, count: usize) -> Vec<LanxinMessage> {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);

    loop {
        let requests = server.received_requests().await.unwrap_or_default();
        if requests.len() >= count {
            return requests
                .iter()
                .map(|r| serde_json::from_slice(&r.body).unwrap())
                .collect();
        }

        assert!(
            tokio::time::Instant::now() < deadline,
            "expected {count} requests, got {}",
            requests.len()
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

// =============================================================================
// Delivery
// =============================================================================

#[tokio::test]
async fn test_messages_arrive_in_send_order() {
    let server = webhook(200, r#"{"code":0,"msg":"ok"}"#).await;
    let bot = LanxinBot::new("secret", hook_url(&server), "").unwrap();
    let shutdown = CancellationToken::new();
    bot.start(shutdown.clone()).unwrap();

    for i in 0..5 {
        bot.send_msg(&Msg::new(format!("bulletin {i}"))).await.unwrap();
    }

    let messages = delivered(&server, 5).await;
    let contents: Vec<_> = messages.iter().map(|m| m.content()).collect();
    assert_eq!(
        contents,
        vec!["bulletin 0", "bulletin 1", "bulletin 2", "bulletin 3", "bulletin 4"]
    );

    shutdown.cancel();
}

#[tokio::test]
async fn test_envelope_is_signed_and_formatted() {
    let server = webhook(200, r#"{"code":0}"#).await;
    let bot = LanxinBot::new("test-secret", hook_url(&server), "").unwrap();
    let shutdown = CancellationToken::new();
    bot.start(shutdown.clone()).unwrap();

    let msg = Msg::new("CVE-2024-3094")
        .with_summary("Backdoor in xz")
        .with_link("https://nvd.nist.gov/vuln/detail/CVE-2024-3094");
    bot.send_msg(&msg).await.unwrap();

    let message = &delivered(&server, 1).await[0];
    let timestamp: i64 = message.timestamp.parse().unwrap();

    assert_eq!(message.msg_type, "text");
    assert_eq!(message.content(), format_msg(&msg));
    assert_eq!(
        message.content(),
        "CVE-2024-3094\nSummary: Backdoor in xz\nLink: https://nvd.nist.gov/vuln/detail/CVE-2024-3094"
    );
    assert_eq!(message.sign, signature::sign("test-secret", timestamp).unwrap());

    shutdown.cancel();
}

#[tokio::test]
async fn test_repeated_message_is_signed_per_send() {
    let server = webhook(200, r#"{"code":0}"#).await;
    let bot = LanxinBot::new("secret", hook_url(&server), "").unwrap();
    let shutdown = CancellationToken::new();
    bot.start(shutdown.clone()).unwrap();

    let msg = Msg::new("same text");
    bot.send_msg(&msg).await.unwrap();
    delivered(&server, 1).await;
    tokio::time::sleep(Duration::from_millis(1100)).await;
    bot.send_msg(&msg).await.unwrap();

    let messages = delivered(&server, 2).await;
    assert_eq!(messages[0].content(), messages[1].content());
    assert_ne!(messages[0].timestamp, messages[1].timestamp);
    assert_ne!(messages[0].sign, messages[1].sign);

    shutdown.cancel();
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_remote_rejection_does_not_reach_caller() {
    let server = webhook(500, r#"{"code":59001,"msg":"bot disabled"}"#).await;
    let bot = LanxinBot::new("secret", hook_url(&server), "").unwrap();
    let mut failures = bot.subscribe_failures();
    let shutdown = CancellationToken::new();
    bot.start(shutdown.clone()).unwrap();

    bot.send_msg(&Msg::new("hello")).await.unwrap();

    let failure = tokio::time::timeout(Duration::from_secs(10), failures.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(failure.bot, LANXIN_BOT_NAME);
    assert_eq!(failure.code, Some(59001));
    assert!(failure.message.contains("bot 已停用"));

    // The worker keeps going after a failure.
    bot.send_msg(&Msg::new("again")).await.unwrap();
    delivered(&server, 2).await;

    shutdown.cancel();
}

#[tokio::test]
async fn test_unreachable_webhook_is_reported() {
    let bot = LanxinBot::new("secret", "http://127.0.0.1:1/hook", "").unwrap();
    let mut failures = bot.subscribe_failures();
    let shutdown = CancellationToken::new();
    bot.start(shutdown.clone()).unwrap();

    bot.send_msg(&Msg::new("hello")).await.unwrap();

    let failure = tokio::time::timeout(Duration::from_secs(10), failures.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(failure.code, None);

    shutdown.cancel();
}

#[test]
fn test_malformed_proxy_fails_construction() {
    let err = LanxinBot::new("secret", "https://hook.example.com", "ftp://proxy:21").unwrap_err();
    assert!(matches!(err, BotError::Client(_)));
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_cancelled_bot_stops_accepting() {
    let bot = LanxinBot::new("secret", "https://hook.example.com", "").unwrap();
    let shutdown = CancellationToken::new();
    bot.start(shutdown.clone()).unwrap();
    shutdown.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), bot.send_msg(&Msg::new("late")))
        .await
        .unwrap();
    assert!(matches!(result, Err(BotError::Stopped)));
}

#[tokio::test]
async fn test_abandoned_send_is_never_delivered() {
    let server = webhook(200, r#"{"code":0}"#).await;
    let bot = LanxinBot::new("secret", hook_url(&server), "").unwrap();

    let gave_up =
        tokio::time::timeout(Duration::from_millis(50), bot.send_msg(&Msg::new("abandoned"))).await;
    assert!(gave_up.is_err());

    let shutdown = CancellationToken::new();
    bot.start(shutdown.clone()).unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert!(server.received_requests().await.unwrap_or_default().is_empty());

    shutdown.cancel();
}

#[tokio::test]
async fn test_start_twice_is_rejected() {
    let bot = LanxinBot::new("secret", "https://hook.example.com", "").unwrap();
    let shutdown = CancellationToken::new();

    bot.start(shutdown.clone()).unwrap();
    assert!(matches!(bot.start(shutdown.clone()), Err(BotError::AlreadyStarted)));

    shutdown.cancel();
}

#[tokio::test]
async fn test_hub_broadcasts_to_lanxin() {
    let first = webhook(200, r#"{"code":0}"#).await;
    let second = webhook(200, r#"{"code":0}"#).await;
    let hub = NotifierHub::new()
        .add(LanxinBot::new("a", hook_url(&first), "").unwrap())
        .add(LanxinBot::new("b", hook_url(&second), "").unwrap());
    let shutdown = CancellationToken::new();
    hub.start_all(&shutdown).unwrap();

    let results = hub.broadcast(&Msg::new("to everyone")).await;
    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(hub.names(), vec![LANXIN_BOT_NAME, LANXIN_BOT_NAME]);

    assert_eq!(delivered(&first, 1).await[0].content(), "to everyone");
    assert_eq!(delivered(&second, 1).await[0].content(), "to everyone");

    shutdown.cancel();
}
