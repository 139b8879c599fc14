//! [`TelegramBotAdapter`] against a mock Bot API server.
//!
//! Teloxide request path format is `/bot<token>/<method>`.

use mockito::Matcher;
use recap_bot::{deliver, Bot, Chat, DbotError, TelegramBotAdapter};

const TEST_BOT_TOKEN: &str = "test_bot_token_12345";

const SENT_MESSAGE_BODY: &str = r#"{
    "ok": true,
    "result": {
        "message_id": 1,
        "date": 1706529600,
        "chat": {"id": 777, "type": "private"},
        "from": {"id": 123456789, "is_bot": true, "first_name": "RecapBot", "username": "recapbot"},
        "text": "ok"
    }
}"#;

fn adapter(server: &mockito::ServerGuard) -> TelegramBotAdapter {
    let url = reqwest::Url::parse(&server.url()).unwrap();
    TelegramBotAdapter::new(teloxide::Bot::new(TEST_BOT_TOKEN).set_api_url(url))
}

#[tokio::test]
async fn test_send_message_posts_chat_id_and_text() {
    let mut server = mockito::Server::new_async().await;
    let send = server
        .mock("POST", format!("/bot{}/sendMessage", TEST_BOT_TOKEN).as_str())
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""chat_id":777"#.into()),
            Matcher::Regex(r#""text":"Hello channel""#.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SENT_MESSAGE_BODY)
        .expect(1)
        .create_async()
        .await;

    adapter(&server)
        .send_message(&Chat::private(777), "Hello channel")
        .await
        .unwrap();

    send.assert_async().await;
}

#[tokio::test]
async fn test_long_reply_is_sent_as_several_messages() {
    let mut server = mockito::Server::new_async().await;
    let send = server
        .mock("POST", format!("/bot{}/sendMessage", TEST_BOT_TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SENT_MESSAGE_BODY)
        .expect(3)
        .create_async()
        .await;

    let text = "x".repeat(9000);
    let sent = deliver(&adapter(&server), &Chat::private(777), &text, 4000)
        .await
        .unwrap();

    assert_eq!(sent, 3);
    send.assert_async().await;
}

#[tokio::test]
async fn test_api_error_maps_to_bot_error() {
    let mut server = mockito::Server::new_async().await;
    let _send = server
        .mock("POST", format!("/bot{}/sendMessage", TEST_BOT_TOKEN).as_str())
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#)
        .create_async()
        .await;

    let err = adapter(&server)
        .send_message(&Chat::private(777), "hi")
        .await
        .unwrap_err();

    assert!(matches!(err, DbotError::Bot(ref msg) if msg.contains("chat not found")));
}
