//! Tests for [`openai_client::OpenAIClient::chat_completion`] against a mock OpenAI-compatible server,
//! plus [`openai_client::mask_token`] behavior used when logging keys.

use openai_client::{mask_token, ChatCompletionRequestUserMessageArgs, OpenAIClient};

fn user_message(text: &str) -> openai_client::ChatCompletionRequestMessage {
    ChatCompletionRequestUserMessageArgs::default()
        .content(text)
        .build()
        .unwrap()
        .into()
}

const COMPLETION_BODY: &str = r#"{
    "id": "chatcmpl-1",
    "object": "chat.completion",
    "created": 1700000000,
    "model": "gpt-4o-mini",
    "choices": [{
        "index": 0,
        "message": {"role": "assistant", "content": "Three releases were announced."},
        "finish_reason": "stop"
    }],
    "usage": {"prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17}
}"#;

/// **Test: The first choice's content is returned unmodified.**
#[tokio::test]
async fn chat_completion_returns_first_choice_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(COMPLETION_BODY)
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("sk-test-key-123456".to_string(), server.url());
    let reply = client
        .chat_completion("gpt-4o-mini", vec![user_message("What happened?")])
        .await
        .unwrap();

    assert_eq!(reply, "Three releases were announced.");
    mock.assert_async().await;
}

/// **Test: A response without choices is reported as an error.**
#[tokio::test]
async fn chat_completion_without_choices_is_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id":"chatcmpl-2","object":"chat.completion","created":1700000000,"model":"m","choices":[]}"#,
        )
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("sk-test-key-123456".to_string(), server.url());
    let err = client
        .chat_completion("m", vec![user_message("hi")])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No response"));
}

/// **Test: An API error response propagates as an error.**
#[tokio::test]
async fn chat_completion_api_error_propagates() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"error":{"message":"model not found","type":"invalid_request_error","param":null,"code":null}}"#,
        )
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("sk-test-key-123456".to_string(), server.url());
    let result = client.chat_completion("missing", vec![user_message("hi")]).await;
    assert!(result.is_err());
}

/// **Test: Short keys are fully masked; long keys show 7-char head and 4-char tail.**
#[test]
fn mask_token_hides_middle_of_key() {
    assert_eq!(mask_token(""), "***");
    assert_eq!(mask_token("sk-short"), "***");
    assert_eq!(mask_token("sk-ant-api03-abcdefgh"), "sk-ant-***efgh");
    let masked = mask_token("sk-proj-1234567890abcdefghijklmnopqrstuvwxyz");
    assert_eq!(masked.len(), 7 + 3 + 4);
}
