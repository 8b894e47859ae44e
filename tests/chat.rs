mod common;

use common::{inference_config, Reply, StubServer};
use opportunity_finder::chat::error::{
    CONFIGURATION_ISSUE_MESSAGE, GENERIC_ERROR_MESSAGE, HIGH_TRAFFIC_MESSAGE, TIMEOUT_MESSAGE,
};
use opportunity_finder::config::InferenceMode;
use opportunity_finder::{ChatClient, ChatError, ChatMessage};

fn conversation() -> Vec<ChatMessage> {
    vec![
        ChatMessage::user("I'm a second-year CS student. Any open-source programs?"),
        ChatMessage::assistant("Google Summer of Code is a good start."),
        ChatMessage::user("What about paid internships?"),
    ]
}

async fn reply_for(reply: Reply, mode: InferenceMode) -> String {
    let stub = StubServer::start(reply).await;
    let client = ChatClient::new(&inference_config(&stub.url, mode, Some("hf_test"))).unwrap();
    client.generate_response(&conversation()).await.unwrap()
}

#[tokio::test]
async fn test_missing_token_fails_before_request() {
    let stub = StubServer::start(Reply::raw(200, "[]")).await;

    for token in [None, Some(""), Some("   ")] {
        let client =
            ChatClient::new(&inference_config(&stub.url, InferenceMode::TextGeneration, token))
                .unwrap();
        let err = client.generate_response(&conversation()).await.unwrap_err();
        assert!(matches!(err, ChatError::MissingToken));
    }

    assert_eq!(stub.hits(), 0);
}

#[tokio::test]
async fn test_rate_limit_yields_high_traffic_message() {
    for mode in [InferenceMode::TextGeneration, InferenceMode::ChatCompletion] {
        let reply = reply_for(Reply::raw(429, r#"{"error":"Rate limit reached"}"#), mode).await;
        assert_eq!(reply, HIGH_TRAFFIC_MESSAGE);
    }
    assert_eq!(
        HIGH_TRAFFIC_MESSAGE,
        "I'm currently experiencing high traffic. Please try again in a moment."
    );
}

#[tokio::test]
async fn test_unauthorized_yields_configuration_message() {
    let reply = reply_for(
        Reply::raw(401, r#"{"error":"Invalid credentials"}"#),
        InferenceMode::TextGeneration,
    )
    .await;
    assert_eq!(reply, CONFIGURATION_ISSUE_MESSAGE);
}

#[tokio::test]
async fn test_other_failures_yield_generic_message() {
    let server_error = reply_for(
        Reply::raw(503, r#"{"error":"Model is loading"}"#),
        InferenceMode::TextGeneration,
    )
    .await;
    assert_eq!(server_error, GENERIC_ERROR_MESSAGE);

    let wrong_shape = reply_for(
        Reply::raw(200, r#"{"generated_text":"not wrapped in a list"}"#),
        InferenceMode::TextGeneration,
    )
    .await;
    assert_eq!(wrong_shape, GENERIC_ERROR_MESSAGE);

    let no_choices = reply_for(
        Reply::raw(200, r#"{"choices":[]}"#),
        InferenceMode::ChatCompletion,
    )
    .await;
    assert_eq!(no_choices, GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_unreachable_endpoint_yields_generic_message() {
    let client = ChatClient::new(&inference_config(
        "http://127.0.0.1:9/generate",
        InferenceMode::TextGeneration,
        Some("hf_test"),
    ))
    .unwrap();
    let reply = client.generate_response(&conversation()).await.unwrap();
    assert_eq!(reply, GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_timeout_yields_timed_out_message() {
    let stub = StubServer::start(Reply::Hang).await;
    let mut config = inference_config(&stub.url, InferenceMode::ChatCompletion, Some("hf_test"));
    config.timeout_seconds = 1;
    let client = ChatClient::new(&config).unwrap();

    let err = client.complete(&conversation()).await.unwrap_err();
    assert!(matches!(err, ChatError::Timeout));

    let reply = client.generate_response(&conversation()).await.unwrap();
    assert_eq!(reply, TIMEOUT_MESSAGE);
}

#[tokio::test]
async fn test_text_generation_request_and_reply() {
    let generated = serde_json::json!([{
        "generated_text": "You are OppGenie...\nUser: What about paid internships?\nAssistant: Look at the Microsoft Explore program.\nUser: and"
    }]);
    let stub = StubServer::start(Reply::json(200, generated)).await;
    let client = ChatClient::new(&inference_config(
        &stub.url,
        InferenceMode::TextGeneration,
        Some("hf_test"),
    ))
    .unwrap();

    let reply = client.generate_response(&conversation()).await.unwrap();
    assert_eq!(reply, "Look at the Microsoft Explore program.");

    let request = stub.requests().remove(0);
    assert!(request.starts_with("POST / HTTP/1.1"));
    assert!(request.to_lowercase().contains("authorization: bearer hf_test"));

    let body: serde_json::Value =
        serde_json::from_str(request.split("\r\n\r\n").nth(1).unwrap()).unwrap();
    let inputs = body["inputs"].as_str().unwrap();
    assert!(inputs.starts_with("You are OppGenie"));
    assert!(inputs.contains("User: What about paid internships?\nAssistant:"));
    assert_eq!(body["parameters"]["max_new_tokens"], 500);
    assert_eq!(body["parameters"]["do_sample"], true);
}

#[tokio::test]
async fn test_chat_completion_request_and_reply() {
    let completion = serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": "  Try the GitHub Externship.  " } }]
    });
    let stub = StubServer::start(Reply::json(200, completion)).await;
    let client = ChatClient::new(&inference_config(
        &stub.url,
        InferenceMode::ChatCompletion,
        Some("hf_test"),
    ))
    .unwrap();

    let reply = client.generate_response(&conversation()).await.unwrap();
    assert_eq!(reply, "Try the GitHub Externship.");

    let request = stub.requests().remove(0);
    let body: serde_json::Value =
        serde_json::from_str(request.split("\r\n\r\n").nth(1).unwrap()).unwrap();
    assert_eq!(body["model"], "test-model");
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["role"], "system");
    assert!(messages[0]["content"]
        .as_str()
        .unwrap()
        .starts_with("You are OppGenie"));
    assert_eq!(messages[2]["role"], "assistant");
    assert_eq!(messages[3]["content"], "What about paid internships?");
}
