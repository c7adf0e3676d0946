//! Integration tests for the submit -> pending -> reply flow

mod common;

use common::create_temp_repos;
use opdeck::chats::ChatManager;
use opdeck::responder::{error_reply, MockResponder, Responder, ERROR_REPLY_CONTENT};
use opdeck::store::types::{Message, MessageRole};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn show_me_some_html_yields_code_payload() {
    let (repos, _tmp) = create_temp_repos();
    let manager = ChatManager::new(repos.chats.clone());
    let chat = manager.create_chat(None).expect("create failed");

    let input = "show me some html";
    manager
        .append_message(&chat.id, Message::user(input))
        .expect("append failed");

    let responder = MockResponder::new(5);
    let cancel = CancellationToken::new();
    let reply = responder.respond(input, &cancel).await.expect("respond failed");
    manager
        .append_message(&chat.id, reply)
        .expect("append failed");

    let loaded = manager.find_chat(&chat.id).expect("find failed").unwrap();
    assert_eq!(loaded.messages.len(), 2);
    let reply = &loaded.messages[1];
    assert_eq!(reply.role, MessageRole::Assistant);

    let blocks = reply.code_blocks.as_ref().expect("expected code payload");
    let html = blocks.html.as_deref().expect("expected html block");
    assert!(!html.is_empty());
    assert!(html.contains("<html"));
}

#[tokio::test]
async fn keywordless_input_yields_preview_reply() {
    let responder = MockResponder::new(5);
    let cancel = CancellationToken::new();

    for input in ["take me to example.com", "what's the weather", "hello"] {
        let reply = responder.respond(input, &cancel).await.expect("respond failed");
        assert!(reply.show_preview, "input {:?}", input);
        assert!(reply.code_blocks.is_none());
    }
}

#[tokio::test]
async fn any_case_code_keyword_always_yields_code_reply() {
    let responder = MockResponder::new(5);
    let cancel = CancellationToken::new();

    for input in ["CODE", "give me some Code", "decode this"] {
        let reply = responder.respond(input, &cancel).await.expect("respond failed");
        let blocks = reply.code_blocks.expect("expected code payload");
        assert!(!blocks.is_empty(), "input {:?}", input);
    }
}

#[tokio::test]
async fn cancelled_reply_writes_nothing_into_the_chat() {
    let (repos, _tmp) = create_temp_repos();
    let manager = ChatManager::new(repos.chats.clone());
    let chat = manager.create_chat(None).expect("create failed");

    manager
        .append_message(&chat.id, Message::user("hello"))
        .expect("append failed");

    // The view is torn down while the reply is pending
    let responder = MockResponder::new(10_000);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = responder.respond("hello", &cancel).await;
    assert!(result.is_err());

    // Only the user message was persisted
    let loaded = manager.find_chat(&chat.id).expect("find failed").unwrap();
    assert_eq!(loaded.messages.len(), 1);
    assert_eq!(loaded.messages[0].role, MessageRole::User);
}

#[tokio::test]
async fn failure_path_appends_single_system_message() {
    let (repos, _tmp) = create_temp_repos();
    let manager = ChatManager::new(repos.chats.clone());
    let chat = manager.create_chat(None).expect("create failed");

    manager
        .append_message(&chat.id, Message::user("hello"))
        .expect("append failed");
    manager
        .append_message(&chat.id, error_reply())
        .expect("append failed");

    let loaded = manager.find_chat(&chat.id).expect("find failed").unwrap();
    assert_eq!(loaded.messages.len(), 2);
    assert_eq!(loaded.messages[1].role, MessageRole::System);
    assert_eq!(loaded.messages[1].content, ERROR_REPLY_CONTENT);
}

#[tokio::test]
async fn stale_append_after_chat_deletion_is_dropped() {
    let (repos, _tmp) = create_temp_repos();
    let manager = ChatManager::new(repos.chats.clone());
    let chat = manager.create_chat(None).expect("create failed");

    let responder = MockResponder::new(5);
    let cancel = CancellationToken::new();
    let reply = responder.respond("hello", &cancel).await.expect("respond failed");

    // The chat disappears while the reply was pending
    manager.delete_chat(&chat.id, None).expect("delete failed");
    manager
        .append_message(&chat.id, reply)
        .expect("append should be a silent no-op");

    assert!(manager.find_chat(&chat.id).expect("find failed").is_none());
}
