//! Integration tests for the admin views over a real store

mod common;

use common::create_temp_app;
use opdeck::chats::ChatManager;
use opdeck::commands::admin::{bots, keys, messages, users};
use opdeck::commands::App;
use opdeck::store::types::{Message, Role};
use opdeck::store::{ApiKeyRepository, BotRepository, ChatRepository, UserRepository};
use serial_test::serial;

fn login_admin(app: &App) {
    std::env::remove_var("OPDECK_ADMIN_PASSWORD");
    app.session
        .login(&app.config.admin.email, &app.config.admin.default_password)
        .expect("admin login failed");
}

#[test]
#[serial]
fn admin_guard_rejects_regular_users() {
    let (app, _tmp) = create_temp_app();
    app.session
        .register("alice", "alice@x.com", "password1", "password1")
        .expect("register failed");
    app.session.login("alice", "password1").expect("login failed");

    assert!(users::run_list(&app).is_err());
    assert!(bots::run_list(&app).is_err());
    assert!(keys::run_list(&app, false).is_err());
    assert!(messages::run_list(&app, None, None).is_err());
}

#[test]
#[serial]
fn users_add_edit_delete_roundtrip() {
    let (app, _tmp) = create_temp_app();
    login_admin(&app);

    users::run_add(
        &app,
        "bob",
        "bob@x.com",
        Some("password1".to_string()),
        "user",
    )
    .expect("add failed");

    let stored = app.repos.users.load_all().expect("load failed");
    let bob = stored.iter().find(|u| u.username == "bob").expect("bob missing");
    assert_eq!(bob.role, Role::User);
    // Stored as a digest, never plaintext
    assert_ne!(bob.password_hash, "password1");

    // Edit without a password keeps the stored digest
    let old_hash = bob.password_hash.clone();
    let bob_id = bob.id.clone();
    users::run_edit(
        &app,
        &bob_id,
        Some("bobby".to_string()),
        None,
        None,
        Some("admin".to_string()),
    )
    .expect("edit failed");

    let stored = app.repos.users.load_all().expect("load failed");
    let bobby = stored.iter().find(|u| u.id == bob_id).expect("bobby missing");
    assert_eq!(bobby.username, "bobby");
    assert_eq!(bobby.role, Role::Admin);
    assert_eq!(bobby.password_hash, old_hash);

    users::run_delete(&app, &bob_id, true).expect("delete failed");
    let stored = app.repos.users.load_all().expect("load failed");
    assert!(stored.iter().all(|u| u.id != bob_id));
}

#[test]
#[serial]
fn seeded_admin_account_is_exempt_from_edit_and_delete() {
    let (app, _tmp) = create_temp_app();
    login_admin(&app);

    let stored = app.repos.users.load_all().expect("load failed");
    let admin = stored
        .iter()
        .find(|u| u.email == app.config.admin.email)
        .expect("admin missing");
    let admin_id = admin.id.clone();

    users::run_edit(&app, &admin_id, Some("hacked".to_string()), None, None, None)
        .expect("edit should refuse without erroring");
    users::run_delete(&app, &admin_id, true).expect("delete should refuse without erroring");

    let stored = app.repos.users.load_all().expect("load failed");
    let admin = stored.iter().find(|u| u.id == admin_id).expect("admin gone");
    assert_eq!(admin.username, app.config.admin.username);
    assert_eq!(admin.role, Role::Admin);
}

#[test]
#[serial]
fn empty_bot_collection_is_seeded_with_defaults() {
    let (app, _tmp) = create_temp_app();
    login_admin(&app);

    assert!(app.repos.bots.load_all().expect("load failed").is_empty());
    bots::run_list(&app).expect("list failed");

    let seeded = app.repos.bots.load_all().expect("load failed");
    let names: Vec<&str> = seeded.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Web Browser", "Code Assistant", "Research Helper"]);
    assert!(seeded[0].is_active);
    assert!(!seeded[2].is_active);
}

#[test]
#[serial]
fn bot_add_edit_delete_roundtrip() {
    let (app, _tmp) = create_temp_app();
    login_admin(&app);

    bots::run_add(
        &app,
        "Summarizer",
        Some("Summarizes things".to_string()),
        "yescale/mistral-7b-instruct",
        "You summarize text.",
        true,
    )
    .expect("add failed");

    let stored = app.repos.bots.load_all().expect("load failed");
    let bot = stored
        .iter()
        .find(|b| b.name == "Summarizer")
        .expect("bot missing");
    let bot_id = bot.id.clone();

    bots::run_edit(&app, &bot_id, None, None, None, None, Some(false)).expect("edit failed");
    let stored = app.repos.bots.load_all().expect("load failed");
    assert!(!stored.iter().find(|b| b.id == bot_id).unwrap().is_active);

    bots::run_delete(&app, &bot_id, true).expect("delete failed");
    let stored = app.repos.bots.load_all().expect("load failed");
    assert!(stored.iter().all(|b| b.id != bot_id));
}

#[test]
#[serial]
fn empty_key_collection_is_seeded_from_active_key() {
    let (app, _tmp) = create_temp_app();
    login_admin(&app);

    app.repos.api_keys.set_active_key("sk-demo-123").expect("set key");
    app.repos
        .api_keys
        .set_active_url("https://api.yescale.io/v1")
        .expect("set url");

    keys::run_list(&app, false).expect("list failed");

    let records = app.repos.api_keys.load_all().expect("load failed");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Default Yescale API Key");
    assert_eq!(records[0].provider, "yescale");
    assert_eq!(records[0].key, "sk-demo-123");
    assert!(records[0].last_used.is_some());
}

#[test]
#[serial]
fn key_records_are_not_seeded_without_an_active_key() {
    let (app, _tmp) = create_temp_app();
    login_admin(&app);

    keys::run_list(&app, false).expect("list failed");
    assert!(app.repos.api_keys.load_all().expect("load failed").is_empty());
}

#[test]
#[serial]
fn message_edit_renests_into_the_correct_parent_chat() {
    let (app, _tmp) = create_temp_app();
    login_admin(&app);

    let manager = ChatManager::new(app.repos.chats.clone());
    let first = manager.create_chat(Some("user-1")).expect("create failed");
    manager
        .append_message(&first.id, Message::user("untouched"))
        .expect("append failed");
    let second = manager.create_chat(Some("user-2")).expect("create failed");
    manager
        .append_message(&second.id, Message::user("original content"))
        .expect("append failed");

    let chats = app.repos.chats.load_all().expect("load failed");
    let target_id = chats
        .iter()
        .find(|c| c.id == second.id)
        .unwrap()
        .messages[0]
        .id
        .clone();

    messages::run_edit(&app, &target_id, "edited content").expect("edit failed");

    let chats = app.repos.chats.load_all().expect("load failed");
    let second_chat = chats.iter().find(|c| c.id == second.id).unwrap();
    assert_eq!(second_chat.messages[0].content, "edited content");
    let first_chat = chats.iter().find(|c| c.id == first.id).unwrap();
    assert_eq!(first_chat.messages[0].content, "untouched");
}

#[test]
#[serial]
fn message_delete_removes_from_parent_chat_only() {
    let (app, _tmp) = create_temp_app();
    login_admin(&app);

    let manager = ChatManager::new(app.repos.chats.clone());
    let chat = manager.create_chat(None).expect("create failed");
    manager
        .append_message(&chat.id, Message::user("keep me"))
        .expect("append failed");
    manager
        .append_message(&chat.id, Message::assistant("delete me"))
        .expect("append failed");

    let chats = app.repos.chats.load_all().expect("load failed");
    let target_id = chats
        .iter()
        .find(|c| c.id == chat.id)
        .unwrap()
        .messages[1]
        .id
        .clone();

    messages::run_delete(&app, &target_id, true).expect("delete failed");

    let chats = app.repos.chats.load_all().expect("load failed");
    let reloaded = chats.iter().find(|c| c.id == chat.id).unwrap();
    assert_eq!(reloaded.messages.len(), 1);
    assert_eq!(reloaded.messages[0].content, "keep me");
}

#[test]
#[serial]
fn editing_a_missing_message_is_not_found() {
    let (app, _tmp) = create_temp_app();
    login_admin(&app);

    let err = messages::run_edit(&app, "no-such-message", "content").unwrap_err();
    assert!(err.to_string().contains("Not found"));
}
