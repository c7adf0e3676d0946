//! Integration tests for the mock model registry

mod common;

use common::create_temp_repos;
use opdeck::registry::ModelRegistry;
use opdeck::store::{ApiKeyRepository, ModelRepository};

fn build_registry(repos: &opdeck::store::Repositories) -> ModelRegistry {
    ModelRegistry::new(repos.models.clone(), repos.api_keys.clone(), 1)
}

#[tokio::test]
async fn fetch_without_configured_key_errors() {
    let (repos, _tmp) = create_temp_repos();
    let mut registry = build_registry(&repos);

    let err = registry.fetch_models().await.unwrap_err();
    assert!(err.to_string().contains("No API key"));
    assert!(registry.fetched().is_empty());
}

#[tokio::test]
async fn fetch_after_configuring_key_returns_constant_pool() {
    let (repos, _tmp) = create_temp_repos();
    repos.api_keys.set_active_key("sk-demo").expect("set key");
    repos
        .api_keys
        .set_active_url("https://api.yescale.io/v1")
        .expect("set url");

    let mut registry = build_registry(&repos);
    let models = registry.fetch_models().await.expect("fetch failed");

    let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "yescale/llama-3-8b-instruct",
            "yescale/llama-3-70b-instruct",
            "yescale/mistral-7b-instruct",
            "yescale/mixtral-8x7b-instruct",
        ]
    );

    // First entry auto-selected, selection persisted
    assert_eq!(
        repos.models.selected_model().expect("read failed").as_deref(),
        Some("yescale/llama-3-8b-instruct")
    );
}

#[tokio::test]
async fn fetched_pool_does_not_survive_a_new_registry() {
    let (repos, _tmp) = create_temp_repos();
    repos.api_keys.set_active_key("sk-demo").expect("set key");
    repos
        .api_keys
        .set_active_url("https://api.yescale.io/v1")
        .expect("set url");

    {
        let mut registry = build_registry(&repos);
        registry.fetch_models().await.expect("fetch failed");
        assert_eq!(registry.fetched().len(), 4);
    }

    // A fresh registry (new process) starts with an empty fetched pool,
    // while custom models and the selection persist.
    let registry = build_registry(&repos);
    assert!(registry.fetched().is_empty());
    assert!(registry.selected().expect("read failed").is_some());
}

#[test]
fn custom_models_persist_and_drive_selection_fallback() {
    let (repos, _tmp) = create_temp_repos();
    let registry = build_registry(&repos);

    registry
        .add_custom_model("custom/a", "Model A", None)
        .expect("add failed");
    registry
        .add_custom_model("custom/b", "Model B", Some("second"))
        .expect("add failed");
    registry.select_model("custom/b").expect("select failed");

    // Removing the selected model falls back to the first remaining one
    registry.remove_custom_model("custom/b").expect("remove failed");
    assert_eq!(
        registry.selected().expect("read failed").as_deref(),
        Some("custom/a")
    );

    // Removing the last model clears the selection
    registry.remove_custom_model("custom/a").expect("remove failed");
    assert!(registry.selected().expect("read failed").is_none());

    let custom = registry.custom().expect("load failed");
    assert!(custom.is_empty());
}

#[test]
fn empty_id_or_name_is_rejected() {
    let (repos, _tmp) = create_temp_repos();
    let registry = build_registry(&repos);

    assert!(registry.add_custom_model("", "Name", None).is_err());
    assert!(registry.add_custom_model("custom/x", "", None).is_err());
    assert!(registry.custom().expect("load failed").is_empty());
}
