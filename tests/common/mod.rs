use opdeck::commands::App;
use opdeck::config::Config;
use opdeck::store::{KvStore, Repositories};
use std::sync::Arc;
use tempfile::TempDir;

#[allow(dead_code)]
pub fn create_temp_store() -> (Arc<KvStore>, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let db_path = tmp.path().join("opdeck.db");
    let store = KvStore::new_with_path(db_path).expect("failed to create store with path");
    (Arc::new(store), tmp)
}

#[allow(dead_code)]
pub fn create_temp_repos() -> (Repositories, TempDir) {
    let (store, tmp) = create_temp_store();
    (Repositories::new(store), tmp)
}

/// Build a fully wired `App` over a temporary store.
///
/// The admin account is seeded by `App::new` with the config's default
/// password, so tests can log in as the admin deterministically.
#[allow(dead_code)]
pub fn create_temp_app() -> (App, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let mut config = Config::default();
    config.store.db_path = Some(tmp.path().join("opdeck.db").to_string_lossy().to_string());
    let app = App::new(config).expect("failed to wire app");
    (app, tmp)
}
