mod common;

use common::{TOKEN, spawn_backend};
use sistema_cajones::config::ClientConfig;
use sistema_cajones::create_context;
use sistema_cajones::infrastructure::session::{FileSessionStore, SessionStore};
use sistema_cajones::notifications::RecordingNotifier;
use sistema_cajones::services::auth_service::Credentials;
use std::sync::Arc;

#[tokio::test]
async fn test_session_survives_restart() {
    let (backend, base_url) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    // 1. Log in with a file-backed store
    let ctx = create_context(
        ClientConfig::with_base_url(base_url.clone()),
        Arc::new(FileSessionStore::new(path.clone())),
        Arc::new(RecordingNotifier::new()),
    )
    .unwrap();
    ctx.auth
        .login(&Credentials {
            username: "ana".into(),
            password: "secreto".into(),
        })
        .await
        .unwrap();
    assert!(path.exists());

    // 2. A fresh context picks the token up from disk
    let restarted = create_context(
        ClientConfig::with_base_url(base_url),
        Arc::new(FileSessionStore::new(path.clone())),
        Arc::new(RecordingNotifier::new()),
    )
    .unwrap();
    assert!(restarted.auth.is_authenticated());
    restarted.cajones.list().await.unwrap();
    assert_eq!(backend.last_auth(), Some(format!("Bearer {}", TOKEN)));

    // 3. Logout removes it
    restarted.auth.logout().await;
    assert!(FileSessionStore::new(path).load().is_none());
}

#[tokio::test]
async fn test_corrupt_session_file_sends_no_token() {
    let (backend, base_url) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{\"token\":").unwrap();

    let ctx = create_context(
        ClientConfig::with_base_url(base_url),
        Arc::new(FileSessionStore::new(path)),
        Arc::new(RecordingNotifier::new()),
    )
    .unwrap();

    assert!(!ctx.auth.is_authenticated());
    ctx.cajones.list().await.unwrap();
    assert_eq!(backend.last_auth(), None);
}
