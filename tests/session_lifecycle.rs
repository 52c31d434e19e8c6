//! End-to-end session lifecycle tests
//!
//! Exercises the full core: controller -> API client -> credential store,
//! including a simulated process restart between login and restoration.

use api_client::{ApiClient, ApiConfig};
use app_state::SessionController;
use std::sync::Arc;
use storage::{KvConfig, KvStore, MemoryStore, Prefs, SecretStore};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json() -> serde_json::Value {
    serde_json::json!({
        "id": "u1",
        "fullName": "Ana B",
        "email": "ana@example.com",
        "isPremium": true
    })
}

fn api_for(server: &MockServer, store: &Arc<dyn SecretStore>) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(
        ApiConfig::new(format!("{}/api", server.uri())),
        Arc::clone(store),
    ))
}

/// Login, simulate a process restart, restore the session from the stored
/// token, then logout and verify the token is gone.
#[tokio::test]
async fn test_login_restart_restore_logout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "ok",
            "token": "tok123",
            "user": user_json()
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("Authorization", "Bearer tok123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"user": user_json()})),
        )
        .mount(&server)
        .await;

    let store: Arc<dyn SecretStore> = MemoryStore::new().shared();
    let prefs = Prefs::new(KvStore::in_memory().unwrap());

    // First run: interactive login.
    {
        let controller = SessionController::start(
            api_for(&server, &store),
            Arc::clone(&store),
            prefs.clone(),
        )
        .await;
        assert!(!controller.state().is_logged_in);

        controller.login("ana@example.com", "secret").await;

        let state = controller.state();
        assert!(state.is_logged_in);
        assert_eq!(state.current_user.as_ref().unwrap().id, "u1");
        assert!(state.current_user.unwrap().is_premium);
    }

    // Second run: the token alone restores the session.
    let controller = SessionController::start(
        api_for(&server, &store),
        Arc::clone(&store),
        prefs.clone(),
    )
    .await;

    assert!(controller.state().is_logged_in);

    controller.logout().await.unwrap();

    assert!(!controller.state().is_logged_in);
    assert_eq!(store.get().await.unwrap(), None);
}

/// The first-launch wipe fires exactly once: a token present before the
/// first run is discarded, but one saved afterwards survives restarts.
#[tokio::test]
async fn test_first_launch_wipe_happens_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"user": user_json()})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let kv_path = dir.path().join("prefs.db").to_string_lossy().to_string();

    let store: Arc<dyn SecretStore> = MemoryStore::with_token("backup-leftover").shared();

    // First run wipes the restored token and records the launch.
    {
        let prefs = Prefs::new(KvStore::new(KvConfig::new(&kv_path)).unwrap());
        let controller =
            SessionController::start(api_for(&server, &store), Arc::clone(&store), prefs).await;

        assert!(!controller.state().is_logged_in);
        assert_eq!(store.get().await.unwrap(), None);
    }

    // A token written after the first run is trusted on the next launch.
    store.save("tok123").await.unwrap();

    let prefs = Prefs::new(KvStore::new(KvConfig::new(&kv_path)).unwrap());
    let controller =
        SessionController::start(api_for(&server, &store), Arc::clone(&store), prefs).await;

    assert!(controller.state().is_logged_in);
    assert_eq!(store.get().await.unwrap(), Some("tok123".to_string()));
}

/// Failed logins never clobber an established session.
#[tokio::test]
async fn test_rejected_login_preserves_active_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "ok",
            "token": "tok123",
            "user": user_json()
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/google"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(serde_json::json!({"error": "Account disabled"})),
        )
        .mount(&server)
        .await;

    let store: Arc<dyn SecretStore> = MemoryStore::new().shared();
    let prefs = Prefs::new(KvStore::in_memory().unwrap());
    let controller =
        SessionController::new(api_for(&server, &store), Arc::clone(&store), prefs);

    controller.login("ana@example.com", "secret").await;
    controller.login_with_google("g1", "ana@example.com", "Ana B", None).await;

    let state = controller.state();
    assert!(state.is_logged_in);
    assert_eq!(state.error_message, Some("Account disabled".to_string()));
    assert_eq!(store.get().await.unwrap(), Some("tok123".to_string()));
}
