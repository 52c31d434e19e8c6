//! Session controller
//!
//! Single source of truth for the current user and login state. Every auth
//! operation follows the same shape: mark loading, call the API client, on
//! success persist the token and publish the user, on failure publish the
//! error message, and always clear the loading flag through the one shared
//! completion path.

use crate::observable::{Observable, Subscription};
use api_client::client::Result as ApiResult;
use api_client::{ApiClient, AuthResponse, User};
use std::sync::Arc;
use storage::{Prefs, SecretStore};
use tokio::task::JoinHandle;

/// Observable session state
///
/// `is_logged_in` implies `current_user` is present. The state is never
/// persisted directly; it is rebuilt at launch from the credential store plus
/// a session-verification call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// The authenticated user, when logged in
    pub current_user: Option<User>,
    /// Whether a session is active
    pub is_logged_in: bool,
    /// Whether an auth operation is in flight
    pub is_loading: bool,
    /// Human-readable message from the last failed operation
    pub error_message: Option<String>,
}

/// Controller owning login/logout orchestration and observable auth state
pub struct SessionController {
    state: Observable<SessionState>,
    api: Arc<ApiClient>,
    store: Arc<dyn SecretStore>,
    prefs: Prefs,
}

impl SessionController {
    /// Create a controller in the logged-out state without running the
    /// launch sequence
    pub fn new(api: Arc<ApiClient>, store: Arc<dyn SecretStore>, prefs: Prefs) -> Self {
        Self {
            state: Observable::default(),
            api,
            store,
            prefs,
        }
    }

    /// Create a controller and run the launch sequence before returning
    pub async fn start(api: Arc<ApiClient>, store: Arc<dyn SecretStore>, prefs: Prefs) -> Self {
        let controller = Self::new(api, store, prefs);
        controller.restore_session().await;
        controller
    }

    /// Snapshot of the current session state
    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    /// Subscribe to state changes; the callback runs synchronously on every
    /// mutation
    pub fn subscribe(
        &self,
        f: impl Fn(&SessionState) + Send + Sync + 'static,
    ) -> Subscription<SessionState> {
        self.state.subscribe(f)
    }

    /// Register a new account and start a session
    pub async fn register(&self, full_name: &str, email: &str, password: &str) {
        self.begin_operation();
        let result = self.api.register(full_name, email, password).await;
        self.finish_operation(result).await;
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) {
        self.begin_operation();
        let result = self.api.login(email, password).await;
        self.finish_operation(result).await;
    }

    /// Login with a Google identity
    pub async fn login_with_google(
        &self,
        google_id: &str,
        email: &str,
        full_name: &str,
        profile_picture: Option<&str>,
    ) {
        self.begin_operation();
        let result = self
            .api
            .google_login(google_id, email, full_name, profile_picture)
            .await;
        self.finish_operation(result).await;
    }

    /// Login with an Apple identity
    pub async fn login_with_apple(
        &self,
        apple_id: &str,
        email: Option<&str>,
        full_name: Option<&str>,
    ) {
        self.begin_operation();
        let result = self.api.apple_login(apple_id, email, full_name).await;
        self.finish_operation(result).await;
    }

    /// Logout immediately; token deletion runs detached
    ///
    /// The state flips to logged-out synchronously so the UI never waits on
    /// secure-storage I/O. The returned handle lets tests await the deletion;
    /// production call sites drop it.
    pub fn logout(&self) -> JoinHandle<()> {
        self.state.update(|state| {
            state.current_user = None;
            state.is_logged_in = false;
        });

        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(e) = store.delete().await {
                tracing::warn!("Failed to delete session token: {}", e);
            }
        })
    }

    /// Launch sequence: discard vault leftovers on first launch, then try to
    /// restore the session from the stored token
    ///
    /// An authoritative rejection of the stored token forces a full logout.
    /// A pure transport failure leaves the state logged out but keeps the
    /// token, so an offline user is not signed out permanently.
    pub async fn restore_session(&self) {
        self.reset_on_first_launch().await;

        match self.api.get_current_user().await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "session restored");
                self.state.update(|state| {
                    state.current_user = Some(user);
                    state.is_logged_in = true;
                });
            }
            Err(e) if e.is_transport() => {
                tracing::debug!("session restore skipped, network unreachable: {}", e);
            }
            Err(e) => {
                tracing::debug!("session restore rejected: {}", e);
                let _ = self.logout();
            }
        }
    }

    /// The credential vault can outlive an uninstall through device backups;
    /// a token found on the very first launch belongs to no session we know
    async fn reset_on_first_launch(&self) {
        let launched = match self.prefs.has_launched_before() {
            Ok(launched) => launched,
            Err(e) => {
                tracing::warn!("Failed to read launch flag: {}", e);
                false
            }
        };
        if launched {
            return;
        }

        if let Err(e) = self.store.delete().await {
            tracing::warn!("Failed to clear token on first launch: {}", e);
        }
        if let Err(e) = self.prefs.mark_launched() {
            tracing::warn!("Failed to record first launch: {}", e);
        }
    }

    fn begin_operation(&self) {
        self.state.update(|state| {
            state.is_loading = true;
            state.error_message = None;
        });
    }

    /// Shared completion for all auth operations; clears the loading flag on
    /// both paths
    async fn finish_operation(&self, result: ApiResult<AuthResponse>) {
        match result {
            Ok(response) => {
                if let Err(e) = self.store.save(&response.token).await {
                    tracing::warn!("Failed to persist session token: {}", e);
                }
                self.state.update(|state| {
                    state.current_user = Some(response.user);
                    state.is_logged_in = true;
                    state.is_loading = false;
                });
            }
            Err(e) => {
                self.state.update(|state| {
                    state.error_message = Some(e.to_string());
                    state.is_loading = false;
                });
            }
        }
    }
}
