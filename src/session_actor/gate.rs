use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::error::SessionError;
use crate::actor_framework::{reply, Service};
use crate::clients::ApiClient;
use crate::domain::{Credentials, GateDecision, Identity, Page, Registration, Role};
use crate::messages::SessionRequest;
use crate::storage::KeyValueStore;

/// Storage key holding the serialized identity.
pub const IDENTITY_KEY: &str = "usuario";

/// Decides, for each page load, whether the page may proceed.
///
/// The identity comes from storage first; only when nothing is stored is
/// the API asked to confirm an existing cookie session.
pub struct SessionGate {
    api: ApiClient,
    store: Box<dyn KeyValueStore>,
    redirect_delay: Duration,
    identity: Option<Identity>,
}

impl SessionGate {
    pub fn new(api: ApiClient, store: Box<dyn KeyValueStore>, redirect_delay: Duration) -> Self {
        Self {
            api,
            store,
            redirect_delay,
            identity: None,
        }
    }

    fn stored_identity(&mut self) -> Option<Identity> {
        let raw = match self.store.get(IDENTITY_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "Session storage unreadable");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(error = %e, "Discarding corrupt stored identity");
                if let Err(e) = self.store.remove(IDENTITY_KEY) {
                    warn!(error = %e, "Could not remove corrupt identity");
                }
                None
            }
        }
    }

    fn persist(&mut self, identity: &Identity) -> Result<(), SessionError> {
        let raw = serde_json::to_string(identity).map_err(|e| SessionError::Storage(e.to_string()))?;
        self.store.set(IDENTITY_KEY, raw)?;
        Ok(())
    }

    async fn resolve_identity(&mut self) -> Option<Identity> {
        if let Some(identity) = &self.identity {
            return Some(identity.clone());
        }
        if let Some(identity) = self.stored_identity() {
            debug!(user = %identity.display_name(), "Identity read from storage");
            self.identity = Some(identity.clone());
            return Some(identity);
        }
        match self.api.verify_session().await {
            Ok(Some(identity)) => {
                info!(user = %identity.display_name(), "Server session confirmed");
                if let Err(e) = self.persist(&identity) {
                    warn!(error = %e, "Could not persist confirmed identity");
                }
                self.identity = Some(identity.clone());
                Some(identity)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Session verification failed");
                None
            }
        }
    }

    fn redirect(&self, notice: impl Into<String>, to: Page) -> GateDecision {
        GateDecision::Redirect {
            notice: notice.into(),
            to,
            after: self.redirect_delay,
        }
    }

    #[instrument(fields(page = %page), skip(self))]
    async fn handle_check_access(&mut self, page: Page) -> Result<GateDecision, SessionError> {
        let identity = self.resolve_identity().await;

        let decision = match (page.required_role(), identity) {
            (None, None) => GateDecision::Anonymous,
            (None, Some(identity)) => {
                self.redirect("Active session detected, redirecting...", identity.role.home_page())
            }
            (Some(_), None) => self.redirect("You must log in first", Page::Entry),
            (Some(required), Some(identity)) if identity.role != required => {
                let audience = match required {
                    Role::Employee => "employee",
                    Role::Customer => "customer",
                };
                self.redirect(
                    format!("Access denied. This section is only for {audience} accounts."),
                    identity.role.home_page(),
                )
            }
            (Some(_), Some(identity)) => GateDecision::Granted(identity),
        };

        debug!(decision = ?decision, "Access checked");
        Ok(decision)
    }

    #[instrument(fields(email = %credentials.email), skip(self, credentials))]
    async fn handle_login(&mut self, credentials: Credentials) -> Result<Identity, SessionError> {
        let identity = self.api.login(credentials).await?;
        self.persist(&identity)?;
        self.identity = Some(identity.clone());
        info!(user = %identity.display_name(), role = %identity.role, "Logged in");
        Ok(identity)
    }

    #[instrument(fields(email = %registration.email), skip(self, registration))]
    async fn handle_register(&mut self, registration: Registration) -> Result<(), SessionError> {
        self.api.register(registration).await?;
        info!("Account registered");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn handle_logout(&mut self) -> Result<(), SessionError> {
        if let Err(e) = self.api.logout().await {
            warn!(error = %e, "Server logout failed, clearing local session anyway");
        }
        self.identity = None;
        self.store.remove(IDENTITY_KEY)?;
        info!("Logged out");
        Ok(())
    }
}

impl Service for SessionGate {
    type Request = SessionRequest;
    const NAME: &'static str = "session_gate";

    async fn handle(&mut self, request: SessionRequest) {
        match request {
            SessionRequest::CheckAccess { page, respond_to } => {
                reply(respond_to, self.handle_check_access(page).await)
            }
            SessionRequest::Login { credentials, respond_to } => {
                reply(respond_to, self.handle_login(credentials).await)
            }
            SessionRequest::Register { registration, respond_to } => {
                reply(respond_to, self.handle_register(registration).await)
            }
            SessionRequest::Logout { respond_to } => reply(respond_to, self.handle_logout().await),
            SessionRequest::CurrentIdentity { respond_to } => {
                let identity = match self.identity.clone() {
                    Some(identity) => Some(identity),
                    None => self.stored_identity(),
                };
                reply(respond_to, Ok(identity))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::spawn;
    use crate::api_actor::ApiError;
    use crate::clients::SessionClient;
    use crate::domain::Role;
    use crate::mock_framework::{create_mock_api, expect_login, expect_logout, expect_verify_session};
    use crate::storage::MemoryStore;

    const DELAY: Duration = Duration::from_millis(1500);

    fn start_gate(store: MemoryStore) -> (SessionClient, tokio::sync::mpsc::Receiver<crate::messages::ApiRequest>) {
        let (api, api_rx) = create_mock_api(10);
        let (sender, _handle) = spawn(SessionGate::new(api, Box::new(store), DELAY), 10);
        (SessionClient::new(sender), api_rx)
    }

    fn store_with(identity: &Identity) -> MemoryStore {
        let mut store = MemoryStore::default();
        store.set(IDENTITY_KEY, serde_json::to_string(identity).unwrap()).unwrap();
        store
    }

    #[tokio::test]
    async fn test_stored_identity_with_matching_role_is_granted_without_network() {
        let identity = Identity::new("ana", Role::Customer);
        let (gate, mut api_rx) = start_gate(store_with(&identity));

        let decision = gate.check_access(Page::Shop).await.unwrap();

        assert_eq!(decision, GateDecision::Granted(identity));
        assert!(api_rx.try_recv().is_err(), "No request expected");
    }

    #[tokio::test]
    async fn test_role_mismatch_redirects_to_own_home() {
        let identity = Identity::new("ana", Role::Customer);
        let (gate, _api_rx) = start_gate(store_with(&identity));

        let decision = gate.check_access(Page::Inventory).await.unwrap();

        match decision {
            GateDecision::Redirect { to, after, notice } => {
                assert_eq!(to, Page::Shop);
                assert_eq!(after, DELAY);
                assert!(notice.starts_with("Access denied"));
            }
            other => panic!("Unexpected decision: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_identity_asks_server_then_redirects_to_entry() {
        let (gate, mut api_rx) = start_gate(MemoryStore::default());

        let check = tokio::spawn(async move { gate.check_access(Page::Shop).await });

        let responder = expect_verify_session(&mut api_rx).await.expect("Expected session verification");
        responder.send(Ok(None)).unwrap();

        let decision = check.await.unwrap().unwrap();
        assert_eq!(
            decision,
            GateDecision::Redirect { notice: "You must log in first".into(), to: Page::Entry, after: DELAY }
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_counts_as_no_session() {
        let (gate, mut api_rx) = start_gate(MemoryStore::default());

        let check = tokio::spawn(async move { gate.check_access(Page::Entry).await });

        let responder = expect_verify_session(&mut api_rx).await.expect("Expected session verification");
        responder.send(Err(ApiError::Transport("connection refused".into()))).unwrap();

        assert_eq!(check.await.unwrap().unwrap(), GateDecision::Anonymous);
    }

    #[tokio::test]
    async fn test_server_session_on_entry_page_redirects_home_and_is_cached() {
        let (gate, mut api_rx) = start_gate(MemoryStore::default());
        let employee = Identity::new("luis", Role::Employee);

        let client = gate.clone();
        let check = tokio::spawn(async move { client.check_access(Page::Entry).await });
        let responder = expect_verify_session(&mut api_rx).await.expect("Expected session verification");
        responder.send(Ok(Some(employee.clone()))).unwrap();

        match check.await.unwrap().unwrap() {
            GateDecision::Redirect { to, .. } => assert_eq!(to, Page::Inventory),
            other => panic!("Unexpected decision: {other:?}"),
        }

        assert_eq!(gate.check_access(Page::Inventory).await.unwrap(), GateDecision::Granted(employee));
        assert!(api_rx.try_recv().is_err(), "Identity should be cached");
    }

    #[tokio::test]
    async fn test_corrupt_stored_identity_is_discarded() {
        let mut store = MemoryStore::default();
        store.set(IDENTITY_KEY, "{not json".to_string()).unwrap();
        let (gate, mut api_rx) = start_gate(store);

        let check = tokio::spawn(async move { gate.current_identity().await });
        assert_eq!(check.await.unwrap().unwrap(), None);
        assert!(api_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_login_persists_and_logout_clears_even_if_server_fails() {
        let (gate, mut api_rx) = start_gate(MemoryStore::default());
        let identity = Identity::new("ana", Role::Customer);

        let client = gate.clone();
        let login = tokio::spawn(async move {
            client
                .login(Credentials { email: "ana@example.com".into(), password: "pw".into() })
                .await
        });
        let (credentials, responder) = expect_login(&mut api_rx).await.expect("Expected login");
        assert_eq!(credentials.email, "ana@example.com");
        responder.send(Ok(identity.clone())).unwrap();
        assert_eq!(login.await.unwrap().unwrap(), identity);
        assert_eq!(gate.current_identity().await.unwrap(), Some(identity));

        let client = gate.clone();
        let logout = tokio::spawn(async move { client.logout().await });
        let responder = expect_logout(&mut api_rx).await.expect("Expected logout");
        responder.send(Err(ApiError::Transport("offline".into()))).unwrap();
        logout.await.unwrap().unwrap();

        assert_eq!(gate.current_identity().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejected_login_surfaces_server_message() {
        let (gate, mut api_rx) = start_gate(MemoryStore::default());

        let login = tokio::spawn(async move {
            gate.login(Credentials { email: "x@example.com".into(), password: "bad".into() }).await
        });
        let (_, responder) = expect_login(&mut api_rx).await.expect("Expected login");
        let rejection = ApiError::Rejected { status: 401, message: Some("Credenciales incorrectas".into()) };
        responder.send(Err(rejection.clone())).unwrap();

        assert_eq!(login.await.unwrap(), Err(SessionError::Api(rejection)));
    }
}
