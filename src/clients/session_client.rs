use tokio::sync::mpsc;

use crate::domain::{Credentials, GateDecision, Identity, Page, Registration};
use crate::messages::SessionRequest;
use crate::session_actor::SessionError;

/// Client for the session gate.
#[derive(Clone)]
pub struct SessionClient {
    sender: mpsc::Sender<SessionRequest>,
}

impl SessionClient {
    pub fn new(sender: mpsc::Sender<SessionRequest>) -> Self {
        Self { sender }
    }
}

client_method!(SessionClient => fn check_access(page: Page) -> GateDecision as SessionRequest::CheckAccess, Error = SessionError);
client_method!(SessionClient => fn login(credentials: Credentials) -> Identity as SessionRequest::Login, Error = SessionError);
client_method!(SessionClient => fn register(registration: Registration) -> () as SessionRequest::Register, Error = SessionError);
client_method!(SessionClient => fn logout() -> () as SessionRequest::Logout, Error = SessionError);
client_method!(SessionClient => fn current_identity() -> Option<Identity> as SessionRequest::CurrentIdentity, Error = SessionError);
