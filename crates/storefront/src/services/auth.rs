//! Authentication service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::Identity;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// An account already exists for this email.
    #[error("Email already registered: {email}")]
    EmailTaken { email: String },

    /// Email and password did not match an account.
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// An open session: the bearer token and the identity it was issued for.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
}

/// Trait for account and session management.
///
/// Credential mechanics are opaque to the rest of the system; the in-memory
/// implementation below is the development and test backend.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Registers a new account and opens a session for it.
    async fn register(&self, email: &str, name: &str, password: &str)
    -> Result<Session, AuthError>;

    /// Opens a session for an existing account.
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Resolves a session token to the identity it was issued for.
    async fn identity_for(&self, token: &str) -> Option<Identity>;
}

#[derive(Debug, Clone)]
struct Account {
    identity: Identity,
    password: String,
}

#[derive(Debug, Default)]
struct InMemoryAuthState {
    // Keyed by normalized (lowercased) email.
    accounts: HashMap<String, Account>,
    sessions: HashMap<String, Identity>,
    next_token: u32,
}

impl InMemoryAuthState {
    fn open_session(&mut self, identity: Identity) -> Session {
        self.next_token += 1;
        let token = format!("SES-{:04}", self.next_token);
        self.sessions.insert(token.clone(), identity.clone());
        Session { token, identity }
    }
}

/// In-memory authentication service for development and testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthService {
    state: Arc<RwLock<InMemoryAuthState>>,
}

impl InMemoryAuthService {
    /// Creates a new in-memory auth service with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service pre-seeded with one admin account.
    pub fn with_admin(email: &str, name: &str, password: &str) -> Self {
        let service = Self::new();
        {
            let mut state = service.state.write().unwrap();
            let email = normalize(email);
            let identity = Identity::admin(email.clone(), name);
            state.accounts.insert(
                email,
                Account {
                    identity,
                    password: password.to_string(),
                },
            );
        }
        service
    }

    /// Returns the number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.state.read().unwrap().accounts.len()
    }

    /// Returns the number of open sessions.
    pub fn session_count(&self) -> usize {
        self.state.read().unwrap().sessions.len()
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let email = normalize(email);
        let mut state = self.state.write().unwrap();

        if state.accounts.contains_key(&email) {
            return Err(AuthError::EmailTaken { email });
        }

        let identity = Identity::user(email.clone(), name.trim());
        state.accounts.insert(
            email,
            Account {
                identity: identity.clone(),
                password: password.to_string(),
            },
        );
        Ok(state.open_session(identity))
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = normalize(email);
        let mut state = self.state.write().unwrap();

        let identity = match state.accounts.get(&email) {
            Some(account) if account.password == password => account.identity.clone(),
            _ => return Err(AuthError::InvalidCredentials),
        };
        Ok(state.open_session(identity))
    }

    async fn identity_for(&self, token: &str) -> Option<Identity> {
        self.state.read().unwrap().sessions.get(token).cloned()
    }
}
