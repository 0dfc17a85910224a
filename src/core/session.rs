//! Session and identity handling.
//!
//! The identity backend is a narrow trait so the rest of the application
//! never depends on a concrete auth service. The bundled implementation is
//! a mock that succeeds unconditionally and starts already signed in, the
//! way the platform's stubbed auth client behaves; a real backend would
//! implement the same trait and actually return [`AuthError`] values.

use thiserror::Error;
use tokio::sync::watch;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque user id.
    pub id: String,
    /// Email the user signed in with.
    pub email: String,
}

/// Errors an identity backend can produce.
///
/// The mock provider never returns these; they define the contract for
/// real implementations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The email/password pair did not match an account.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Sign-up attempted for an email that already has an account.
    #[error("an account with this email already exists")]
    AlreadyExists,
}

/// Abstract identity backend.
pub trait IdentityProvider: Send + Sync {
    /// Signs an existing user in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the credentials are
    /// rejected by the backend.
    fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Creates an account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AlreadyExists`] when the email is taken.
    fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Signs the current user out.
    fn sign_out(&self);

    /// Returns the currently signed-in identity, if any.
    fn current_identity(&self) -> Option<Identity>;

    /// Subscribes to identity changes (sign-in, sign-out).
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;
}

/// Mock identity backend: every operation succeeds with a fixed identity.
pub struct MockIdentityProvider {
    state: watch::Sender<Option<Identity>>,
}

impl MockIdentityProvider {
    /// Fixed user id handed out by the mock.
    const USER_ID: &'static str = "1";

    /// Email of the session the mock restores at startup.
    const DEFAULT_EMAIL: &'static str = "user@example.com";

    /// Creates a provider that starts already signed in, matching the
    /// stubbed session restoration of the original platform.
    #[must_use]
    pub fn new() -> Self {
        let identity = Identity {
            id: Self::USER_ID.to_string(),
            email: Self::DEFAULT_EMAIL.to_string(),
        };
        let (state, _) = watch::channel(Some(identity));
        Self { state }
    }

    /// Creates a provider with no active session (sign-in screen first).
    #[must_use]
    pub fn signed_out() -> Self {
        let (state, _) = watch::channel(None);
        Self { state }
    }

    fn establish(&self, email: &str) -> Identity {
        let identity = Identity {
            id: Self::USER_ID.to_string(),
            email: email.to_string(),
        };
        self.state.send_replace(Some(identity.clone()));
        identity
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for MockIdentityProvider {
    fn sign_in(&self, email: &str, _password: &str) -> Result<Identity, AuthError> {
        Ok(self.establish(email))
    }

    fn sign_up(&self, email: &str, _password: &str) -> Result<Identity, AuthError> {
        Ok(self.establish(email))
    }

    fn sign_out(&self) {
        self.state.send_replace(None);
    }

    fn current_identity(&self) -> Option<Identity> {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.state.subscribe()
    }
}
