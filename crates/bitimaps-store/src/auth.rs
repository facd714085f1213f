//! The shared-secret login check and the session it feeds.
//!
//! Authentication is a single serverless function call carrying a plaintext
//! password; no token is issued. The session here is the explicit counterpart
//! of what the browser build kept as a process-wide boolean: login sets it,
//! logout tears it down.

use serde::Deserialize;
use tracing::debug;

use bitimaps_model::{Result, StoreError};

use crate::rest::RestStore;
use crate::store::PasswordGate;

#[derive(Debug, Default, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl PasswordGate for RestStore {
    fn verify_password(&self, password: &str) -> Result<()> {
        let url = format!("{}/functions/v1/verify-password", self.base_url());
        let response = self
            .authorize(self.client().post(&url))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .map_err(|error| StoreError::Network(error.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|error| StoreError::Network(error.to_string()))?;

        // A 500 means the server-side secret is not configured; distinct from
        // a wrong password, which answers 401 with {success: false, error}.
        if status >= 500 {
            let parsed: VerifyResponse = serde_json::from_str(&body).unwrap_or_default();
            return Err(StoreError::ServerConfig(
                parsed
                    .error
                    .unwrap_or_else(|| "Kesalahan konfigurasi server.".to_string()),
            ));
        }

        let parsed: VerifyResponse = serde_json::from_str(&body).unwrap_or_default();
        if parsed.success {
            debug!("password verified");
            Ok(())
        } else {
            Err(StoreError::WrongPassword(
                parsed.error.unwrap_or_else(|| "Password salah.".to_string()),
            ))
        }
    }
}

/// Application session state.
#[derive(Debug, Default)]
pub struct Session {
    authenticated: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the password against the gate and mark the session live.
    pub fn login(&mut self, gate: &impl PasswordGate, password: &str) -> Result<()> {
        gate.verify_password(password)?;
        self.authenticated = true;
        Ok(())
    }

    /// Explicit teardown.
    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedGate(Result<()>);

    impl PasswordGate for FixedGate {
        fn verify_password(&self, _password: &str) -> Result<()> {
            match &self.0 {
                Ok(()) => Ok(()),
                Err(StoreError::WrongPassword(message)) => {
                    Err(StoreError::WrongPassword(message.clone()))
                }
                Err(StoreError::ServerConfig(message)) => {
                    Err(StoreError::ServerConfig(message.clone()))
                }
                Err(_) => Err(StoreError::Network("unexpected".to_string())),
            }
        }
    }

    #[test]
    fn login_marks_session_authenticated() {
        let mut session = Session::new();
        assert!(!session.is_authenticated());
        session
            .login(&FixedGate(Ok(())), "rahasia")
            .expect("login succeeds");
        assert!(session.is_authenticated());
        session.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn failed_login_leaves_session_unauthenticated() {
        let mut session = Session::new();
        let gate = FixedGate(Err(StoreError::WrongPassword("Password salah.".to_string())));
        let error = session.login(&gate, "tebakan").expect_err("login fails");
        assert!(matches!(error, StoreError::WrongPassword(_)));
        assert!(!session.is_authenticated());
    }
}
