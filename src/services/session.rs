use subtle::ConstantTimeEq;
use tokio::sync::RwLock;

use crate::error::{ApiError, Result};

/// Process-wide access flag. Starts logged out; never read by extraction.
pub struct Session {
    password: Option<String>,
    authenticated: RwLock<bool>,
}

impl Session {
    pub fn init(password: Option<String>) -> Self {
        let password = password.filter(|p| !p.is_empty());
        if password.is_none() {
            tracing::info!("no access password configured, logins disabled");
        }

        Self {
            password,
            authenticated: RwLock::new(false),
        }
    }

    pub async fn login(&self, attempt: &str) -> Result<()> {
        let is_valid = match &self.password {
            Some(password) => {
                let a = password.as_bytes();
                let b = attempt.as_bytes();
                a.len() == b.len() && a.ct_eq(b).into()
            }
            None => false,
        };

        if !is_valid {
            tracing::warn!("rejected login attempt");
            return Err(ApiError::InvalidCredentials);
        }

        *self.authenticated.write().await = true;
        Ok(())
    }

    pub async fn clear(&self) {
        *self.authenticated.write().await = false;
    }

    pub async fn is_authenticated(&self) -> bool {
        *self.authenticated.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_and_clear() {
        let session = Session::init(Some("goodfood".into()));
        assert!(!session.is_authenticated().await);

        session.login("goodfood").await.unwrap();
        assert!(session.is_authenticated().await);

        session.clear().await;
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_wrong_password_keeps_logged_out() {
        let session = Session::init(Some("goodfood".into()));
        assert!(matches!(
            session.login("badfood").await,
            Err(ApiError::InvalidCredentials)
        ));
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_no_password_disables_login() {
        let session = Session::init(Some(String::new()));
        assert!(session.login("").await.is_err());
    }
}
