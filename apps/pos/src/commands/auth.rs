//! # Auth Commands
//!
//! Cashier sign-in against the configured accounts. Passwords are compared
//! as SHA-256 hex digests; the clear text never leaves this function.

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::{AppState, Cashier};

/// Hex digest of a password, matching how accounts store theirs.
fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Signs a cashier in. The same generic error covers unknown email and
/// wrong password, so login attempts can't probe for accounts.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<Cashier, ApiError> {
    let digest = password_digest(password);

    let account = state
        .config
        .cashiers
        .iter()
        .find(|a| a.email.eq_ignore_ascii_case(email.trim()));

    match account {
        Some(account) if account.password_sha256.eq_ignore_ascii_case(&digest) => {
            let cashier = Cashier {
                id: account.id.clone(),
                name: account.name.clone(),
                point_id: account.point_id.clone(),
            };
            state.session.sign_in(cashier.clone());
            info!(cashier = %cashier.name, "cashier signed in");
            Ok(cashier)
        }
        _ => {
            warn!(email, "failed login attempt");
            Err(ApiError::auth("Invalid email or password"))
        }
    }
}

/// Signs the current cashier out.
pub async fn logout(state: &AppState) -> Result<(), ApiError> {
    state.session.sign_out();
    info!("cashier signed out");
    Ok(())
}

/// Returns the signed-in cashier, if any.
pub async fn current_cashier(state: &AppState) -> Result<Option<Cashier>, ApiError> {
    Ok(state.session.current())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AppConfig, CashierAccount};
    use minipos_store::{DomainStore, MemoryKv, StorePolicy};

    fn state_with_account() -> AppState {
        let config = AppConfig {
            cashiers: vec![CashierAccount {
                id: "u1".to_string(),
                name: "Aisha".to_string(),
                email: "aisha@example.com".to_string(),
                password_sha256: password_digest("secret"),
                point_id: "1".to_string(),
            }],
            ..AppConfig::default()
        };
        let store = DomainStore::open(Box::new(MemoryKv::new()), StorePolicy::default()).unwrap();
        AppState::new(config, store)
    }

    #[tokio::test]
    async fn test_login_success_sets_session() {
        let state = state_with_account();
        let cashier = login(&state, "aisha@example.com", "secret").await.unwrap();
        assert_eq!(cashier.name, "Aisha");
        assert!(state.session.current().is_some());
    }

    #[tokio::test]
    async fn test_login_wrong_password_rejected() {
        let state = state_with_account();
        assert!(login(&state, "aisha@example.com", "nope").await.is_err());
        assert!(state.session.current().is_none());
    }

    #[tokio::test]
    async fn test_login_unknown_email_rejected() {
        let state = state_with_account();
        assert!(login(&state, "ghost@example.com", "secret").await.is_err());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let state = state_with_account();
        login(&state, "aisha@example.com", "secret").await.unwrap();
        logout(&state).await.unwrap();
        assert!(current_cashier(&state).await.unwrap().is_none());
    }
}
