use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    api::{AuthResponse, Role, User},
    prelude::*,
    store::storage::LocalStorage,
};

/// Storage name of the persisted session.
pub const STORAGE_NAME: &str = "auth-storage";

/// Current actor as persisted: the user and the token, both unset when logged out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
}

pub struct SessionStore {
    storage: LocalStorage,
    session: Session,
}

impl SessionStore {
    /// Restore the persisted session, falling back to the logged-out state.
    #[instrument(skip_all)]
    pub fn load(storage: LocalStorage) -> Self {
        let session = storage.read::<Session>(STORAGE_NAME).unwrap_or_else(|error| {
            warn!("discarding the stored session: {error:#}");
            None
        });
        let session = session.unwrap_or_default();
        debug!(
            root = %storage.root().display(),
            is_authenticated = session.token.is_some(),
            "loaded",
        );
        Self { storage, session }
    }

    pub fn login(&mut self, response: AuthResponse) -> Result {
        info!(email = %response.user.email, role = %response.user.role, "logged in");
        self.session = Session { user: Some(response.user), token: Some(response.token) };
        self.persist()
    }

    /// Log in with a token handed out by the backend's external login redirect.
    ///
    /// The claims are read without checking the signature, the backend verifies it on every call.
    pub fn login_with_token(&mut self, token: &str) -> Result {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        let user = jsonwebtoken::decode::<User>(token, &DecodingKey::from_secret(&[]), &validation)
            .context("the token does not carry a user")?
            .claims;
        self.login(AuthResponse { user, token: token.to_owned() })
    }

    pub fn logout(&mut self) -> Result {
        info!("logged out");
        self.session = Session::default();
        self.persist()
    }

    fn persist(&self) -> Result {
        self.storage.write(STORAGE_NAME, &self.session).context("failed to persist the session")
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.token.is_some()
    }

    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.session.user.as_ref().map(|user| &user.role)
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use jsonwebtoken::{EncodingKey, Header};

    use super::*;
    use crate::store::storage::tests::temporary_storage;

    fn user() -> User {
        User {
            id: "u1".to_owned(),
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_fresh_store_is_logged_out() {
        let store = SessionStore::load(temporary_storage("session-fresh"));
        assert!(!store.is_authenticated());
        assert_eq!(store.role(), None);
    }

    #[test]
    fn test_login_persists() -> Result {
        let storage = temporary_storage("session-login");
        let mut store = SessionStore::load(storage.clone());
        store.login(AuthResponse { user: user(), token: "t0k3n".to_owned() })?;
        assert!(store.is_authenticated());

        let restored = SessionStore::load(storage);
        assert_eq!(restored.token(), Some("t0k3n"));
        assert_eq!(restored.role(), Some(&Role::Admin));
        Ok(())
    }

    #[test]
    fn test_persisted_fields() -> Result {
        let storage = temporary_storage("session-fields");
        let mut store = SessionStore::load(storage.clone());
        store.login(AuthResponse { user: user(), token: "t0k3n".to_owned() })?;
        let persisted = storage.read::<serde_json::Value>(STORAGE_NAME)?.unwrap();
        let mut keys = persisted.as_object().unwrap().keys().collect::<Vec<_>>();
        keys.sort();
        assert_eq!(keys, ["token", "user"]);
        Ok(())
    }

    #[test]
    fn test_logout_persists() -> Result {
        let storage = temporary_storage("session-logout");
        let mut store = SessionStore::load(storage.clone());
        store.login(AuthResponse { user: user(), token: "t0k3n".to_owned() })?;
        store.logout()?;
        assert!(!SessionStore::load(storage).is_authenticated());
        Ok(())
    }

    #[test]
    fn test_corrupt_session_is_logged_out() -> Result {
        let storage = temporary_storage("session-corrupt");
        fs::create_dir_all(storage.root())?;
        fs::write(storage.root().join("auth-storage.json"), "][")?;
        assert!(!SessionStore::load(storage).is_authenticated());
        Ok(())
    }

    #[test]
    fn test_login_with_token() -> Result {
        #[derive(Serialize)]
        struct Claims {
            id: &'static str,
            name: &'static str,
            email: &'static str,
            role: &'static str,
            iat: u64,
        }

        let token = jsonwebtoken::encode(
            &Header::default(),
            &Claims {
                id: "u2",
                name: "Grace Hopper",
                email: "grace@example.com",
                role: "guest",
                iat: 1_700_000_000,
            },
            &EncodingKey::from_secret(b"backend-only"),
        )?;
        let mut store = SessionStore::load(temporary_storage("session-jwt"));
        store.login_with_token(&token)?;
        assert_eq!(store.user().map(|user| user.id.as_str()), Some("u2"));
        assert_eq!(store.role(), Some(&Role::Guest));
        assert_eq!(store.token(), Some(token.as_str()));
        Ok(())
    }

    #[test]
    fn test_login_with_garbage_token() {
        let mut store = SessionStore::load(temporary_storage("session-garbage"));
        assert!(store.login_with_token("not-a-jwt").is_err());
        assert!(!store.is_authenticated());
    }
}
