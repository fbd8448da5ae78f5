use std::fmt::{Display, Formatter};

use http::Method;
use serde::{Deserialize, Serialize};

use crate::{
    api::{Api, ApiError},
    prelude::*,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub role: Role,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Guest,

    Admin,

    /// Role this client does not know about, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guest => write!(f, "guest"),
            Self::Admin => write!(f, "admin"),
            Self::Other(role) => write!(f, "{role}"),
        }
    }
}

/// Login and registration response: the user flattened together with the token.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: User,

    pub token: String,
}

impl Api {
    #[instrument(skip_all, fields(email = email))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        #[derive(Serialize)]
        struct RegisterRequest<'a> {
            name: &'a str,
            email: &'a str,
            password: &'a str,
        }

        info!("registering…");
        self.call_with_body(
            Method::POST,
            &["auth", "register"],
            &RegisterRequest { name, email, password },
        )
        .await
    }

    #[instrument(skip_all, fields(email = email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        info!("logging in…");
        self.call_with_body(Method::POST, &["auth", "login"], &LoginRequest { email, password })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_auth_response_ok() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"
            {
                "_id": "665f1c2e9b1d8c0012345678",
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "role": "admin",
                "token": "eyJhbGciOiJIUzI1NiJ9.e30.sig"
            }
        "#;
        let response = serde_json::from_str::<AuthResponse>(RESPONSE)?;
        assert_eq!(response.user.id, "665f1c2e9b1d8c0012345678");
        assert_eq!(response.user.role, Role::Admin);
        assert_eq!(response.token, "eyJhbGciOiJIUzI1NiJ9.e30.sig");
        Ok(())
    }

    #[test]
    fn test_unknown_role_is_kept() -> Result {
        let user = serde_json::from_str::<User>(r#"{"_id": "1", "role": "housekeeping"}"#)?;
        assert_eq!(user.role, Role::Other("housekeeping".to_owned()));
        assert_eq!(serde_json::to_string(&user.role)?, r#""housekeeping""#);
        Ok(())
    }

    #[test]
    fn test_missing_role_is_guest() -> Result {
        let user = serde_json::from_str::<User>(r#"{"_id": "1", "name": "Bob"}"#)?;
        assert_eq!(user.role, Role::Guest);
        Ok(())
    }
}
