// SPDX-License-Identifier: MIT

//! JWT claim extraction.
//!
//! Tokens are decoded without signature verification: this client only
//! reads display identity and realm roles for UX decisions. The backend
//! is the security boundary and validates tokens on every call.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::AppError;

/// Realm role required for submit/withdraw operations.
pub const ADVISOR_ROLE: &str = "dosen";

/// Identity and role claims extracted from an access or id token.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub name: Option<String>,
    pub preferred_username: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub realm_access: RealmAccess,
}

/// The Keycloak `realm_access` claim.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Claims {
    /// Display name, falling back to the login name when `name` is absent.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.preferred_username.as_deref())
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.realm_access.roles.iter().any(|r| r == role)
    }
}

/// Decode the claims of a JWT without verifying its signature.
pub fn extract_claims(token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = Default::default();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| AppError::Decode(format!("token claims: {e}")))?;
    Ok(data.claims)
}
