//! Bearer-token caller resolution.
//!
//! Token issuance lives elsewhere; this extractor only looks the token up in
//! the session store and attaches the resulting `Caller` to the handler.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

use crate::errors::AppError;
use crate::models::user::{Caller, Role};
use crate::state::AppState;

/// Extractor for routes that require an authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Caller);

impl AuthUser {
    /// Rejects callers whose role differs from `role`.
    pub fn require_role(&self, role: Role, action: &str) -> Result<(), AppError> {
        if self.0.role != role {
            return Err(AppError::Forbidden(format!(
                "Only {} accounts can {action}",
                role.as_str()
            )));
        }
        Ok(())
    }
}

/// The credentials of a `Bearer` authorization header. The scheme name is
/// matched case-insensitively.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;

        let caller = state
            .sessions
            .resolve(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        debug!("Authenticated {} ({})", caller.user_id, caller.role.as_str());
        Ok(AuthUser(caller))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsed() {
        assert_eq!(bearer_token(&parts_with(Some("Bearer abc123"))), Some("abc123"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert_eq!(bearer_token(&parts_with(Some("bearer abc123"))), Some("abc123"));
        assert_eq!(bearer_token(&parts_with(Some("BEARER  abc123 "))), Some("abc123"));
    }

    #[test]
    fn test_missing_or_malformed_header_yields_none() {
        assert_eq!(bearer_token(&parts_with(None)), None);
        assert_eq!(bearer_token(&parts_with(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearer   "))), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearerabc"))), None);
    }

    #[test]
    fn test_require_role() {
        let user = AuthUser(Caller {
            user_id: uuid::Uuid::new_v4(),
            email: "r@example.com".to_string(),
            role: Role::Recruiter,
        });
        assert!(user.require_role(Role::Recruiter, "search").is_ok());
        assert!(matches!(
            user.require_role(Role::Talent, "register profiles"),
            Err(AppError::Forbidden(_))
        ));
    }
}
