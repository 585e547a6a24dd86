//! Auth Middleware
//!
//! Validates the bearer token, loads the account, and threads the caller
//! into the request as an explicit [`RequestUser`] extension. Role checks
//! stay in the handlers.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::context::{RequestUser, Role};
use kernel::id::UserId;
use platform::jwt::{JwtError, JwtManager};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::error::IdentityError;

/// Middleware state
#[derive(Clone)]
pub struct AuthState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub jwt: Arc<JwtManager>,
}

/// Middleware that requires a valid bearer token.
///
/// On success the request carries a [`RequestUser`] extension; handlers
/// receive it as an extractor argument.
pub async fn require_auth<R>(
    State(state): State<AuthState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = bearer_token(&req).ok_or_else(|| IdentityError::InvalidToken.into_response())?;

    let claims = state.jwt.validate(token).map_err(|e| {
        match e {
            JwtError::Expired => tracing::debug!("Expired bearer token"),
            _ => tracing::debug!(error = %e, "Invalid bearer token"),
        }
        IdentityError::InvalidToken.into_response()
    })?;

    let user_uuid: Uuid = claims
        .sub
        .parse()
        .map_err(|_| IdentityError::InvalidToken.into_response())?;

    // The subject must still exist and be active
    let user = state
        .repo
        .find_by_id(&UserId::from_uuid(user_uuid))
        .await
        .map_err(|e| e.into_response())?
        .ok_or_else(|| IdentityError::InvalidToken.into_response())?;

    if !user.can_login() {
        return Err(IdentityError::AccountDisabled.into_response());
    }

    let role = Role::from_code(&claims.role)
        .ok_or_else(|| IdentityError::InvalidToken.into_response())?;

    req.extensions_mut()
        .insert(RequestUser::new(user_uuid, claims.email, role));

    Ok(next.run(req).await)
}

fn bearer_token<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        let req = Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc.def.ghi")
            .body(())
            .unwrap();
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));

        let no_prefix = Request::builder()
            .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(())
            .unwrap();
        assert_eq!(bearer_token(&no_prefix), None);

        let missing = Request::builder().body(()).unwrap();
        assert_eq!(bearer_token(&missing), None);
    }
}
