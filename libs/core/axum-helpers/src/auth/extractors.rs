//! Extractors that enforce an access tier on top of `optional_jwt_auth_middleware`.

use super::jwt::JwtClaims;
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Any signed-in user. Rejects with 401 when no valid token was presented.
#[derive(Debug, Clone)]
pub struct AuthUser(pub JwtClaims);

/// A signed-in user holding the `admin` role.
///
/// 401 without a valid token, 403 when the role is missing.
#[derive(Debug, Clone)]
pub struct AdminUser(pub JwtClaims);

fn claims_from(parts: &Parts) -> Result<JwtClaims, AppError> {
    parts
        .extensions
        .get::<JwtClaims>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("Not authorized, no valid token".to_string()))
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        claims_from(parts).map(AuthUser)
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = claims_from(parts)?;
        if !claims.is_admin() {
            tracing::info!(user_id = %claims.sub, "Non-admin user denied admin endpoint");
            return Err(AppError::Forbidden("Not authorized as an admin".to_string()));
        }
        Ok(AdminUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    fn claims(roles: &[&str]) -> JwtClaims {
        JwtClaims {
            sub: "user-1".into(),
            email: "user@example.com".into(),
            name: "User One".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 0,
            iat: 0,
            jti: "jti".into(),
        }
    }

    fn parts_with(claims: Option<JwtClaims>) -> Parts {
        let mut request = Request::builder().uri("/").body(()).unwrap();
        if let Some(claims) = claims {
            request.extensions_mut().insert(claims);
        }
        request.into_parts().0
    }

    #[tokio::test]
    async fn test_auth_user_requires_claims() {
        let mut parts = parts_with(None);
        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_user_accepts_any_role() {
        let mut parts = parts_with(Some(claims(&[])));
        let AuthUser(found) = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(found.sub, "user-1");
    }

    #[tokio::test]
    async fn test_admin_user_forbidden_without_role() {
        let mut parts = parts_with(Some(claims(&["customer"])));
        let err = AdminUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_user_unauthorized_without_token() {
        let mut parts = parts_with(None);
        let err = AdminUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_user_accepts_admin() {
        let mut parts = parts_with(Some(claims(&["admin"])));
        assert!(AdminUser::from_request_parts(&mut parts, &()).await.is_ok());
    }
}
