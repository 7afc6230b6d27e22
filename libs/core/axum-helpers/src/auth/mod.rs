//! Authentication and authorization.
//!
//! - Stateless HS256 JWT issuing and verification ([`JwtAuth`])
//! - Middleware that attaches [`JwtClaims`] to requests
//! - [`AuthUser`] / [`AdminUser`] extractors that enforce an access tier
//!
//! ```ignore
//! use axum_helpers::auth::{AdminUser, JwtAuth, JwtConfig, optional_jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! async fn delete_thing(AdminUser(claims): AdminUser) { /* ... */ }
//!
//! let routes = Router::new()
//!     .route("/things/{id}", delete(delete_thing))
//!     .layer(axum::middleware::from_fn_with_state(auth, optional_jwt_auth_middleware));
//! ```

pub mod config;
pub mod extractors;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use extractors::{AdminUser, AuthUser};
pub use jwt::{ACCESS_TOKEN_TTL, ADMIN_ROLE, JwtAuth, JwtClaims};
pub use middleware::optional_jwt_auth_middleware;
