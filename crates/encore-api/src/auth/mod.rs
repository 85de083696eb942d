// Authentication module
// Decision: Sessions are issued by the managed backend; this service only validates them
//
// Viewer identity comes from the backend's HS256 access token, sent either as
// `Authorization: Bearer <token>` (API clients) or the `sb-access-token`
// cookie (browser). The token's `sub` claim is the user id.

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::{AuthConfig, JwtConfig};
pub use jwt::{AccessTokenClaims, JwtService};
pub use middleware::{AuthError, AuthState, AuthUser, FromRef, OptionalAuthUser};
