use db::models::user::Role;
use serde::{Deserialize, Serialize};

/// JWT payload issued at login.
///
/// `role` is the authoritative role claim; handlers and guards trust it after
/// signature verification and never re-derive a role from any other field.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
