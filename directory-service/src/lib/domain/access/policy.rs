//! Role and ownership authorization decisions.
//!
//! Pure functions of claims and resource owner; no I/O, no clock. The
//! request-handling layer decides how a denial surfaces (forbidden vs
//! not-found).

use crate::domain::access::models::SessionClaims;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

/// Decide whether the caller may operate on a resource with the given owner.
///
/// Admins may access any resource; plain users only their own; anonymous
/// callers never.
pub fn can_access(claims: Option<&SessionClaims>, owner: UserId) -> bool {
    match claims {
        Some(claims) => match claims.role {
            Role::Admin => true,
            Role::User => claims.user_id() == owner,
        },
        None => false,
    }
}

/// Decide whether the caller holds the required role.
///
/// Admin satisfies every role requirement; anonymous callers satisfy none.
pub fn has_role(claims: Option<&SessionClaims>, required: Role) -> bool {
    claims.map_or(false, |claims| {
        claims.role == Role::Admin || claims.role == required
    })
}
