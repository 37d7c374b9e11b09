//! Staff identity for HTTP requests.
//!
//! Sign-in happens in front of this service. The gateway forwards the staff
//! member's identity in headers:
//!
//! ```text
//! X-User-Id: <id>
//! X-User-Email: <email>
//! X-User-Role: staff | admin
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::domain::foundation::{CurrentUser, UserId};

use super::error::ApiError;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_EMAIL_HEADER: &str = "X-User-Email";
pub const USER_ROLE_HEADER: &str = "X-User-Role";

/// Extractor for the signed-in staff member.
#[derive(Debug, Clone)]
pub struct Staff(pub CurrentUser);

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Builds the current user from forwarded headers.
pub fn current_user(headers: &HeaderMap) -> Result<CurrentUser, ApiError> {
    let id = header(headers, USER_ID_HEADER)
        .and_then(|s| UserId::new(s).ok())
        .ok_or_else(|| ApiError::unauthorized("Authentication is required"))?;
    let email = header(headers, USER_EMAIL_HEADER).unwrap_or_default();

    Ok(match header(headers, USER_ROLE_HEADER) {
        Some(role) if role.eq_ignore_ascii_case("admin") => CurrentUser::admin(id, email),
        _ => CurrentUser::staff(id, email),
    })
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Staff
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_user(&parts.headers).map(Staff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn missing_user_id_is_unauthorized() {
        let err = current_user(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.code(), crate::domain::foundation::ErrorCode::Unauthorized);
    }

    #[test]
    fn role_header_selects_admin() {
        let user = current_user(&headers(&[
            ("x-user-id", "u-1"),
            ("x-user-email", "boss@gym.test"),
            ("x-user-role", "Admin"),
        ]))
        .unwrap();
        assert!(user.is_admin());
        assert_eq!(user.email, "boss@gym.test");
    }

    #[test]
    fn defaults_to_staff_role() {
        let user = current_user(&headers(&[("x-user-id", "u-2")])).unwrap();
        assert!(!user.is_admin());
    }
}
