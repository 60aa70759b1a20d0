//! Request extractors.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
};
use uuid::Uuid;

/// The resolved identity of the requesting user.
///
/// Session resolution lives outside this service; the proxy in front of
/// it forwards the resolved user as the `x-user-id` header. Every engine
/// operation takes the identity from here explicitly, so there is no
/// ambient current-user state to memoize.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

fn extract_user_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_user_id(&parts.headers)
            .map(CurrentUser)
            .ok_or((StatusCode::UNAUTHORIZED, "Missing or invalid x-user-id header"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_user_id_from_header() {
        let mut headers = HeaderMap::new();
        let id = "550e8400-e29b-41d4-a716-446655440000";
        headers.insert("x-user-id", id.parse().unwrap());

        assert_eq!(extract_user_id(&headers), Some(Uuid::parse_str(id).unwrap()));
    }

    #[test]
    fn test_extract_user_id_missing_header() {
        assert_eq!(extract_user_id(&HeaderMap::new()), None);
    }

    #[test]
    fn test_extract_user_id_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", "not-a-uuid".parse().unwrap());

        assert_eq!(extract_user_id(&headers), None);
    }
}
