//! `Caller` extractor: the principal supplied by the identity proxy.
//!
//! The proxy has already authenticated the request; both headers are
//! trusted as-is.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use nexus_core::error::AppError;
use nexus_core::types::Principal;

use crate::error::ApiError;

/// Header carrying the caller's research group.
pub const GROUP_HEADER: &str = "x-group-id";
/// Header carrying the caller's email.
pub const USER_HEADER: &str = "x-user-email";

/// The calling principal, available in handlers.
#[derive(Debug, Clone)]
pub struct Caller(pub Principal);

impl std::ops::Deref for Caller {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let group_id = header(parts, GROUP_HEADER)
            .ok_or_else(|| AppError::validation(format!("Missing {GROUP_HEADER} header")))?;
        let email = header(parts, USER_HEADER)
            .ok_or_else(|| AppError::validation(format!("Missing {USER_HEADER} header")))?;

        let principal = Principal::new(group_id, email);
        principal.validate()?;
        Ok(Self(principal))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;
    use nexus_core::error::ErrorKind;

    use super::*;

    async fn extract(request: Request<()>) -> Result<Caller, ApiError> {
        let (mut parts, _) = request.into_parts();
        Caller::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_headers_become_principal() {
        let request = Request::builder()
            .header(GROUP_HEADER, "g1")
            .header(USER_HEADER, "ana@lab.edu")
            .body(())
            .unwrap();

        let caller = extract(request).await.unwrap();
        assert_eq!(caller.group_id.as_str(), "g1");
        assert_eq!(caller.email.as_str(), "ana@lab.edu");
    }

    #[tokio::test]
    async fn test_missing_or_blank_header_is_validation() {
        let request = Request::builder()
            .header(GROUP_HEADER, "g1")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.unwrap_err().0.kind, ErrorKind::Validation);

        let request = Request::builder()
            .header(GROUP_HEADER, "  ")
            .header(USER_HEADER, "ana@lab.edu")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.unwrap_err().0.kind, ErrorKind::Validation);
    }
}
