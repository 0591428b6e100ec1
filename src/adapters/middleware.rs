use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    application::{
        error::{ApplicationError, AuthError},
        services::TokenService,
    },
    domain::models::identity::AuthenticatedUser,
};

const BEARER_PREFIX: &str = "bearer ";

/// Returns the token following a case-insensitive `Bearer ` prefix.
pub fn extract_bearer_token(authorization: &str) -> Option<&str> {
    let prefix = authorization.get(..BEARER_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }

    let token = authorization[BEARER_PREFIX.len()..].trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Resolves the caller from a raw `Authorization` header value.
pub fn authenticate(
    token_service: &dyn TokenService,
    authorization: Option<&str>,
) -> Result<AuthenticatedUser, AuthError> {
    let token = authorization
        .and_then(extract_bearer_token)
        .ok_or(AuthError::MissingToken)?;

    let subject = token_service.decode(token)?;
    let id = subject.id.ok_or(AuthError::MissingIdentity)?;

    Ok(AuthenticatedUser {
        id,
        username: subject.username,
    })
}

/// Middleware guarding every protected route.
///
/// On success the caller is available to handlers as `Extension<AuthenticatedUser>`.
pub async fn require_bearer_token(
    State(token_service): State<Arc<dyn TokenService>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApplicationError> {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let user = authenticate(token_service.as_ref(), authorization)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::models::identity::TokenSubject, services::JwtTokenService};

    #[test]
    fn bearer_prefix_is_case_insensitive() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("BEARER abc"), Some("abc"));
    }

    #[test]
    fn other_schemes_and_empty_tokens_yield_nothing() {
        assert_eq!(extract_bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Bearer"), None);
        assert_eq!(extract_bearer_token(""), None);
        assert_eq!(extract_bearer_token("Beärer abc"), None);
    }

    #[test]
    fn valid_token_yields_its_user_id() {
        let tokens = JwtTokenService::new("secret", 3600);
        for id in [1, 42, i32::MAX] {
            let token = tokens.issue(&TokenSubject::new("bob", id)).unwrap();
            let header = format!("Bearer {}", token);

            let user = authenticate(&tokens, Some(&header)).unwrap();

            assert_eq!(user.id, id);
            assert_eq!(user.username.as_deref(), Some("bob"));
        }
    }

    #[test]
    fn absent_or_malformed_headers_are_rejected() {
        let tokens = JwtTokenService::new("secret", 3600);

        assert_eq!(authenticate(&tokens, None), Err(AuthError::MissingToken));
        assert_eq!(
            authenticate(&tokens, Some("Token abc")),
            Err(AuthError::MissingToken)
        );
        assert!(matches!(
            authenticate(&tokens, Some("Bearer abc.def.ghi")),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn token_without_id_is_distinguished_from_malformed_token() {
        let tokens = JwtTokenService::new("secret", 3600);
        let token = tokens
            .issue(&TokenSubject {
                username: Some("nobody".to_string()),
                id: None,
            })
            .unwrap();
        let header = format!("bearer {}", token);

        assert_eq!(
            authenticate(&tokens, Some(&header)),
            Err(AuthError::MissingIdentity)
        );
    }
}
