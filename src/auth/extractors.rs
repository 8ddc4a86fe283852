use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use tracing::{debug, warn};
use uuid::Uuid;

use super::claims::Claims;
use crate::state::AppState;

/// Verification key and expected issuer/audience.
#[derive(Clone)]
pub struct JwtKeys {
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let cfg = &state.config.jwt;
        Self {
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
        }
    }
}

impl JwtKeys {
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

/// Extracts and validates the bearer JWT, returning the user ID.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing Authorization header".to_string(),
            ))?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header".to_string(),
            ))?;

        match keys.verify(token) {
            Ok(claims) => Ok(AuthUser(claims.sub)),
            Err(e) => {
                warn!(error = %e, "invalid or expired token");
                Err((
                    StatusCode::UNAUTHORIZED,
                    "Invalid or expired token".to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use time::OffsetDateTime;

    fn token(secret: &str, iss: &str, aud: &str, sub: Uuid) -> String {
        let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
        let claims = Claims {
            sub,
            iat: now,
            exp: now + 300,
            iss: iss.into(),
            aud: aud.into(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    async fn extract(state: &AppState, header: Option<String>) -> Result<Uuid, StatusCode> {
        let mut builder = Request::builder().uri("/api/v1/profile");
        if let Some(h) = header {
            builder = builder.header(axum::http::header::AUTHORIZATION, h);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, state)
            .await
            .map(|AuthUser(id)| id)
            .map_err(|(status, _)| status)
    }

    #[tokio::test]
    async fn accepts_valid_bearer_token() {
        let state = AppState::fake();
        let user = Uuid::new_v4();
        let t = token("test", "test-issuer", "test-aud", user);
        assert_eq!(extract(&state, Some(format!("Bearer {t}"))).await, Ok(user));
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        let state = AppState::fake();
        assert_eq!(extract(&state, None).await, Err(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn rejects_wrong_scheme() {
        let state = AppState::fake();
        let t = token("test", "test-issuer", "test-aud", Uuid::new_v4());
        assert_eq!(
            extract(&state, Some(format!("Basic {t}"))).await,
            Err(StatusCode::UNAUTHORIZED)
        );
    }

    #[tokio::test]
    async fn rejects_foreign_audience_or_secret() {
        let state = AppState::fake();
        let wrong_aud = token("test", "test-issuer", "other-aud", Uuid::new_v4());
        assert_eq!(
            extract(&state, Some(format!("Bearer {wrong_aud}"))).await,
            Err(StatusCode::UNAUTHORIZED)
        );
        let wrong_secret = token("nope", "test-issuer", "test-aud", Uuid::new_v4());
        assert_eq!(
            extract(&state, Some(format!("Bearer {wrong_secret}"))).await,
            Err(StatusCode::UNAUTHORIZED)
        );
    }
}
