use jsonwebtoken::{decode, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Claims minted by the external identity service. This API only verifies;
/// it never issues tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    fn test_config(secret: &str) -> Config {
        Config {
            database_url: "postgres://test".into(),
            host: "127.0.0.1".into(),
            port: 8080,
            frontend_url: "http://localhost:3000".into(),
            jwt_secret: secret.into(),
            telegram_bot_token: String::new(),
            reminder_hour_utc: 21,
        }
    }

    fn mint(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_accepts_valid_token() {
        let config = test_config("secret");
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: "a@b.com".into(),
            name: Some("Test".into()),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        };

        let data = verify_token(&mint(&claims, "secret"), &config).unwrap();
        assert_eq!(data.claims.sub, user_id);
        assert_eq!(data.claims.email, "a@b.com");
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let config = test_config("secret");
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@b.com".into(),
            name: None,
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
        };

        assert!(verify_token(&mint(&claims, "secret"), &config).is_err());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let config = test_config("secret");
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@b.com".into(),
            name: None,
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        };

        assert!(verify_token(&mint(&claims, "other-secret"), &config).is_err());
    }
}
