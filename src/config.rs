use log::warn;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub jwt_expiry: i64, // In hours
    pub client_url: String,
    pub upload_dir: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub super_admin_email: Option<String>,
    pub super_admin_password: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(val) => val,
            Err(e) => {
                warn!("Failed to load JWT_SECRET: {}", e);
                warn!("Generated a random secret for this run - issued tokens will not survive a restart");
                Self::generate_secure_secret()
            }
        };

        let jwt_expiry = env::var("JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(24);

        let client_url = env::var("CLIENT_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        let openai_api_key = env::var("OPENAI_API_KEY").ok();
        let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let super_admin_email = env::var("SUPER_ADMIN_EMAIL").ok();
        let super_admin_password = env::var("SUPER_ADMIN_PASSWORD").ok();

        Self {
            jwt_secret,
            jwt_expiry,
            client_url,
            upload_dir,
            openai_api_key,
            openai_model,
            openai_base_url,
            super_admin_email,
            super_admin_password,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 16 {
            warn!("JWT_SECRET is shorter than 16 characters - not secure for production!");
        }

        if self.jwt_expiry <= 0 {
            return Err("JWT_EXPIRY_HOURS must be positive".to_string());
        }

        if self.openai_api_key.is_none() {
            warn!("OPENAI_API_KEY not set - AI chat endpoint will return an error");
        }

        Ok(())
    }

    pub fn generate_secure_secret() -> String {
        thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_expiry: 24,
            client_url: "http://localhost:5173".to_string(),
            upload_dir: "uploads".to_string(),
            openai_api_key: Some("key".to_string()),
            openai_model: "gpt-4o-mini".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            super_admin_email: None,
            super_admin_password: None,
        }
    }

    #[test]
    fn rejects_non_positive_expiry() {
        let mut cfg = base_config();
        cfg.jwt_expiry = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn accepts_sane_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn generated_secret_is_32_chars() {
        let secret = AppConfig::generate_secure_secret();
        assert_eq!(secret.len(), 32);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn missing_jwt_secret_falls_back_to_generated() {
        std::env::remove_var("JWT_SECRET");
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.jwt_secret.len(), 32);
        assert!(cfg.jwt_secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
