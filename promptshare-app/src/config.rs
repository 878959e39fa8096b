use promptshare_errors::AppError;

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:3000/auth/callback";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} must be set")))
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            google_client_id: required("GOOGLE_ID")?,
            google_client_secret: required("GOOGLE_CLIENT_SECRET")?,
            google_redirect_uri: lookup("GOOGLE_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_loads_all_values() {
        let vars = env(&[
            ("DATABASE_URL", "postgres://localhost/promptshare"),
            ("GOOGLE_ID", "client"),
            ("GOOGLE_CLIENT_SECRET", "secret"),
            ("GOOGLE_REDIRECT_URI", "https://promptshare.dev/auth/callback"),
        ]);

        let config = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.google_client_id, "client");
        assert_eq!(config.google_redirect_uri, "https://promptshare.dev/auth/callback");
    }

    #[test]
    fn test_redirect_uri_has_default() {
        let vars = env(&[
            ("DATABASE_URL", "postgres://localhost/promptshare"),
            ("GOOGLE_ID", "client"),
            ("GOOGLE_CLIENT_SECRET", "secret"),
        ]);

        let config = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.google_redirect_uri, DEFAULT_REDIRECT_URI);
    }

    #[test]
    fn test_missing_or_blank_secret_is_an_error() {
        let vars = env(&[
            ("DATABASE_URL", "postgres://localhost/promptshare"),
            ("GOOGLE_ID", "client"),
            ("GOOGLE_CLIENT_SECRET", "  "),
        ]);

        let err = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert_eq!(err, AppError::Config("GOOGLE_CLIENT_SECRET must be set".to_string()));
    }
}
