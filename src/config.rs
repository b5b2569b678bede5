/*
 * Responsibility
 * - 環境変数の読み込み (DATABASE_URL, JWT_SECRET, CORS 許可, timeout など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - 起動時に一度だけ作り、以後は不変 (&Config / Arc で共有)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// HS256 の鍵として最低限必要な長さ (bytes)
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub jwt_secret: String,
    pub access_token_ttl_seconds: i64,
    pub access_token_leeway_seconds: i64,

    pub user_lookup_timeout: Duration,
    pub request_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // jwt_secret / database_url は出さない
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("access_token_leeway_seconds", &self.access_token_leeway_seconds)
            .field("user_lookup_timeout", &self.user_lookup_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = env_or("PORT", 3000)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins =
            parse_origins(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        validate_jwt_secret(&jwt_secret)?;

        let access_token_ttl_seconds = env_or("ACCESS_TOKEN_TTL_SECONDS", 3600_i64)?;
        if access_token_ttl_seconds <= 0 {
            return Err(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"));
        }

        let access_token_leeway_seconds = env_or("ACCESS_TOKEN_LEEWAY_SECONDS", 0_i64)?;
        if access_token_leeway_seconds < 0 {
            return Err(ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"));
        }

        let user_lookup_timeout = Duration::from_millis(non_zero(
            "USER_LOOKUP_TIMEOUT_MS",
            env_or("USER_LOOKUP_TIMEOUT_MS", 2000_u64)?,
        )?);
        let request_timeout = Duration::from_secs(non_zero(
            "REQUEST_TIMEOUT_SECONDS",
            env_or("REQUEST_TIMEOUT_SECONDS", 30_u64)?,
        )?);

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            jwt_secret,
            access_token_ttl_seconds,
            access_token_leeway_seconds,
            user_lookup_timeout,
            request_timeout,
        })
    }
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    parse_or(key, std::env::var(key).ok().as_deref(), default)
}

/// 未設定なら default。設定されていて parse できない値は起動失敗にする
fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<&str>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse::<T>().map_err(|_| ConfigError::Invalid(key)),
    }
}

/// 0 秒の timeout は即時失敗になるので受け付けない
fn non_zero(key: &'static str, value: u64) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid(key));
    }
    Ok(value)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn validate_jwt_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_JWT_SECRET_LEN {
        return Err(ConfigError::Invalid("JWT_SECRET"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_trims_and_drops_empty_entries() {
        let origins = parse_origins(" https://a.example , ,https://b.example,");
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn parse_origins_of_empty_string_is_empty() {
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn unset_value_falls_back_to_default() {
        let ttl = parse_or("ACCESS_TOKEN_TTL_SECONDS", None, 3600_i64).unwrap();
        assert_eq!(ttl, 3600);
    }

    #[test]
    fn set_value_is_parsed_with_surrounding_whitespace() {
        let timeout = parse_or("USER_LOOKUP_TIMEOUT_MS", Some(" 250 "), 2000_u64).unwrap();
        assert_eq!(timeout, 250);
    }

    #[test]
    fn unparsable_value_is_invalid_not_default() {
        let cases = [
            ("ACCESS_TOKEN_LEEWAY_SECONDS", "30s"),
            ("ACCESS_TOKEN_TTL_SECONDS", "1h"),
            ("ACCESS_TOKEN_TTL_SECONDS", ""),
        ];
        for (key, raw) in cases {
            let err = parse_or(key, Some(raw), 0_i64).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(k) if k == key), "{key}={raw}");
        }

        let err = parse_or("USER_LOOKUP_TIMEOUT_MS", Some("2s"), 2000_u64).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("USER_LOOKUP_TIMEOUT_MS")));

        let err = parse_or("REQUEST_TIMEOUT_SECONDS", Some("-1"), 30_u64).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS")));
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        let err = non_zero("REQUEST_TIMEOUT_SECONDS", 0).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS")));

        let err = non_zero("USER_LOOKUP_TIMEOUT_MS", 0).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("USER_LOOKUP_TIMEOUT_MS")));

        assert_eq!(non_zero("USER_LOOKUP_TIMEOUT_MS", 1).unwrap(), 1);
    }

    #[test]
    fn short_jwt_secret_is_rejected() {
        let err = validate_jwt_secret("too-short").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("JWT_SECRET")));
        assert!(validate_jwt_secret(&"x".repeat(MIN_JWT_SECRET_LEN)).is_ok());
    }
}
