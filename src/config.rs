use anyhow::Context;
use serde::Deserialize;

/// Verification settings for tokens issued by the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    /// Lifetime of presigned photo URLs.
    pub presign_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisionConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    pub vision: VisionConfig,
}

fn var(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("missing env var {}", name))
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

fn parsed_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: var("JWT_SECRET")?,
            issuer: var_or("JWT_ISSUER", "platesense"),
            audience: var_or("JWT_AUDIENCE", "platesense-users"),
        };
        let storage = StorageConfig {
            endpoint: var("MINIO_ENDPOINT")?,
            bucket: var("MINIO_BUCKET")?,
            access_key: var("MINIO_ACCESS_KEY")?,
            secret_key: var("MINIO_SECRET_KEY")?,
            region: var_or("MINIO_REGION", "us-east-1"),
            presign_ttl_secs: parsed_or("PHOTO_URL_TTL_SECS", 30 * 60),
        };
        let vision = VisionConfig {
            endpoint: var("VISION_ENDPOINT")?,
            api_key: std::env::var("VISION_API_KEY").ok().filter(|k| !k.is_empty()),
            model: var_or("VISION_MODEL", "gpt-4o"),
            max_tokens: parsed_or("VISION_MAX_TOKENS", 800),
            timeout_secs: parsed_or("VISION_TIMEOUT_SECS", 60),
        };
        Ok(Self {
            database_url,
            jwt,
            storage,
            vision,
        })
    }
}
