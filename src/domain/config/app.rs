use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_TTL_SECONDS: u64 = 24 * 60 * 60;
const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
const DEFAULT_UPLOAD_DIR: &str = "./uploads/file";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageProvider {
    Local,
    Supabase,
}

impl StorageProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageProvider::Local => "local",
            StorageProvider::Supabase => "supabase",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SupabaseSecrets {
    pub storage_url: String,
    pub api_key: String,
    pub bucket_name: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    pub upload_dir: String,
    pub supabase: Option<SupabaseSecrets>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_seconds: u64,
    pub bcrypt_cost: u32,
    pub max_upload_bytes: usize,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any name -> value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let db_max_connections =
            parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
        let token_ttl_seconds = parse_or(&lookup, "TOKEN_TTL_SECONDS", DEFAULT_TOKEN_TTL_SECONDS)?;
        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }
        let max_upload_bytes = parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let provider = match lookup("STORAGE_PROVIDER").as_deref() {
            None | Some("local") => StorageProvider::Local,
            Some("supabase") => StorageProvider::Supabase,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORAGE_PROVIDER",
                    value: other.to_string(),
                })
            }
        };

        let supabase = if provider == StorageProvider::Supabase {
            Some(SupabaseSecrets {
                storage_url: required("SUPABASE_STORAGE_URL")?,
                api_key: required("SUPABASE_API_KEY")?,
                bucket_name: required("SUPABASE_BUCKET")?,
            })
        } else {
            None
        };

        Ok(Self {
            port,
            database_url,
            db_max_connections,
            jwt_secret,
            token_ttl_seconds,
            bcrypt_cost,
            max_upload_bytes,
            cors_allowed_origins,
            storage: StorageConfig {
                provider,
                upload_dir: lookup("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
                supabase,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
