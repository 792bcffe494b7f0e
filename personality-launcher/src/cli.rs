use backend::dbs::DatabaseConfig;
use clap::{Parser, ValueEnum};
use std::net::IpAddr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    /// Logs are emitted as JSON lines
    Production,
}

#[derive(Parser, Debug)]
#[command(about = "Personalities REST API server")]
pub struct Cli {
    #[arg(long, env = "SERVER_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,
    #[arg(long, env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = Environment::Development)]
    pub env: Environment,
    /// Full connection string; overrides the individual --db-* options.
    /// `sqlite:` URLs select the embedded store.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,
    #[arg(long, env = "DB_PASSWORD", default_value = "postgres", hide_env_values = true)]
    pub db_password: String,
    #[arg(long, env = "DB_NAME", default_value = "postgres")]
    pub db_name: String,
    #[arg(long, env = "DB_SSLMODE", default_value = "disable")]
    pub db_sslmode: String,
}

impl Cli {
    pub fn database_config(&self) -> DatabaseConfig {
        match &self.database_url {
            Some(url) if url.starts_with("sqlite:") => DatabaseConfig::Local { url: url.clone() },
            Some(url) => DatabaseConfig::Postgres { url: url.clone() },
            None => DatabaseConfig::Postgres {
                url: self.postgres_url(),
            },
        }
    }

    /// Connection string assembled from the individual `--db-*` options.
    pub fn postgres_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_name, self.db_sslmode
        )
    }
}
