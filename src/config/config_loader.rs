use anyhow::Result;

use super::config_model::{Database, DotEnvyConfig, Server};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: database_url(),
    };

    Ok(DotEnvyConfig { server, database })
}

// DATABASE_URL wins when set; otherwise the URL is assembled from the
// individual DB_* variables.
fn database_url() -> String {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return url;
    }

    format!(
        "postgres://{}:{}@{}:{}/{}?sslmode=disable",
        std::env::var("DB_USER").expect("DB_USER is invalid"),
        std::env::var("DB_PASSWORD").expect("DB_PASSWORD is invalid"),
        std::env::var("DB_HOST").expect("DB_HOST is invalid"),
        std::env::var("DB_PORT").expect("DB_PORT is invalid"),
        std::env::var("DB_NAME").expect("DB_NAME is invalid"),
    )
}
