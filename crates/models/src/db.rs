use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

pub use configs::DatabaseConfig;

/// Open a pooled connection using the pool settings from `cfg`.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(cfg.connect_timeout())
        .acquire_timeout(cfg.acquire_timeout())
        .idle_timeout(cfg.idle_timeout())
        .max_lifetime(cfg.max_lifetime())
        .sqlx_logging(cfg.sqlx_logging);
    Database::connect(opt).await
}

/// Connect using `DATABASE_URL` (or the built-in default) and default pool settings.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    connect_with_config(&DatabaseConfig::from_env()).await
}
