use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        // 初始化数据库
        let db = init_db(&config.database_path).await?;

        Ok(Self {
            db,
            config: Arc::new(config),
        })
    }
}

async fn init_db(db_path: &Path) -> anyhow::Result<Pool<Sqlite>> {
    // 使用 SqliteConnectOptions 来确保数据库文件可以被创建
    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    create_schema(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create tables: {}", e))?;

    tracing::info!("Database initialized at {}", db_path.display());

    Ok(pool)
}

/// 建表，幂等，每次启动都执行
pub async fn create_schema(db: &Pool<Sqlite>) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS findings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            program TEXT,
            target TEXT,
            tool TEXT,
            severity TEXT,
            description TEXT
        )
        "#,
    )
    .execute(db)
    .await?;

    Ok(())
}
