use sqlx::{Pool, Sqlite};

/// 按存储列序排列的一行 finding，JSON 序列化后即为数组
/// `(id, program, target, tool, severity, description)`
pub type FindingRow = (i64, String, String, String, String, String);

#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewFinding {
    pub program: String,
    pub target: String,
    pub tool: String,
    pub severity: String,
    pub description: String,
}

/// 追加一条记录并返回其 id；内容重复也照常插入
pub async fn insert(db: &Pool<Sqlite>, finding: &NewFinding) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO findings (program, target, tool, severity, description) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&finding.program)
    .bind(&finding.target)
    .bind(&finding.tool)
    .bind(&finding.severity)
    .bind(&finding.description)
    .execute(db)
    .await?;

    Ok(result.last_insert_rowid())
}

/// 全表扫描，按 id 升序（即插入顺序），不分页不过滤
pub async fn list_all(db: &Pool<Sqlite>) -> Result<Vec<FindingRow>, sqlx::Error> {
    sqlx::query_as::<_, FindingRow>(
        "SELECT id, program, target, tool, severity, description FROM findings ORDER BY id ASC",
    )
    .fetch_all(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_db() -> Pool<Sqlite> {
        // 内存库必须限制为单连接，否则每个连接各是一个空库
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::state::create_schema(&db).await.unwrap();
        db
    }

    fn sample(description: &str) -> NewFinding {
        NewFinding {
            program: "HackerOne".to_string(),
            target: "example.com".to_string(),
            tool: "nuclei".to_string(),
            severity: "medium".to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let db = test_db().await;

        let first = insert(&db, &sample("open redirect")).await.unwrap();
        let second = insert(&db, &sample("subdomain takeover")).await.unwrap();

        assert!(second > first);

        let rows = list_all(&db).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, first);
        assert_eq!(rows[1].0, second);
    }

    #[tokio::test]
    async fn duplicate_content_is_allowed() {
        let db = test_db().await;

        insert(&db, &sample("same line")).await.unwrap();
        insert(&db, &sample("same line")).await.unwrap();

        let rows = list_all(&db).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].5, "same line");
        assert_eq!(rows[1].5, "same line");
    }

    #[tokio::test]
    async fn create_schema_is_idempotent() {
        let db = test_db().await;

        insert(&db, &sample("kept across re-init")).await.unwrap();
        crate::state::create_schema(&db).await.unwrap();

        let rows = list_all(&db).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn list_returns_fields_unmodified() {
        let db = test_db().await;

        let finding = NewFinding {
            program: "CustomScan".to_string(),
            target: "sub.example.com".to_string(),
            tool: "httpx".to_string(),
            severity: "info".to_string(),
            description: "  raw line with spaces  ".to_string(),
        };
        insert(&db, &finding).await.unwrap();

        let rows = list_all(&db).await.unwrap();
        let (_, program, target, tool, severity, description) = rows[0].clone();
        assert_eq!(program, finding.program);
        assert_eq!(target, finding.target);
        assert_eq!(tool, finding.tool);
        assert_eq!(severity, finding.severity);
        assert_eq!(description, finding.description);
    }
}
