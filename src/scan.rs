use sqlx::{Pool, Sqlite};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

use crate::config::AppConfig;
use crate::store::{self, NewFinding};

/// 导入行固定归到这个 program 名下
pub const IMPORT_PROGRAM: &str = "CustomScan";
/// 结果文件的产出工具名，也决定文件名 `<tool>_results.txt`
pub const IMPORT_TOOL: &str = "nuclei";
pub const IMPORT_SEVERITY: &str = "medium";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to spawn scan script: {0}")]
    Spawn(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read results file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to insert finding: {0}")]
    Storage(#[from] sqlx::Error),
}

/// 后台启动外部扫描脚本，domain 为唯一参数。
/// 不等待、不收集输出；仅在后台任务里记录退出状态。
pub fn launch(config: &AppConfig, domain: &str) -> Result<(), LaunchError> {
    let mut child = Command::new(&config.scan_script)
        .arg(domain)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    tracing::info!(
        "Launched scan script {} for {}",
        config.scan_script.display(),
        domain
    );

    // 不跟踪生命周期，只记录退出状态以便排查
    let domain = domain.to_string();
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => tracing::info!("Scan for {} exited with {}", domain, status),
            Err(e) => tracing::error!("Failed to wait on scan for {}: {}", domain, e),
        }
    });

    Ok(())
}

fn results_path(results_root: &Path, domain: &str) -> PathBuf {
    results_root
        .join(domain)
        .join(format!("{}_results.txt", IMPORT_TOOL))
}

/// 读取 `<results_root>/<domain>/nuclei_results.txt`，每个非空行插入一条 finding。
/// 文件不存在视为无事可做，返回 Ok(0)。
/// 供外部调度方调用，未挂到任何路由上。
pub async fn import_results(
    db: &Pool<Sqlite>,
    config: &AppConfig,
    domain: &str,
) -> Result<usize, ImportError> {
    let path = results_path(&config.results_root, domain);
    if !path.exists() {
        tracing::info!("No results file at {}, nothing to import", path.display());
        return Ok(0);
    }

    let content = tokio::fs::read_to_string(&path).await?;

    // 逐行独立插入，不开事务；重复导入产生重复记录是预期行为
    let mut imported = 0usize;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        store::insert(
            db,
            &NewFinding {
                program: IMPORT_PROGRAM.to_string(),
                target: domain.to_string(),
                tool: IMPORT_TOOL.to_string(),
                severity: IMPORT_SEVERITY.to_string(),
                description: line.to_string(),
            },
        )
        .await?;
        imported += 1;
    }

    tracing::info!(
        "Imported {} findings for {} from {}",
        imported,
        domain,
        path.display()
    );

    Ok(imported)
}
