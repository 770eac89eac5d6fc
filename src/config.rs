use anyhow::{bail, Context};
use std::path::PathBuf;

/// 进程启动时装配一次，显式传给各组件，不使用全局可变状态
#[derive(Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub database_path: PathBuf,
    /// 登录口令（单一共享密钥）
    pub admin_password: String,
    /// 会话 Cookie 签名密钥
    pub session_secret: String,
    pub session_ttl_hours: i64,
    /// 外部侦察脚本路径，接收 domain 作为唯一参数
    pub scan_script: PathBuf,
    /// 扫描结果根目录：<results_root>/<domain>/nuclei_results.txt
    pub results_root: PathBuf,
    /// findings API 是否免登录开放（默认开放，与原系统行为一致）
    pub public_findings_api: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let admin_password =
            std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;
        let session_secret =
            std::env::var("SESSION_SECRET").context("SESSION_SECRET must be set")?;
        // Cookie 签名密钥的长度下限，过短直接拒绝启动
        if session_secret.len() < 64 {
            bail!("SESSION_SECRET must be at least 64 bytes");
        }

        let session_ttl_hours = match std::env::var("SESSION_TTL_HOURS") {
            Ok(v) => v.parse().context("SESSION_TTL_HOURS must be an integer")?,
            Err(_) => 12,
        };

        Ok(Self {
            bind_address: env_or("BIND_ADDRESS", "0.0.0.0:8000"),
            database_path: env_or("DATABASE_PATH", "recon.db").into(),
            admin_password,
            session_secret,
            session_ttl_hours,
            scan_script: env_or("SCAN_SCRIPT", "./scan.sh").into(),
            results_root: env_or("RESULTS_ROOT", "./results").into(),
            public_findings_api: env_flag("PUBLIC_FINDINGS_API", true),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => !matches!(v.as_str(), "false" | "0" | "no"),
        Err(_) => default,
    }
}
