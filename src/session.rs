use actix_session::Session;

const LOGGED_IN_KEY: &str = "logged_in";

/// 口令比对，命中则在签名 Cookie 中标记已登录。
/// 不做锁定、限速或失败计数。
pub fn login(session: &Session, supplied: &str, expected: &str) -> bool {
    if supplied != expected {
        return false;
    }
    session.insert(LOGGED_IN_KEY, true).is_ok()
}

pub fn logout(session: &Session) {
    session.purge();
}

/// 受保护路由在处理前都要先过这里；缺失或无法解析一律视为未登录
pub fn is_authenticated(session: &Session) -> bool {
    session
        .get::<bool>(LOGGED_IN_KEY)
        .ok()
        .flatten()
        .unwrap_or(false)
}
