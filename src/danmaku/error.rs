//! 错误类型定义
//!
//! 两个子系统各自失败、互不影响：字段解析失败只在编辑器内部被忽略，
//! 表情包拉取失败只体现为缓存条目的 FAILED 状态。

use thiserror::Error;

/// 弹幕配置字段编辑错误（解析失败，调用方按 no-op 处理）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// 房间号不是合法的正整数
    #[error("invalid room id: {0:?}")]
    InvalidRoomId(String),

    /// 发送间隔不是合法的正整数
    #[error("invalid interval: {0:?}")]
    InvalidInterval(String),
}

/// 表情包拉取错误
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP 请求失败或返回非 2xx 状态
    #[error("http error: {0}")]
    Http(String),

    /// 平台返回业务错误码
    #[error("platform error {code}: {message}")]
    Platform { code: i64, message: String },

    /// 响应体无法解析
    #[error("decode error: {0}")]
    Decode(String),
}

/// 表情包拉取结果类型
pub type FetchResult<T> = Result<T, FetchError>;
