//! 表情包 API DTO（响应结构体）

use crate::danmaku::emoticon::models::{deserialize_vec_or_null, EmoticonGroup};
use serde::Deserialize;

/// 直播平台统一响应包装（code、message、data）
///
/// data 字段可能为 null 或缺失，因此使用 Option<T>
#[derive(Debug, Deserialize)]
pub struct PlatformResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// GetEmoticons 接口的 data 部分
#[derive(Debug, Clone, Deserialize)]
pub struct GetEmoticonsResp {
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub data: Vec<EmoticonGroup>,
}
