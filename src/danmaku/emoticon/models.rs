//! 表情包本地模型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// 反序列化数组字段，处理 null 值
pub(crate) fn deserialize_vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// 单个表情（字段名与直播平台接口一致）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoticon {
    /// 插入到弹幕内容中的 token
    #[serde(rename = "emoticon_unique")]
    pub unique_code: String,
    #[serde(rename = "url", default)]
    pub image_url: String,
    #[serde(rename = "emoji", default)]
    pub display_glyph: String,
    /// 1 表示当前用户可用
    #[serde(rename = "perm", default)]
    pub permission: i32,
}

impl Emoticon {
    pub fn is_selectable(&self) -> bool {
        self.permission == 1
    }
}

/// 表情包分组
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmoticonGroup {
    #[serde(rename = "pkg_name", default)]
    pub package_name: String,
    #[serde(rename = "current_cover", default)]
    pub cover_image_url: String,
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub emoticons: Vec<Emoticon>,
}

/// 只保留当前用户可用的表情（保持原有顺序）
pub fn selectable_emoticons(group: &EmoticonGroup) -> Vec<&Emoticon> {
    group.emoticons.iter().filter(|e| e.is_selectable()).collect()
}

/// 图片地址统一改为 https（只在读取时转换，不写回缓存）
pub fn normalize_image_url(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

/// 缓存条目的加载状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadState {
    Empty,
    Loading,
    Ready,
    Failed,
}

impl LoadState {
    /// 已经得到最终结果（成功或失败）
    pub fn is_settled(self) -> bool {
        match self {
            LoadState::Ready | LoadState::Failed => true,
            LoadState::Empty | LoadState::Loading => false,
        }
    }

    /// 是否需要（重新）发起拉取
    pub fn needs_fetch(self) -> bool {
        match self {
            LoadState::Empty | LoadState::Failed => true,
            LoadState::Loading | LoadState::Ready => false,
        }
    }
}

/// 某个房间的表情包缓存快照
///
/// 条目不可变，状态迁移时整体替换。
#[derive(Debug, Clone)]
pub struct EmoticonCacheEntry {
    pub room_id: u64,
    pub groups: Arc<[EmoticonGroup]>,
    pub state: LoadState,
    pub updated_at: DateTime<Utc>,
    /// 最近一次拉取失败的原因
    pub error: Option<String>,
}

impl EmoticonCacheEntry {
    pub fn empty(room_id: u64) -> Self {
        Self {
            room_id,
            groups: Arc::from(Vec::new()),
            state: LoadState::Empty,
            updated_at: Utc::now(),
            error: None,
        }
    }

    pub fn loading(room_id: u64) -> Self {
        Self {
            state: LoadState::Loading,
            ..Self::empty(room_id)
        }
    }

    pub fn ready(room_id: u64, groups: Vec<EmoticonGroup>) -> Self {
        Self {
            room_id,
            groups: Arc::from(groups),
            state: LoadState::Ready,
            updated_at: Utc::now(),
            error: None,
        }
    }

    pub fn failed(room_id: u64, error: String) -> Self {
        Self {
            state: LoadState::Failed,
            error: Some(error),
            ..Self::empty(room_id)
        }
    }

    /// 对外可读的分组：只有 READY 时返回数据，其余状态为空
    pub fn visible_groups(&self) -> &[EmoticonGroup] {
        match self.state {
            LoadState::Ready => &self.groups[..],
            LoadState::Empty | LoadState::Loading | LoadState::Failed => &[],
        }
    }
}
