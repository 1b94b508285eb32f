//! 表情包模块
//!
//! 按房间缓存直播平台的表情包，并为选择器提供读模型

pub mod api;
pub mod listener;
pub mod models;
pub mod picker;
pub mod service;
pub mod types;

// 重新导出主要类型和函数
pub use api::{EmoticonApi, EmoticonApiConfig, EmoticonFetcher};
pub use listener::{EmoticonCacheListener, EmptyEmoticonCacheListener};
pub use models::{
    normalize_image_url, selectable_emoticons, Emoticon, EmoticonCacheEntry, EmoticonGroup,
    LoadState,
};
pub use picker::{EmoticonPicker, EmoticonView, GroupView};
pub use service::EmoticonCache;
pub use types::{GetEmoticonsResp, PlatformResponse};
