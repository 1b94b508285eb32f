//! 表情包缓存监听器回调接口

use crate::danmaku::emoticon::models::LoadState;
use async_trait::async_trait;

/// 表情包缓存监听器
#[async_trait]
pub trait EmoticonCacheListener: Send + Sync {
    /// 某个房间的缓存条目发生状态迁移
    async fn on_state_changed(&self, room_id: u64, state: LoadState);
}

/// 默认空实现（无操作）
pub struct EmptyEmoticonCacheListener;

#[async_trait]
impl EmoticonCacheListener for EmptyEmoticonCacheListener {
    async fn on_state_changed(&self, _room_id: u64, _state: LoadState) {}
}
