//! 表情包缓存服务层
//!
//! 按房间号缓存表情包分组。每个房间一个 `watch` 通道，通道里保存不可变的
//! [`EmoticonCacheEntry`] 快照，状态迁移时整体替换：
//! EMPTY -> LOADING -> READY | FAILED，FAILED 之后可以再次请求。
//! 同一房间同一时刻最多只有一个拉取任务。

use crate::danmaku::emoticon::api::EmoticonFetcher;
use crate::danmaku::emoticon::listener::{EmoticonCacheListener, EmptyEmoticonCacheListener};
use crate::danmaku::emoticon::models::{EmoticonCacheEntry, EmoticonGroup, LoadState};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

type EntrySender = Arc<watch::Sender<Arc<EmoticonCacheEntry>>>;

/// 表情包缓存（可克隆，克隆体共享同一份缓存）
#[derive(Clone)]
pub struct EmoticonCache {
    fetcher: Arc<dyn EmoticonFetcher>,
    listener: Arc<dyn EmoticonCacheListener>,
    rooms: Arc<Mutex<HashMap<u64, EntrySender>>>,
}

impl EmoticonCache {
    /// 创建新的表情包缓存（使用默认空监听器）
    pub fn new(fetcher: Arc<dyn EmoticonFetcher>) -> Self {
        Self::with_listener(fetcher, Arc::new(EmptyEmoticonCacheListener))
    }

    /// 创建新的表情包缓存（带自定义监听器）
    pub fn with_listener(
        fetcher: Arc<dyn EmoticonFetcher>,
        listener: Arc<dyn EmoticonCacheListener>,
    ) -> Self {
        Self {
            fetcher,
            listener,
            rooms: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn lock_rooms(&self) -> MutexGuard<'_, HashMap<u64, EntrySender>> {
        // 锁内不会 panic，中毒时直接沿用内部数据
        self.rooms.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 确保房间的表情包已加载或正在加载
    ///
    /// 立即返回；真正发起了拉取时返回 `true`。LOADING / READY 状态下为 no-op，
    /// EMPTY / FAILED 状态下发起新的拉取。需要在 tokio 运行时内调用。
    pub fn ensure_loaded(&self, room_id: u64) -> bool {
        let tx = {
            let mut rooms = self.lock_rooms();
            let tx = rooms
                .entry(room_id)
                .or_insert_with(|| {
                    debug!("[EmoticonCache] 创建房间 {} 的缓存条目", room_id);
                    let (tx, _rx) = watch::channel(Arc::new(EmoticonCacheEntry::empty(room_id)));
                    Arc::new(tx)
                })
                .clone();

            let state = tx.borrow().state;
            if !state.needs_fetch() {
                debug!(
                    "[EmoticonCache] 房间 {} 当前状态 {:?}，无需重复拉取",
                    room_id, state
                );
                return false;
            }

            if tokio::runtime::Handle::try_current().is_err() {
                error!("[EmoticonCache] 当前不在 tokio 运行时内，无法拉取房间 {} 的表情包", room_id);
                tx.send_replace(Arc::new(EmoticonCacheEntry::failed(
                    room_id,
                    "no tokio runtime".to_string(),
                )));
                return false;
            }

            // 在锁内切到 LOADING，保证同一房间只有一个拉取任务
            tx.send_replace(Arc::new(EmoticonCacheEntry::loading(room_id)));
            tx
        };

        info!("[EmoticonCache] 🔄 开始拉取房间 {} 的表情包", room_id);
        let fetcher = self.fetcher.clone();
        let listener = self.listener.clone();
        tokio::spawn(async move {
            listener.on_state_changed(room_id, LoadState::Loading).await;

            let fetch = tokio::spawn(async move { fetcher.fetch_emoticon_groups(room_id).await });
            let entry = match fetch.await {
                Ok(Ok(groups)) => {
                    info!(
                        "[EmoticonCache] ✅ 房间 {} 表情包加载完成，分组数: {}",
                        room_id,
                        groups.len()
                    );
                    EmoticonCacheEntry::ready(room_id, groups)
                }
                Ok(Err(e)) => {
                    warn!("[EmoticonCache] ❌ 房间 {} 表情包加载失败: {}", room_id, e);
                    EmoticonCacheEntry::failed(room_id, e.to_string())
                }
                Err(e) => {
                    error!("[EmoticonCache] ❌ 房间 {} 拉取任务异常退出: {}", room_id, e);
                    EmoticonCacheEntry::failed(room_id, format!("fetch task aborted: {}", e))
                }
            };

            // 先回调再发布快照：快照发布前不会有重试，监听器看到的状态迁移保持有序
            listener.on_state_changed(room_id, entry.state).await;
            tx.send_replace(Arc::new(entry));
        });
        true
    }

    /// 当前快照（房间从未请求过时返回 EMPTY）
    pub fn snapshot(&self, room_id: u64) -> Arc<EmoticonCacheEntry> {
        match self.lock_rooms().get(&room_id) {
            Some(tx) => Arc::clone(&tx.borrow()),
            None => Arc::new(EmoticonCacheEntry::empty(room_id)),
        }
    }

    /// 读取房间的表情包分组和状态（非 READY 时分组为空）
    pub fn read_groups(&self, room_id: u64) -> (Arc<[EmoticonGroup]>, LoadState) {
        let entry = self.snapshot(room_id);
        match entry.state {
            LoadState::Ready => (entry.groups.clone(), entry.state),
            LoadState::Empty | LoadState::Loading | LoadState::Failed => {
                (Arc::from(Vec::new()), entry.state)
            }
        }
    }

    /// 房间当前状态
    pub fn state(&self, room_id: u64) -> LoadState {
        self.snapshot(room_id).state
    }

    /// 等待房间得到最终结果（READY 或 FAILED）
    ///
    /// 已有结果时立即返回；房间从未请求过时立即返回 EMPTY。
    /// 同一房间的所有等待者拿到的是同一个快照。
    pub async fn wait_settled(&self, room_id: u64) -> Arc<EmoticonCacheEntry> {
        let rx = self.lock_rooms().get(&room_id).map(|tx| tx.subscribe());
        let Some(mut rx) = rx else {
            return Arc::new(EmoticonCacheEntry::empty(room_id));
        };
        if rx.borrow().state == LoadState::Empty {
            return Arc::clone(&rx.borrow());
        }

        let settled = rx
            .wait_for(|entry| entry.state.is_settled())
            .await
            .map(|entry| Arc::clone(&entry));
        let entry = match settled {
            Ok(entry) => entry,
            Err(_) => Arc::clone(&rx.borrow()),
        };
        debug!(
            "[EmoticonCache] 房间 {} 快照: {:?}，更新时间: {}",
            room_id, entry.state, entry.updated_at
        );
        entry
    }

    /// 已缓存的房间号
    pub fn cached_rooms(&self) -> Vec<u64> {
        let mut rooms: Vec<u64> = self.lock_rooms().keys().copied().collect();
        rooms.sort_unstable();
        rooms
    }
}
