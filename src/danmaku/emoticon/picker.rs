//! 表情包选择器的读模型
//!
//! 选择器打开时触发所属房间的加载，只在缓存 READY 后展示分组。
//! 图片地址在这里统一转换为 https，选中表情后通过 [`ProfileEditor`] 提交。

use crate::danmaku::emoticon::models::{normalize_image_url, EmoticonGroup, LoadState};
use crate::danmaku::emoticon::service::EmoticonCache;
use crate::danmaku::profile::models::DanmakuConfig;
use crate::danmaku::profile::service::ProfileEditor;
use serde::Serialize;
use tracing::debug;

/// 分组按钮的展示数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    /// 在缓存分组列表中的下标，用于 [`EmoticonPicker::select_group`]
    pub index: usize,
    pub package_name: String,
    pub cover_image_url: String,
}

/// 表情按钮的展示数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmoticonView {
    pub unique_code: String,
    pub image_url: String,
    pub display_glyph: String,
}

/// 表情包选择器
pub struct EmoticonPicker {
    cache: EmoticonCache,
    room_id: u64,
    selected_group: Option<usize>,
}

impl EmoticonPicker {
    /// 为当前配置打开选择器，并确保房间表情包开始加载
    pub fn open(cache: EmoticonCache, profile: &DanmakuConfig) -> Self {
        cache.ensure_loaded(profile.room_id);
        Self {
            cache,
            room_id: profile.room_id,
            selected_group: None,
        }
    }

    pub fn room_id(&self) -> u64 {
        self.room_id
    }

    pub fn state(&self) -> LoadState {
        self.cache.state(self.room_id)
    }

    pub fn is_ready(&self) -> bool {
        self.state() == LoadState::Ready
    }

    /// 加载失败，应展示空列表和重试入口
    pub fn is_failed(&self) -> bool {
        self.state() == LoadState::Failed
    }

    /// 重新请求（只有 FAILED / EMPTY 时会真正发起拉取）
    pub fn retry(&self) -> bool {
        self.cache.ensure_loaded(self.room_id)
    }

    /// 等待加载结果
    pub async fn wait_settled(&self) -> LoadState {
        self.cache.wait_settled(self.room_id).await.state
    }

    /// 可展示的分组（只包含非空分组）
    pub fn groups(&self) -> Vec<GroupView> {
        let (groups, _state) = self.cache.read_groups(self.room_id);
        groups
            .iter()
            .enumerate()
            .filter(|(_, g)| !g.emoticons.is_empty())
            .map(|(index, g)| GroupView {
                index,
                package_name: g.package_name.clone(),
                cover_image_url: normalize_image_url(&g.cover_image_url),
            })
            .collect()
    }

    /// 选中一个分组，下标无效或分组为空时返回 `false`
    pub fn select_group(&mut self, index: usize) -> bool {
        let (groups, _state) = self.cache.read_groups(self.room_id);
        match groups.get(index) {
            Some(group) if !group.emoticons.is_empty() => {
                debug!("[EmoticonPicker] 选中分组: {}", group.package_name);
                self.selected_group = Some(index);
                true
            }
            _ => false,
        }
    }

    pub fn selected_group(&self) -> Option<usize> {
        self.selected_group
    }

    fn with_selected_group<T>(&self, f: impl FnOnce(&EmoticonGroup) -> T) -> Option<T> {
        let index = self.selected_group?;
        let (groups, _state) = self.cache.read_groups(self.room_id);
        groups.get(index).map(f)
    }

    /// 当前分组中可选的表情（保持原有顺序）
    pub fn emoticons(&self) -> Vec<EmoticonView> {
        self.with_selected_group(|group| {
            group
                .emoticons
                .iter()
                .filter(|e| e.is_selectable())
                .map(|e| EmoticonView {
                    unique_code: e.unique_code.clone(),
                    image_url: normalize_image_url(&e.image_url),
                    display_glyph: e.display_glyph.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
    }

    /// 在当前分组中选择表情，拼接到弹幕内容并提交
    ///
    /// 表情不存在或当前用户不可用时不做任何事。
    pub fn choose(
        &self,
        editor: &mut ProfileEditor,
        profile: &DanmakuConfig,
        unique_code: &str,
    ) -> Option<DanmakuConfig> {
        let selectable = self
            .with_selected_group(|group| {
                group
                    .emoticons
                    .iter()
                    .any(|e| e.is_selectable() && e.unique_code == unique_code)
            })
            .unwrap_or(false);
        if !selectable {
            debug!("[EmoticonPicker] 表情 {} 不可选", unique_code);
            return None;
        }
        editor.append_emoticon(profile, unique_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::danmaku::test_util::init_test_logger;
    use crate::danmaku::emoticon::api::EmoticonFetcher;
    use crate::danmaku::emoticon::models::Emoticon;
    use crate::danmaku::error::{FetchError, FetchResult};
    use crate::danmaku::profile::listener::FnProfileListener;
    use crate::danmaku::profile::models::DanmakuMode;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    struct StaticFetcher {
        fail: AtomicBool,
    }

    fn emoticon(code: &str, perm: i32) -> Emoticon {
        Emoticon {
            unique_code: code.to_string(),
            image_url: format!("http://i0.hdslb.com/{}.png", code),
            display_glyph: code.to_string(),
            permission: perm,
        }
    }

    #[async_trait]
    impl EmoticonFetcher for StaticFetcher {
        async fn fetch_emoticon_groups(&self, _room_id: u64) -> FetchResult<Vec<EmoticonGroup>> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(FetchError::Http("timeout".to_string()));
            }
            Ok(vec![
                EmoticonGroup {
                    package_name: "空分组".into(),
                    cover_image_url: "http://x/empty.png".into(),
                    emoticons: vec![],
                },
                EmoticonGroup {
                    package_name: "通用表情".into(),
                    cover_image_url: "http://x/cover.png".into(),
                    emoticons: vec![emoticon("[a]", 1), emoticon("[b]", 0), emoticon("[c]", 1)],
                },
            ])
        }
    }

    fn cache(fail: bool) -> EmoticonCache {
        EmoticonCache::new(Arc::new(StaticFetcher {
            fail: AtomicBool::new(fail),
        }))
    }

    fn profile() -> DanmakuConfig {
        DanmakuConfig {
            msg_mode: DanmakuMode::Emotion,
            ..DanmakuConfig::new(42, "")
        }
    }

    #[tokio::test]
    async fn groups_hidden_until_ready_then_filtered() {
        init_test_logger();
        let mut picker = EmoticonPicker::open(cache(false), &profile());
        assert!(picker.groups().is_empty());
        assert!(!picker.select_group(1));

        assert_eq!(picker.wait_settled().await, LoadState::Ready);
        let groups = picker.groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].index, 1);
        assert_eq!(groups[0].cover_image_url, "https://x/cover.png");

        assert!(!picker.select_group(0));
        assert!(picker.select_group(1));
        let codes: Vec<String> = picker.emoticons().into_iter().map(|e| e.unique_code).collect();
        assert_eq!(codes, vec!["[a]", "[c]"]);
        assert_eq!(picker.emoticons()[0].image_url, "https://i0.hdslb.com/[a].png");
    }

    #[tokio::test]
    async fn choosing_commits_composed_message_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut editor = ProfileEditor::with_listener(Arc::new(FnProfileListener(
            move |p: DanmakuConfig| sink.lock().unwrap().push(p),
        )));

        let mut picker = EmoticonPicker::open(cache(false), &profile());
        picker.wait_settled().await;
        picker.select_group(1);

        let p = profile();
        assert_eq!(picker.choose(&mut editor, &p, "[b]"), None);
        assert_eq!(picker.choose(&mut editor, &p, "[zzz]"), None);
        let p = picker.choose(&mut editor, &p, "[a]").unwrap();
        assert_eq!(p.msg, "[a]");
        let p = picker.choose(&mut editor, &p, "[c]").unwrap();
        assert_eq!(p.msg, "[a]\n[c]");
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failed_load_leaves_editor_usable() {
        init_test_logger();
        let mut editor = ProfileEditor::new();
        let picker = EmoticonPicker::open(cache(true), &profile());
        assert_eq!(picker.wait_settled().await, LoadState::Failed);
        assert!(picker.is_failed());
        assert!(picker.groups().is_empty());
        assert!(picker.emoticons().is_empty());

        let p = editor.set_interval(&profile(), "30").unwrap();
        assert_eq!(p.interval, 30);
        assert!(picker.retry());
    }
}
