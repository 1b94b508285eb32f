//! 弹幕配置编辑器
//!
//! 编辑器不持有配置本身：每次编辑读取调用方传入的当前配置，计算新配置，
//! 成功后通过监听器交还给调用方。唯一的内部状态是数字输入框的草稿文本，
//! 仅用于展示，不属于已提交的配置。

use crate::danmaku::profile::edit::{apply_edit, compose_message, ProfileEdit};
use crate::danmaku::profile::listener::{EmptyProfileListener, ProfileListener};
use crate::danmaku::profile::models::{DanmakuConfig, DanmakuMode, DanmakuShootMode};
use std::sync::Arc;
use tracing::debug;

/// 数字输入框的临时草稿
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDrafts {
    pub room_id: Option<String>,
    pub interval: Option<String>,
}

/// 弹幕配置编辑器
pub struct ProfileEditor {
    listener: Arc<dyn ProfileListener>,
    drafts: FieldDrafts,
}

impl ProfileEditor {
    /// 创建编辑器（使用默认空监听器）
    pub fn new() -> Self {
        Self::with_listener(Arc::new(EmptyProfileListener))
    }

    /// 创建编辑器（带自定义监听器）
    pub fn with_listener(listener: Arc<dyn ProfileListener>) -> Self {
        Self {
            listener,
            drafts: FieldDrafts::default(),
        }
    }

    /// 应用一次编辑
    ///
    /// 成功时回调监听器一次并返回新配置；解析失败时不回调，返回 `None`。
    pub fn apply(&mut self, profile: &DanmakuConfig, edit: ProfileEdit) -> Option<DanmakuConfig> {
        match &edit {
            ProfileEdit::RoomId(raw) => self.drafts.room_id = Some(raw.clone()),
            ProfileEdit::Interval(raw) => self.drafts.interval = Some(raw.clone()),
            ProfileEdit::Message(_) | ProfileEdit::MsgMode(_) | ProfileEdit::ShootMode(_) => {}
        }

        match apply_edit(profile, edit) {
            Ok(next) => {
                debug!("[ProfileEditor] 提交配置变更: {:?}", next);
                self.listener.on_profile_changed(next.clone());
                Some(next)
            }
            Err(e) => {
                debug!("[ProfileEditor] 忽略无效输入: {}", e);
                None
            }
        }
    }

    pub fn set_room_id(&mut self, profile: &DanmakuConfig, raw: &str) -> Option<DanmakuConfig> {
        self.apply(profile, ProfileEdit::RoomId(raw.to_string()))
    }

    pub fn set_message(&mut self, profile: &DanmakuConfig, text: &str) -> Option<DanmakuConfig> {
        self.apply(profile, ProfileEdit::Message(text.to_string()))
    }

    pub fn set_interval(&mut self, profile: &DanmakuConfig, raw: &str) -> Option<DanmakuConfig> {
        self.apply(profile, ProfileEdit::Interval(raw.to_string()))
    }

    pub fn set_msg_mode(&mut self, profile: &DanmakuConfig, mode: DanmakuMode) -> Option<DanmakuConfig> {
        self.apply(profile, ProfileEdit::MsgMode(mode))
    }

    pub fn set_shoot_mode(
        &mut self,
        profile: &DanmakuConfig,
        mode: DanmakuShootMode,
    ) -> Option<DanmakuConfig> {
        self.apply(profile, ProfileEdit::ShootMode(mode))
    }

    /// 把表情 unique code 追加到弹幕内容并提交
    pub fn append_emoticon(&mut self, profile: &DanmakuConfig, unique_code: &str) -> Option<DanmakuConfig> {
        let msg = compose_message(&profile.msg, unique_code);
        self.apply(profile, ProfileEdit::Message(msg))
    }

    /// 房间号输入框应显示的文本
    pub fn draft_room_id(&self, profile: &DanmakuConfig) -> String {
        self.drafts
            .room_id
            .clone()
            .unwrap_or_else(|| profile.room_id.to_string())
    }

    /// 发送间隔输入框应显示的文本
    pub fn draft_interval(&self, profile: &DanmakuConfig) -> String {
        self.drafts
            .interval
            .clone()
            .unwrap_or_else(|| profile.interval.to_string())
    }

    pub fn drafts(&self) -> &FieldDrafts {
        &self.drafts
    }

    /// 清空草稿（调用方换入另一份配置时使用）
    pub fn reset_drafts(&mut self) {
        self.drafts = FieldDrafts::default();
    }
}

impl Default for ProfileEditor {
    fn default() -> Self {
        Self::new()
    }
}
