//! 弹幕发送配置模型定义

use serde::{Deserialize, Serialize};

/// 弹幕内容模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DanmakuMode {
    /// 普通文本弹幕
    Normal,
    /// 表情弹幕
    Emotion,
}

impl DanmakuMode {
    /// 下拉菜单中的全部选项（按声明顺序）
    pub const ALL: [DanmakuMode; 2] = [DanmakuMode::Normal, DanmakuMode::Emotion];

    /// 展示用文案
    pub fn desc(self) -> &'static str {
        match self {
            DanmakuMode::Normal => "普通",
            DanmakuMode::Emotion => "表情",
        }
    }

    /// 当前模式是否需要表情包选择器
    pub fn uses_emoticon_picker(self) -> bool {
        match self {
            DanmakuMode::Normal => false,
            DanmakuMode::Emotion => true,
        }
    }
}

/// 弹幕发送模式（由下游调度器解释，这里不做处理）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DanmakuShootMode {
    /// 只发送一次
    Single,
    /// 按间隔循环发送
    Loop,
}

impl DanmakuShootMode {
    pub const ALL: [DanmakuShootMode; 2] = [DanmakuShootMode::Single, DanmakuShootMode::Loop];

    pub fn desc(self) -> &'static str {
        match self {
            DanmakuShootMode::Single => "单次",
            DanmakuShootMode::Loop => "循环",
        }
    }
}

/// 弹幕发送配置（不可变值，每次编辑都产生新值）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DanmakuConfig {
    #[serde(rename = "roomid")]
    pub room_id: u64,
    #[serde(rename = "msg")]
    pub msg: String,
    #[serde(rename = "msgMode")]
    pub msg_mode: DanmakuMode,
    #[serde(rename = "shootMode")]
    pub shoot_mode: DanmakuShootMode,
    /// 发送间隔（秒）
    #[serde(rename = "interval")]
    pub interval: u32,
}

impl DanmakuConfig {
    /// 创建新的配置
    pub fn new(room_id: u64, msg: impl Into<String>) -> Self {
        Self {
            room_id,
            msg: msg.into(),
            ..Self::default()
        }
    }
}

impl Default for DanmakuConfig {
    fn default() -> Self {
        Self {
            room_id: 1,
            msg: String::new(),
            msg_mode: DanmakuMode::Normal,
            shoot_mode: DanmakuShootMode::Single,
            interval: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_app_field_names() {
        let cfg = DanmakuConfig {
            room_id: 42,
            msg: "hi".to_string(),
            msg_mode: DanmakuMode::Emotion,
            shoot_mode: DanmakuShootMode::Loop,
            interval: 30,
        };
        let v = serde_json::to_value(&cfg).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "roomid": 42,
                "msg": "hi",
                "msgMode": "EMOTION",
                "shootMode": "LOOP",
                "interval": 30,
            })
        );
        let back: DanmakuConfig = serde_json::from_value(v).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn mode_lists_are_in_declaration_order() {
        assert_eq!(DanmakuMode::ALL, [DanmakuMode::Normal, DanmakuMode::Emotion]);
        assert_eq!(DanmakuShootMode::ALL[1].desc(), "循环");
        assert!(DanmakuMode::Emotion.uses_emoticon_picker());
        assert!(!DanmakuMode::Normal.uses_emoticon_picker());
    }
}
