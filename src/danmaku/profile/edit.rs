//! 弹幕配置的纯变换函数
//!
//! 所有函数都只读取传入的配置并返回新值，不会修改原配置。
//! 数字字段解析失败时返回 [`ProfileError`]，由调用方按 no-op 处理。

use crate::danmaku::error::ProfileError;
use crate::danmaku::profile::models::{DanmakuConfig, DanmakuMode, DanmakuShootMode};

/// 单个字段的用户编辑
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEdit {
    /// 房间号输入框的原始文本
    RoomId(String),
    /// 弹幕内容
    Message(String),
    /// 发送间隔输入框的原始文本
    Interval(String),
    MsgMode(DanmakuMode),
    ShootMode(DanmakuShootMode),
}

/// 将一次编辑应用到配置上，得到新的配置
pub fn apply_edit(profile: &DanmakuConfig, edit: ProfileEdit) -> Result<DanmakuConfig, ProfileError> {
    match edit {
        ProfileEdit::RoomId(raw) => with_room_id(profile, &raw),
        ProfileEdit::Message(text) => Ok(with_message(profile, text)),
        ProfileEdit::Interval(raw) => with_interval(profile, &raw),
        ProfileEdit::MsgMode(mode) => Ok(with_msg_mode(profile, mode)),
        ProfileEdit::ShootMode(mode) => Ok(with_shoot_mode(profile, mode)),
    }
}

/// 替换房间号（必须是正整数）
pub fn with_room_id(profile: &DanmakuConfig, raw: &str) -> Result<DanmakuConfig, ProfileError> {
    let room_id = match raw.parse::<u64>() {
        Ok(id) if id > 0 => id,
        _ => return Err(ProfileError::InvalidRoomId(raw.to_string())),
    };
    Ok(DanmakuConfig {
        room_id,
        ..profile.clone()
    })
}

/// 替换弹幕内容（总是成功）
pub fn with_message(profile: &DanmakuConfig, text: impl Into<String>) -> DanmakuConfig {
    DanmakuConfig {
        msg: text.into(),
        ..profile.clone()
    }
}

/// 替换发送间隔（秒，必须是正整数）
pub fn with_interval(profile: &DanmakuConfig, raw: &str) -> Result<DanmakuConfig, ProfileError> {
    let interval = match raw.parse::<u32>() {
        Ok(v) if v > 0 => v,
        _ => return Err(ProfileError::InvalidInterval(raw.to_string())),
    };
    Ok(DanmakuConfig {
        interval,
        ..profile.clone()
    })
}

pub fn with_msg_mode(profile: &DanmakuConfig, mode: DanmakuMode) -> DanmakuConfig {
    DanmakuConfig {
        msg_mode: mode,
        ..profile.clone()
    }
}

pub fn with_shoot_mode(profile: &DanmakuConfig, mode: DanmakuShootMode) -> DanmakuConfig {
    DanmakuConfig {
        shoot_mode: mode,
        ..profile.clone()
    }
}

/// 把表情的 unique code 拼接到已有弹幕内容后面
///
/// 内容为空时结果就是 `unique_code`；否则用一个换行分隔，原内容保持原样。
pub fn compose_message(current_msg: &str, unique_code: &str) -> String {
    if current_msg.is_empty() {
        unique_code.to_string()
    } else {
        format!("{}\n{}", current_msg, unique_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> DanmakuConfig {
        DanmakuConfig {
            room_id: 100,
            msg: "hello".to_string(),
            msg_mode: DanmakuMode::Normal,
            shoot_mode: DanmakuShootMode::Single,
            interval: 10,
        }
    }

    #[test]
    fn room_id_parse_failure_is_rejected() {
        let p = profile();
        for raw in ["abc", "", "12a", " 12", "-3", "0"] {
            assert_eq!(
                with_room_id(&p, raw),
                Err(ProfileError::InvalidRoomId(raw.to_string()))
            );
        }
        assert_eq!(p, profile());
    }

    #[test]
    fn room_id_replaces_only_room() {
        let p = profile();
        let next = with_room_id(&p, "42").unwrap();
        assert_eq!(next.room_id, 42);
        assert_eq!(next.msg, p.msg);
        assert_eq!(next.interval, p.interval);
        assert_eq!(p.room_id, 100);
    }

    #[test]
    fn interval_rejects_non_positive() {
        let p = profile();
        assert!(with_interval(&p, "0").is_err());
        assert!(with_interval(&p, "-5").is_err());
        assert!(with_interval(&p, "ten").is_err());
        assert_eq!(with_interval(&p, "30").unwrap().interval, 30);
        assert_eq!(p.interval, 10);
    }

    #[test]
    fn apply_edit_dispatches_every_field() {
        let p = profile();
        let next = apply_edit(&p, ProfileEdit::Message(String::new())).unwrap();
        assert_eq!(next.msg, "");
        let next = apply_edit(&next, ProfileEdit::MsgMode(DanmakuMode::Emotion)).unwrap();
        assert_eq!(next.msg_mode, DanmakuMode::Emotion);
        let next = apply_edit(&next, ProfileEdit::ShootMode(DanmakuShootMode::Loop)).unwrap();
        assert_eq!(next.shoot_mode, DanmakuShootMode::Loop);
        let next = apply_edit(&next, ProfileEdit::Interval("7".into())).unwrap();
        assert_eq!(next.interval, 7);
        assert!(apply_edit(&next, ProfileEdit::RoomId("x".into())).is_err());
        assert_eq!(p, profile());
    }

    #[test]
    fn compose_appends_with_newline() {
        assert_eq!(compose_message("", "[doge]"), "[doge]");
        assert_eq!(compose_message("hello", "[doge]"), "hello\n[doge]");
        assert_eq!(compose_message(" a \n", "[doge]"), " a \n\n[doge]");
    }
}
