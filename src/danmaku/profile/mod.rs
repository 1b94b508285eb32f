//! 弹幕配置编辑模块

pub mod edit;
pub mod listener;
pub mod models;
pub mod service;

// 重新导出主要类型和函数
pub use edit::{apply_edit, compose_message, ProfileEdit};
pub use listener::{EmptyProfileListener, FnProfileListener, ProfileListener};
pub use models::{DanmakuConfig, DanmakuMode, DanmakuShootMode};
pub use service::{FieldDrafts, ProfileEditor};
