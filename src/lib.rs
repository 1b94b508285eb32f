pub mod danmaku;

// 重新导出常用类型，方便外部使用
pub use danmaku::{
    emoticon::{EmoticonApi, EmoticonApiConfig, EmoticonCache, EmoticonPicker, LoadState},
    error::{FetchError, ProfileError},
    profile::{DanmakuConfig, DanmakuMode, DanmakuShootMode, ProfileEdit, ProfileEditor},
};
