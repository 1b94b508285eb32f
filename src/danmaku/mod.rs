pub mod emoticon;
pub mod error;
pub mod profile;

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::Once;

    static INIT_LOGGER: Once = Once::new();

    /// 测试日志：当前 crate 输出 debug，关闭底层 HTTP 客户端的 debug 噪音
    pub(crate) fn init_test_logger() {
        INIT_LOGGER.call_once(|| {
            use tracing_subscriber::prelude::*;
            use tracing_subscriber::EnvFilter;

            let filter_layer = EnvFilter::new(
                "info,danmaku_profile_core=debug,hyper_util::client=info,reqwest=info",
            );

            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_test_writer();

            // 其他测试可能已经设置过全局 subscriber
            let _ = tracing_subscriber::registry()
                .with(filter_layer)
                .with(fmt_layer)
                .try_init();
        });
    }
}

// 重新导出弹幕配置编辑相关类型
pub use profile::{
    apply_edit, compose_message, DanmakuConfig, DanmakuMode, DanmakuShootMode, ProfileEdit,
    ProfileEditor, ProfileListener,
};

// 重新导出表情包缓存相关类型
pub use emoticon::{
    Emoticon, EmoticonCache, EmoticonCacheEntry, EmoticonCacheListener, EmoticonFetcher,
    EmoticonGroup, EmoticonPicker, LoadState,
};
