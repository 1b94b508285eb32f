//! 弹幕配置变更回调接口

use crate::danmaku::profile::models::DanmakuConfig;

/// 弹幕配置变更监听器
///
/// 每次提交成功的编辑恰好回调一次；调用方负责在下一次渲染时传回新配置。
/// 编辑是同步完成的，所以这里不是异步接口。
pub trait ProfileListener: Send + Sync {
    fn on_profile_changed(&self, profile: DanmakuConfig);
}

/// 默认空实现（无操作）
pub struct EmptyProfileListener;

impl ProfileListener for EmptyProfileListener {
    fn on_profile_changed(&self, _profile: DanmakuConfig) {}
}

/// 用闭包作为监听器
pub struct FnProfileListener<F>(pub F);

impl<F> ProfileListener for FnProfileListener<F>
where
    F: Fn(DanmakuConfig) + Send + Sync,
{
    fn on_profile_changed(&self, profile: DanmakuConfig) {
        (self.0)(profile)
    }
}
