//! 弹幕发送配置 CLI
//!
//! 从命令行参数构造一份弹幕配置：每个参数都作为一次字段编辑交给编辑器，
//! 表情模式下可以按 unique code 追加表情。最终配置以 JSON 输出到 stdout。

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use danmaku_profile_core::danmaku::emoticon::{
    EmoticonApi, EmoticonApiConfig, EmoticonCache, EmoticonCacheListener, EmoticonPicker,
    LoadState,
};
use danmaku_profile_core::danmaku::profile::{
    DanmakuConfig, DanmakuMode, DanmakuShootMode, FnProfileListener, ProfileEdit, ProfileEditor,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MsgModeArg {
    Normal,
    Emotion,
}

impl From<MsgModeArg> for DanmakuMode {
    fn from(value: MsgModeArg) -> Self {
        match value {
            MsgModeArg::Normal => DanmakuMode::Normal,
            MsgModeArg::Emotion => DanmakuMode::Emotion,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShootModeArg {
    Single,
    Loop,
}

impl From<ShootModeArg> for DanmakuShootMode {
    fn from(value: ShootModeArg) -> Self {
        match value {
            ShootModeArg::Single => DanmakuShootMode::Single,
            ShootModeArg::Loop => DanmakuShootMode::Loop,
        }
    }
}

/// 弹幕发送配置 CLI
#[derive(Parser, Debug)]
#[command(name = "danmaku-profile-cli")]
#[command(about = "编辑弹幕发送配置，并可从直播间表情包中追加表情", long_about = None)]
struct Args {
    /// 已有配置（JSON 文件），不指定时使用默认配置
    #[arg(long)]
    profile: Option<std::path::PathBuf>,

    /// 房间号（原样交给编辑器，无效时忽略）
    #[arg(short, long)]
    room_id: Option<String>,

    /// 弹幕内容
    #[arg(short, long)]
    msg: Option<String>,

    /// 发送间隔（秒）
    #[arg(short, long)]
    interval: Option<String>,

    /// 弹幕模式
    #[arg(long, value_enum)]
    msg_mode: Option<MsgModeArg>,

    /// 发送模式
    #[arg(long, value_enum)]
    shoot_mode: Option<ShootModeArg>,

    /// 追加的表情 unique code，可重复（仅表情模式）
    #[arg(short, long)]
    emoticon: Vec<String>,

    /// 直播 API 基础地址
    #[arg(long, default_value = "https://api.live.bilibili.com")]
    api_base_url: String,

    /// 登录 Cookie
    #[arg(long, env = "DANMAKU_COOKIE")]
    cookie: Option<String>,

    /// 表情包加载超时（秒）
    #[arg(long, default_value = "10")]
    timeout: u64,

    /// 日志级别（默认: info,danmaku_profile_core=debug）
    #[arg(long, default_value = "info,danmaku_profile_core=debug")]
    log_level: String,

    /// 日志文件
    #[arg(long, default_value = "debug.log")]
    log_file: std::path::PathBuf,
}

/// 初始化日志（同时输出到 stderr 和文件，stdout 只留给 JSON 结果）
fn init_logger(log_level: &str, log_file: &std::path::Path) -> Result<()> {
    use std::fs::OpenOptions;
    use std::io;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // 优先使用环境变量 RUST_LOG（如果设置了），否则使用命令行参数
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // 创建日志文件（追加模式）
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("无法创建日志文件 {}", log_file.display()))?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(true);

    // 文件不需要 ANSI 颜色代码
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    info!("[CLI] 📝 日志已同时输出到控制台和文件: {}", log_file.display());
    Ok(())
}

struct CliEmoticonListener;

#[async_trait::async_trait]
impl EmoticonCacheListener for CliEmoticonListener {
    async fn on_state_changed(&self, room_id: u64, state: LoadState) {
        info!("[CLI/Emoticon] 房间 {} 表情包状态: {:?}", room_id, state);
    }
}

fn load_profile(args: &Args) -> Result<DanmakuConfig> {
    match &args.profile {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
            serde_json::from_str(&raw).context("解析配置文件失败")
        }
        None => Ok(DanmakuConfig::default()),
    }
}

/// 按 unique code 在所有分组中查找并追加表情
async fn append_emoticons(
    args: &Args,
    editor: &mut ProfileEditor,
    mut profile: DanmakuConfig,
) -> Result<DanmakuConfig> {
    let mut config = EmoticonApiConfig::new().with_base_url(args.api_base_url.clone());
    if let Some(cookie) = &args.cookie {
        config = config.with_cookie(cookie.clone());
    }
    config.timeout = Duration::from_secs(args.timeout);

    let api = EmoticonApi::new(config)?;
    let cache = EmoticonCache::with_listener(Arc::new(api), Arc::new(CliEmoticonListener));
    let mut picker = EmoticonPicker::open(cache, &profile);

    match picker.wait_settled().await {
        LoadState::Ready => {}
        LoadState::Failed => {
            error!("[CLI] ❌ 表情包加载失败，保留当前弹幕内容");
            return Ok(profile);
        }
        LoadState::Empty | LoadState::Loading => {
            warn!("[CLI] 表情包未加载");
            return Ok(profile);
        }
    }

    let groups = picker.groups();
    if args.emoticon.is_empty() {
        for group in &groups {
            picker.select_group(group.index);
            info!("[CLI] 📦 {} ({})", group.package_name, group.cover_image_url);
            for e in picker.emoticons() {
                info!("[CLI]     {} {} {}", e.unique_code, e.display_glyph, e.image_url);
            }
        }
        return Ok(profile);
    }

    for code in &args.emoticon {
        let mut chosen = None;
        for group in &groups {
            picker.select_group(group.index);
            if let Some(next) = picker.choose(editor, &profile, code) {
                chosen = Some(next);
                break;
            }
        }
        match chosen {
            Some(next) => profile = next,
            None => warn!("[CLI] 表情 {} 不存在或不可用，已跳过", code),
        }
    }
    Ok(profile)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level, &args.log_file)?;

    let mut editor = ProfileEditor::with_listener(Arc::new(FnProfileListener(
        |p: DanmakuConfig| info!("[CLI/Profile] 配置已更新: {:?}", p),
    )));
    let mut profile = load_profile(&args)?;

    let mut edits = Vec::new();
    if let Some(raw) = &args.room_id {
        edits.push(ProfileEdit::RoomId(raw.clone()));
    }
    if let Some(msg) = &args.msg {
        edits.push(ProfileEdit::Message(msg.clone()));
    }
    if let Some(raw) = &args.interval {
        edits.push(ProfileEdit::Interval(raw.clone()));
    }
    if let Some(mode) = args.msg_mode {
        edits.push(ProfileEdit::MsgMode(mode.into()));
    }
    if let Some(mode) = args.shoot_mode {
        edits.push(ProfileEdit::ShootMode(mode.into()));
    }

    for edit in edits {
        match editor.apply(&profile, edit.clone()) {
            Some(next) => profile = next,
            None => warn!("[CLI] 忽略无效输入: {:?}", edit),
        }
    }

    if profile.msg_mode.uses_emoticon_picker() {
        profile = append_emoticons(&args, &mut editor, profile).await?;
    } else if !args.emoticon.is_empty() {
        warn!("[CLI] 普通模式下不追加表情，请使用 --msg-mode emotion");
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&profile).context("序列化配置失败")?
    );
    Ok(())
}
