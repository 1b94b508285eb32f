//! 表情包 HTTP API 客户端
//!
//! 表情包缓存只通过 [`EmoticonFetcher`] 访问网络，[`EmoticonApi`] 是基于 reqwest 的默认实现。

use crate::danmaku::emoticon::models::EmoticonGroup;
use crate::danmaku::emoticon::types::{GetEmoticonsResp, PlatformResponse};
use crate::danmaku::error::{FetchError, FetchResult};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, info};

/// 表情包拉取接口（缓存唯一的外部调用）
#[async_trait]
pub trait EmoticonFetcher: Send + Sync {
    /// 拉取指定房间可用的表情包分组
    async fn fetch_emoticon_groups(&self, room_id: u64) -> FetchResult<Vec<EmoticonGroup>>;
}

/// 表情包 API 配置
#[derive(Clone, Debug)]
pub struct EmoticonApiConfig {
    /// 直播 API 基础地址
    pub api_base_url: String,
    /// 平台参数，例如 "pc"
    pub platform: String,
    /// 登录 Cookie（可选，决定 perm 字段的结果）
    pub cookie: Option<String>,
    /// 单次请求超时
    pub timeout: Duration,
}

impl EmoticonApiConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self {
            api_base_url: "https://api.live.bilibili.com".to_string(),
            platform: "pc".to_string(),
            cookie: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }
}

impl Default for EmoticonApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// 表情包相关的 HTTP API 客户端
pub struct EmoticonApi {
    client: reqwest::Client,
    config: EmoticonApiConfig,
}

impl EmoticonApi {
    /// 创建新的表情包 API 客户端（Cookie 通过 default_headers 自动添加）
    pub fn new(config: EmoticonApiConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(cookie) = &config.cookie {
            headers.insert(
                reqwest::header::COOKIE,
                reqwest::header::HeaderValue::from_str(cookie).context("无效的 cookie")?,
            );
        }
        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .context("创建 HTTP 客户端失败")?;
        Ok(Self { client, config })
    }

    /// 使用外部配置好的 HTTP 客户端
    pub fn with_client(client: reqwest::Client, config: EmoticonApiConfig) -> Self {
        Self { client, config }
    }

    /// 从服务器获取房间表情包
    pub async fn get_emoticons(&self, room_id: u64) -> FetchResult<Vec<EmoticonGroup>> {
        let url = format!(
            "{}/xlive/web-ucenter/v2/emoticon/GetEmoticons",
            self.config.api_base_url.trim_end_matches('/')
        );

        info!("[EmoticonAPI] 📡 请求房间 {} 的表情包", room_id);
        debug!("[EmoticonAPI]   请求URL: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("platform", self.config.platform.clone()),
                ("room_id", room_id.to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let status = response.status();
        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;
        let body_str = String::from_utf8_lossy(&body_bytes);
        debug!("[EmoticonAPI] 表情包响应 Body: {}", body_str);

        if !status.is_success() {
            error!(
                "[EmoticonAPI] 表情包请求失败，HTTP状态: {}, 响应: {}",
                status, body_str
            );
            return Err(FetchError::Http(format!("HTTP {}: {}", status, body_str)));
        }

        let api_resp: PlatformResponse<GetEmoticonsResp> = serde_json::from_slice(&body_bytes)
            .map_err(|e| {
                error!(
                    "[EmoticonAPI] 表情包反序列化失败: {:?}\n原始响应: {}",
                    e, body_str
                );
                FetchError::Decode(e.to_string())
            })?;

        if api_resp.code != 0 {
            error!(
                "[EmoticonAPI] 表情包服务器错误，错误码: {}, 错误信息: {}",
                api_resp.code, api_resp.message
            );
            return Err(FetchError::Platform {
                code: api_resp.code,
                message: api_resp.message,
            });
        }

        let groups = api_resp.data.map(|d| d.data).unwrap_or_default();
        info!(
            "[EmoticonAPI] 房间 {} 表情包分组数: {}",
            room_id,
            groups.len()
        );
        Ok(groups)
    }
}

#[async_trait]
impl EmoticonFetcher for EmoticonApi {
    async fn fetch_emoticon_groups(&self, room_id: u64) -> FetchResult<Vec<EmoticonGroup>> {
        self.get_emoticons(room_id).await
    }
}
