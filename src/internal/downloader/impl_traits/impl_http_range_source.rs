//! 基于 reqwest 的 [`RangeSource`] 实现。

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, ACCEPT_RANGES, CONTENT_LENGTH, RANGE};
use reqwest::Client;
use url::Url;

use crate::internal::downloader::structs::{ByteRange, DownloadError, ProbeInfo, RangeBody};
use crate::internal::downloader::traits::range_source::RangeSource;

/// 通过 HTTP(S) GET 访问远程资源。
#[derive(Debug, Clone)]
pub struct HttpRangeSource {
    client: Client,
    url: Url,
}

impl HttpRangeSource {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// 读取并解析 `Content-Length`（十进制）。
pub(crate) fn parse_content_length(headers: &HeaderMap) -> Result<u64, DownloadError> {
    let raw = headers
        .get(CONTENT_LENGTH)
        .ok_or(DownloadError::MissingSizeHeader)?;
    let text = raw
        .to_str()
        .map_err(|e| DownloadError::InvalidSizeHeader(e.to_string()))?;
    text.trim()
        .parse::<u64>()
        .map_err(|e| DownloadError::InvalidSizeHeader(format!("{text}: {e}")))
}

#[async_trait]
impl RangeSource for HttpRangeSource {
    async fn probe(&self) -> Result<ProbeInfo, DownloadError> {
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(DownloadError::Probe)?;

        // 只看是否存在，不关心取值
        if !resp.headers().contains_key(ACCEPT_RANGES) {
            return Err(DownloadError::UnsupportedServer);
        }

        let total = parse_content_length(resp.headers())?;
        Ok(ProbeInfo { total })
    }

    async fn fetch(&self, range: ByteRange) -> Result<RangeBody, DownloadError> {
        let resp = self
            .client
            .get(self.url.clone())
            .header(RANGE, range.header_value())
            .send()
            .await?
            .error_for_status()?;

        let content_length = match parse_content_length(resp.headers()) {
            Ok(len) => Some(len),
            Err(DownloadError::MissingSizeHeader) => None,
            Err(e) => return Err(e),
        };

        let stream = resp
            .bytes_stream()
            .map(|chunk| chunk.map_err(std::io::Error::other))
            .boxed();

        Ok(RangeBody {
            content_length,
            stream,
        })
    }
}
