use std::sync::Arc;

use reqwest::Client;
use url::Url;

use crate::internal::downloader::impl_traits::impl_download_logger::NoopLogger;
use crate::internal::downloader::impl_traits::impl_http_range_source::HttpRangeSource;
use crate::internal::downloader::structs::DownloadError;
use crate::internal::downloader::traits::{
    download_logger::DownloadLogger, offset_write::OffsetWrite, range_source::RangeSource,
};

use super::DownloadSession;

/// 会话构建器；所有配置必须在 `build()` 之前完成，构建后不可更改。
pub struct SessionBuilder {
    address: String,
    destination: Option<Arc<dyn OffsetWrite>>,
    workers: usize,
    logger: Option<Arc<dyn DownloadLogger>>,
    client: Option<Client>,
    source: Option<Arc<dyn RangeSource>>,
}

impl SessionBuilder {
    pub(crate) fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            destination: None,
            workers: 0,
            logger: None,
            client: None,
            source: None,
        }
    }

    /// 设置目标文件；不调用则 `build()` 返回 [`DownloadError::InvalidDestination`]。
    pub fn destination(mut self, file: Arc<dyn OffsetWrite>) -> Self {
        self.destination = Some(file);
        self
    }

    /// 设置分片数（即并发任务数）。默认 0，需在 preload 前设置。
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// 设置日志；默认不输出。
    pub fn logger(mut self, logger: Arc<dyn DownloadLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// 使用自定义的 HTTP 客户端（代理、请求头等）。
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// 替换远程资源的访问方式；设置后 `client` 不再生效。
    pub fn source(mut self, source: Arc<dyn RangeSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn build(self) -> Result<DownloadSession, DownloadError> {
        let file = self.destination.ok_or(DownloadError::InvalidDestination)?;
        let address = Url::parse(&self.address)
            .map_err(|e| DownloadError::InvalidInput(format!("下载地址无效 {}: {e}", self.address)))?;

        let source = match self.source {
            Some(source) => source,
            None => Arc::new(HttpRangeSource::new(
                self.client.unwrap_or_default(),
                address.clone(),
            )),
        };
        let logger = self.logger.unwrap_or_else(|| Arc::new(NoopLogger));

        Ok(DownloadSession::from_parts(
            address,
            source,
            file,
            self.workers,
            logger,
        ))
    }
}
