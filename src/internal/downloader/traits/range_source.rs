//! 远程资源访问接口：探测大小与 Range 支持、按区间拉取数据。
//!
//! 会话只依赖本 trait；HTTP 实现见 [`HttpRangeSource`](crate::internal::downloader::impl_traits::impl_http_range_source::HttpRangeSource)。

use async_trait::async_trait;

use crate::internal::downloader::structs::{ByteRange, DownloadError, ProbeInfo, RangeBody};

#[async_trait]
pub trait RangeSource: Send + Sync {
    /// 无条件请求一次资源，确认支持 Range 并取得总大小。
    ///
    /// 不支持 Range 返回 [`DownloadError::UnsupportedServer`]，
    /// 缺少大小返回 [`DownloadError::MissingSizeHeader`]。
    async fn probe(&self) -> Result<ProbeInfo, DownloadError>;

    /// 发起单段 Range 请求，返回声明长度与响应体流，由调用方负责校验长度。
    async fn fetch(&self, range: ByteRange) -> Result<RangeBody, DownloadError>;
}
