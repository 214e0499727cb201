//! 内置的日志实现。

use crate::internal::downloader::traits::download_logger::DownloadLogger;

/// 不输出任何内容，会话的默认日志。
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl DownloadLogger for NoopLogger {
    fn record(&self, _message: &str) {}

    fn record_error(&self, _message: &str) {}
}

/// 转发到 `tracing`，订阅器由调用方初始化。
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DownloadLogger for TracingLogger {
    fn record(&self, message: &str) {
        tracing::info!(target: "range_dl", "{message}");
    }

    fn record_error(&self, message: &str) {
        tracing::error!(target: "range_dl", "{message}");
    }
}
