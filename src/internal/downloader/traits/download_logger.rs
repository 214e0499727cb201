/// 下载日志接口：会话在分片开始/结束、分片登记、探测结果以及每个错误处调用。
///
/// 未设置时使用 [`NoopLogger`](crate::internal::downloader::impl_traits::impl_download_logger::NoopLogger)，
/// 下载行为完全一致，只是不输出任何内容。
pub trait DownloadLogger: Send + Sync {
    fn record(&self, message: &str);

    fn record_error(&self, message: &str);
}
