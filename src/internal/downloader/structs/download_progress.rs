/// 下载进度：记录所有分片累计写入的字节数；总大小在探测后写入。
///
/// 调用方通过会话的 `progress()` 读取或监听；进度比例可用 [`DownloadProgress::pct`] 获取。
#[derive(Debug, Clone, Default)]
pub struct DownloadProgress {
    /// 已写入本地文件的字节数
    pub bytes_done: u64,
    /// 资源总大小（字节），探测前为 `None`
    pub total: Option<u64>,
}

impl DownloadProgress {
    /// 进度百分比（0～100）；总大小为 0 或未知时返回 `f64::NAN`。
    pub fn pct(&self) -> f64 {
        self.total
            .filter(|&t| t > 0)
            .map(|t| (self.bytes_done as f64 / t as f64) * 100.0)
            .unwrap_or(f64::NAN)
    }

    /// 总大小已知且全部写完。
    pub fn is_complete(&self) -> bool {
        self.total.is_some_and(|t| self.bytes_done >= t)
    }
}
