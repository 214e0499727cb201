use std::fmt;

use super::download_error::DownloadError;

/// 单个分片的失败记录，由分片任务投递到错误通道。
#[derive(Debug)]
pub struct PartFailure {
    /// 分片序号
    pub index: usize,
    pub error: DownloadError,
}

impl fmt::Display for PartFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "分片 #{}: {}", self.index, self.error)
    }
}
