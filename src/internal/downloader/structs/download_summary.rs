use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 一次完整下载的结果。
#[derive(Debug, Clone, Serialize)]
pub struct DownloadSummary {
    /// 自启动全部分片起的耗时
    pub elapsed: Duration,
    pub started_at: DateTime<Utc>,
    /// 资源总大小（字节）
    pub total_bytes: u64,
    /// 实际分片数
    pub parts: usize,
}

impl fmt::Display for DownloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}B，{} 个分片，耗时 {:.2?}",
            self.total_bytes, self.parts, self.elapsed
        )
    }
}
