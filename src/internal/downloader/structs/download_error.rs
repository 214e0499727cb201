//! 下载相关错误类型。

use thiserror::Error;

use super::part_failure::PartFailure;
use super::session_state::SessionState;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("参数无效: {0}")]
    InvalidInput(String),

    #[error("未指定保存目标文件")]
    InvalidDestination,

    #[error("会话状态错误: 需要 {expected:?}，当前为 {actual:?}")]
    InvalidState {
        expected: SessionState,
        actual: SessionState,
    },

    #[error("服务器不支持 Range 请求")]
    UnsupportedServer,

    #[error("响应缺少 Content-Length")]
    MissingSizeHeader,

    #[error("Content-Length 无法解析: {0}")]
    InvalidSizeHeader(String),

    #[error("探测远程资源失败: {0}")]
    Probe(#[source] reqwest::Error),

    #[error("分片序号 {index} 超出容量 {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },

    #[error("分片 #{part} 大小不符，期望 {wanted}B，实际 {got}B")]
    SizeMismatch { part: usize, wanted: u64, got: u64 },

    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("读取响应体失败: {0}")]
    Transport(std::io::Error),

    #[error("写入分片 #{part} 失败: {source}")]
    WriteFile {
        part: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("创建文件失败: {0}")]
    CreateFile(std::io::Error),

    #[error("预分配文件空间失败: {0}")]
    PreallocateFile(std::io::Error),

    #[error("分片任务失败: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("创建异步运行时失败: {0}")]
    Runtime(std::io::Error),

    #[error("{} 个分片下载失败", .0.len())]
    PartsFailed(Vec<PartFailure>),
}
