/// 下载会话状态（由会话内部维护，外部只读监听）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    Preloaded,
    Running,
    Finished,
}

/// 单个分片任务的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerState {
    Pending,
    Running,
    Done,
    Failed(String),
}
