/// 内部导出的模块
mod internal;


/// 导出核心入口函数
pub use internal::entrance::download::*;

pub use internal::downloader::structs::{
    ByteRange, DownloadError, DownloadProgress, DownloadSession, DownloadSummary, PartFailure,
    ProbeInfo, RangeBody, RangePlan, SessionBuilder, SessionState, WorkerState,
};

/// 扩展点：自定义远程访问、目标文件与日志，供测试或非 HTTP 场景使用
pub mod traits {
    use crate::internal;
    pub use internal::downloader::traits::download_logger::DownloadLogger;
    pub use internal::downloader::traits::offset_write::OffsetWrite;
    pub use internal::downloader::traits::range_source::RangeSource;
}

/// 内置实现
pub mod sources {
    use crate::internal;
    pub use internal::downloader::impl_traits::impl_download_logger::{NoopLogger, TracingLogger};
    pub use internal::downloader::impl_traits::impl_http_range_source::HttpRangeSource;
}

/// 会话内部组件，单独导出以便复用
pub mod parts {
    use crate::internal;
    pub use internal::downloader::structs::{DoneGuard, OffsetWriter, Outstanding, WRITE_BUFFER_SIZE};
}

/// 可监听的会话状态容器
pub mod states {
    use crate::internal;
    pub use internal::states::reactive_property::{PropertyWatcher, ReactiveProperty, RecvError};
}
