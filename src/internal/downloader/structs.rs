pub mod byte_range;
pub mod download_error;
pub mod download_progress;
pub mod download_session;
pub mod download_summary;
pub mod offset_writer;
pub mod outstanding;
pub mod part_failure;
pub mod range_body;
pub mod range_plan;
pub mod session_state;

// 重导出公共类型
pub use byte_range::ByteRange;
pub use download_error::DownloadError;
pub use download_progress::DownloadProgress;
pub use download_session::{DownloadSession, SessionBuilder};
pub use download_summary::DownloadSummary;
pub use offset_writer::{OffsetWriter, WRITE_BUFFER_SIZE};
pub use outstanding::{DoneGuard, Outstanding};
pub use part_failure::PartFailure;
pub use range_body::{ProbeInfo, RangeBody};
pub use range_plan::RangePlan;
pub use session_state::{SessionState, WorkerState};
