//! 分片调度：每个分片一个 tokio 任务，登记计数后再 spawn，失败投递到有界通道。

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::internal::downloader::structs::{
    DownloadProgress, Outstanding, PartFailure, RangePlan, WorkerState,
};
use crate::internal::downloader::traits::{
    download_logger::DownloadLogger, offset_write::OffsetWrite, range_source::RangeSource,
};
use crate::internal::states::reactive_property::ReactiveProperty;

use super::run_part::run_part;

/// 所有分片任务共享的只读上下文。
pub(crate) struct PartContext {
    pub(crate) source: Arc<dyn RangeSource>,
    pub(crate) file: Arc<dyn OffsetWrite>,
    pub(crate) plan: Arc<RangePlan>,
    pub(crate) logger: Arc<dyn DownloadLogger>,
    pub(crate) worker_states: ReactiveProperty<Vec<WorkerState>>,
    pub(crate) progress: ReactiveProperty<DownloadProgress>,
}

impl PartContext {
    pub(crate) fn set_state(&self, index: usize, state: WorkerState) {
        self.worker_states.update_field(|states| {
            if let Some(slot) = states.get_mut(index) {
                *slot = state;
            }
        });
    }
}

/// 启动全部分片任务，返回完成计数与失败通道。
///
/// 通道容量等于分片数，每个任务至多投递一次，投递永远不会阻塞；
/// 某个分片失败不会中止其他分片。必须在 tokio 运行时内调用。
pub(crate) fn run_all(ctx: Arc<PartContext>) -> (Outstanding, mpsc::Receiver<PartFailure>) {
    let parts = ctx.plan.len();
    let (tx, rx) = mpsc::channel(parts.max(1));
    let outstanding = Outstanding::new();

    for index in 0..parts {
        let done = outstanding.register();
        ctx.logger.record("启动一个新的分片任务...");

        let ctx = Arc::clone(&ctx);
        let tx = tx.clone();
        tokio::spawn(async move {
            let _done = done;
            match run_part(&ctx, index).await {
                Ok(_) => {
                    ctx.set_state(index, WorkerState::Done);
                }
                Err(error) => {
                    ctx.logger
                        .record_error(&format!("分片 #{index} 下载失败: {error}"));
                    ctx.set_state(index, WorkerState::Failed(error.to_string()));
                    // 接收端已关闭说明调用方不再关心失败，直接丢弃
                    let _ = tx.try_send(PartFailure { index, error });
                }
            }
        });
    }

    (outstanding, rx)
}
