//! 分片并发下载会话
//!
//! 会话把一个远程资源切成若干连续的字节区间，每个区间一个任务并发拉取，
//! 所有任务直接写入同一个目标文件中各自独占的区间。
//!
//! ## 生命周期
//!
//! `Created → Preloaded → Running → Finished`，会话只能使用一次：
//!
//! - [`preload`](DownloadSession::preload)：探测资源大小与 Range 支持，生成分片
//! - [`start_all`](DownloadSession::start_all)：启动全部分片任务，返回失败通道
//! - [`wait`](DownloadSession::wait)：等待全部任务结束（成功或失败）
//! - [`elapsed`](DownloadSession::elapsed)：`start_all` 之后任意时刻可查询耗时
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use range_dl::DownloadSession;
//! # async fn example(file: std::fs::File) -> Result<(), range_dl::DownloadError> {
//! let mut session = DownloadSession::builder("https://example.com/large.iso")
//!     .destination(Arc::new(file))
//!     .workers(8)
//!     .build()?;
//!
//! session.preload().await?;
//! let mut failures = session.start_all()?;
//! session.wait().await?;
//!
//! failures.close();
//! while let Some(failure) = failures.recv().await {
//!     eprintln!("{failure}");
//! }
//! println!("耗时 {:?}", session.elapsed());
//! # Ok(())
//! # }
//! ```
//!
//! ## 失败处理
//!
//! 单个分片失败只影响它自己的区间，其余分片照常完成，`wait()` 也照常返回；
//! 失败记录投递到 `start_all` 返回的通道，需要调用方自行读取。
//! 本模块没有超时：卡住的分片会让 `wait()` 一直等待。

mod coordinator;
mod run_part;
mod session_builder;

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use url::Url;

use crate::internal::downloader::traits::{
    download_logger::DownloadLogger, offset_write::OffsetWrite, range_source::RangeSource,
};
use crate::internal::states::reactive_property::ReactiveProperty;

use super::byte_range::ByteRange;
use super::download_error::DownloadError;
use super::download_progress::DownloadProgress;
use super::outstanding::Outstanding;
use super::part_failure::PartFailure;
use super::range_plan::RangePlan;
use super::session_state::{SessionState, WorkerState};
use coordinator::{run_all, PartContext};

pub use session_builder::SessionBuilder;

/// 分片并发下载会话，不实现 Clone：同一个会话只能驱动一次下载。
pub struct DownloadSession {
    address: Url,
    source: Arc<dyn RangeSource>,
    file: Arc<dyn OffsetWrite>,
    workers: usize,
    logger: Arc<dyn DownloadLogger>,
    plan: Option<RangePlan>,
    state: ReactiveProperty<SessionState>,
    worker_states: ReactiveProperty<Vec<WorkerState>>,
    progress: ReactiveProperty<DownloadProgress>,
    started: Option<(Instant, DateTime<Utc>)>,
    outstanding: Option<Outstanding>,
}

impl DownloadSession {
    /// 以 `address` 为下载地址开始构建会话。
    pub fn builder(address: impl Into<String>) -> SessionBuilder {
        SessionBuilder::new(address)
    }

    /// 直接创建会话，等价于 builder 只设置目标文件与分片数。
    ///
    /// 分片数为 0 时仍可创建，在 [`preload`](Self::preload) 时才报错。
    pub fn new(
        address: &str,
        destination: Arc<dyn OffsetWrite>,
        workers: usize,
    ) -> Result<Self, DownloadError> {
        SessionBuilder::new(address)
            .destination(destination)
            .workers(workers)
            .build()
    }

    pub(crate) fn from_parts(
        address: Url,
        source: Arc<dyn RangeSource>,
        file: Arc<dyn OffsetWrite>,
        workers: usize,
        logger: Arc<dyn DownloadLogger>,
    ) -> Self {
        Self {
            address,
            source,
            file,
            workers,
            logger,
            plan: None,
            state: ReactiveProperty::new(SessionState::Created),
            worker_states: ReactiveProperty::new(Vec::new()),
            progress: ReactiveProperty::new(DownloadProgress::default()),
            started: None,
            outstanding: None,
        }
    }

    /// 探测远程资源并生成分片。失败时会话保持 `Created`。
    pub async fn preload(&mut self) -> Result<(), DownloadError> {
        self.expect_state(SessionState::Created)?;

        if self.workers == 0 {
            return Err(self.report(DownloadError::InvalidInput(
                "调用 preload 之前必须先设置分片数".into(),
            )));
        }

        let probe = self.source.probe().await.map_err(|e| self.report(e))?;
        self.logger
            .record(&format!("文件总大小为 {}B", probe.total));

        let plan = RangePlan::plan(probe.total, self.workers).map_err(|e| self.report(e))?;
        for index in 0..plan.len() {
            let len = plan.expected_len(index).map_err(|e| self.report(e))?;
            self.logger.record(&format!("分片 #{index} 已登记（{len}B）"));
        }

        self.worker_states
            .update(vec![WorkerState::Pending; plan.len()]);
        self.progress.update(DownloadProgress {
            bytes_done: 0,
            total: Some(plan.total()),
        });
        self.plan = Some(plan);
        self.state.update(SessionState::Preloaded);
        Ok(())
    }

    /// 在启动前覆盖某个分片的区间；序号越界返回 [`DownloadError::IndexOutOfRange`]。
    pub fn assign_part(&mut self, index: usize, range: ByteRange) -> Result<(), DownloadError> {
        self.expect_state(SessionState::Preloaded)?;
        let result = match self.plan.as_mut() {
            Some(plan) => plan.assign(index, range),
            None => Err(DownloadError::InvalidState {
                expected: SessionState::Preloaded,
                actual: SessionState::Created,
            }),
        };
        result.map_err(|e| self.report(e))?;
        self.logger.record(&format!(
            "分片 #{index} 已改为 {}",
            range.header_value()
        ));
        Ok(())
    }

    /// 启动全部分片任务，返回失败通道（容量等于分片数）。必须在 tokio 运行时内调用。
    pub fn start_all(&mut self) -> Result<mpsc::Receiver<PartFailure>, DownloadError> {
        self.expect_state(SessionState::Preloaded)?;
        let plan = match self.plan.clone() {
            Some(plan) => plan,
            None => {
                return Err(self.report(DownloadError::InvalidState {
                    expected: SessionState::Preloaded,
                    actual: SessionState::Created,
                }));
            }
        };

        self.state.update(SessionState::Running);
        self.started = Some((Instant::now(), Utc::now()));

        let ctx = Arc::new(PartContext {
            source: Arc::clone(&self.source),
            file: Arc::clone(&self.file),
            plan: Arc::new(plan),
            logger: Arc::clone(&self.logger),
            worker_states: self.worker_states.clone(),
            progress: self.progress.clone(),
        });
        let (outstanding, failures) = run_all(ctx);
        self.outstanding = Some(outstanding);
        Ok(failures)
    }

    /// 等待全部分片任务结束（无论成功失败），随后进入 `Finished`。
    pub async fn wait(&mut self) -> Result<(), DownloadError> {
        self.expect_state(SessionState::Running)?;
        self.logger.record("等待全部分片下载结束...");
        if let Some(outstanding) = &self.outstanding {
            outstanding.wait().await;
        }
        self.state.update(SessionState::Finished);
        self.logger.record(&format!(
            "全部分片已结束（{:?}）",
            self.elapsed().unwrap_or_default()
        ));
        Ok(())
    }

    /// 自 `start_all` 起经过的时间；尚未启动时为 `None`。
    pub fn elapsed(&self) -> Option<Duration> {
        self.started.map(|(instant, _)| instant.elapsed())
    }

    /// `start_all` 被调用时的时间点
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started.map(|(_, at)| at)
    }

    pub fn address(&self) -> &Url {
        &self.address
    }

    /// 设置的分片数（规划时可能因资源过小而减少，见 [`RangePlan::plan`]）
    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn plan(&self) -> Option<&RangePlan> {
        self.plan.as_ref()
    }

    /// 探测得到的资源总大小
    pub fn total_size(&self) -> Option<u64> {
        self.plan.as_ref().map(RangePlan::total)
    }

    pub fn current_state(&self) -> SessionState {
        self.state.get_current()
    }

    /// 会话状态；返回可共享句柄，`.watch()` 后 `changed().await` 监听。
    pub fn state(&self) -> ReactiveProperty<SessionState> {
        self.state.clone()
    }

    /// 各分片状态，按分片序号排列。
    pub fn worker_states(&self) -> ReactiveProperty<Vec<WorkerState>> {
        self.worker_states.clone()
    }

    /// 累计写入进度。
    pub fn progress(&self) -> ReactiveProperty<DownloadProgress> {
        self.progress.clone()
    }

    fn expect_state(&self, expected: SessionState) -> Result<(), DownloadError> {
        let actual = self.current_state();
        if actual != expected {
            return Err(self.report(DownloadError::InvalidState { expected, actual }));
        }
        Ok(())
    }

    /// 记录错误日志并原样返回。
    fn report(&self, error: DownloadError) -> DownloadError {
        self.logger.record_error(&error.to_string());
        error
    }
}
