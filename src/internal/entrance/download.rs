use std::path::Path;
use std::sync::Arc;

use crate::internal::downloader::impl_traits::impl_download_logger::NoopLogger;
use crate::internal::downloader::structs::{DownloadError, DownloadSession, DownloadSummary};
use crate::internal::downloader::traits::download_logger::DownloadLogger;
use crate::internal::downloader::traits::offset_write::OffsetWrite;

/// 用 `workers` 个并发分片把 `address` 下载到 `save_path`
///
/// 目标文件会被创建或截断，并按资源大小预分配。所有分片结束后统一检查失败记录：
/// 只要有一个分片失败就返回 [`DownloadError::PartsFailed`]（按分片序号排序），
/// 此时文件保留，失败分片对应的区间内容不确定。
///
/// example:
/// ```no_run
/// # async fn example() -> Result<(), range_dl::DownloadError> {
/// let summary = range_dl::download("https://example.com/large.iso", "large.iso", 8).await?;
/// println!("{summary}");
/// # Ok(())
/// # }
/// ```
pub async fn download(
    address: &str,
    save_path: impl AsRef<Path>,
    workers: usize,
) -> Result<DownloadSummary, DownloadError> {
    download_with_logger(address, save_path, workers, Arc::new(NoopLogger)).await
}

/// 同 [`download`]，附带日志输出。
pub async fn download_with_logger(
    address: &str,
    save_path: impl AsRef<Path>,
    workers: usize,
    logger: Arc<dyn DownloadLogger>,
) -> Result<DownloadSummary, DownloadError> {
    let path = save_path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(DownloadError::InvalidDestination);
    }

    let file = tokio::fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)
        .await
        .map_err(DownloadError::CreateFile)?
        .into_std()
        .await;
    let file = Arc::new(file);

    let mut session = DownloadSession::builder(address)
        .destination(file.clone())
        .workers(workers)
        .logger(Arc::clone(&logger))
        .build()?;

    session.preload().await?;

    let total = session.total_size().unwrap_or_default();
    let parts = session.plan().map(|p| p.len()).unwrap_or_default();
    let preallocate_file = Arc::clone(&file);
    tokio::task::spawn_blocking(move || preallocate_file.preallocate(total))
        .await?
        .map_err(DownloadError::PreallocateFile)?;

    let mut failures = session.start_all()?;
    session.wait().await?;

    // 全部任务已结束，失败记录都已在通道内
    failures.close();
    let mut collected = Vec::new();
    while let Some(failure) = failures.recv().await {
        collected.push(failure);
    }
    if !collected.is_empty() {
        collected.sort_by_key(|f| f.index);
        logger.record_error(&format!("{} 个分片下载失败", collected.len()));
        return Err(DownloadError::PartsFailed(collected));
    }

    Ok(DownloadSummary {
        elapsed: session.elapsed().unwrap_or_default(),
        started_at: session.started_at().unwrap_or_else(chrono::Utc::now),
        total_bytes: total,
        parts,
    })
}

/// 同步版本：内部创建多线程运行时执行 [`download`]，不能在异步上下文中调用。
pub fn download_blocking(
    address: &str,
    save_path: impl AsRef<Path>,
    workers: usize,
) -> Result<DownloadSummary, DownloadError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(DownloadError::Runtime)?;
    runtime.block_on(download(address, save_path, workers))
}
