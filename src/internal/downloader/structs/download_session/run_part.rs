//! 单个分片的完整流程：取区间、Range 请求、校验长度、流式写入偏移。

use std::sync::Arc;
use std::time::Instant;

use tokio_util::io::StreamReader;

use crate::internal::downloader::structs::{DownloadError, OffsetWriter, WorkerState};

use super::coordinator::PartContext;

pub(crate) async fn run_part(ctx: &PartContext, index: usize) -> Result<u64, DownloadError> {
    let range = ctx.plan.get(index)?;
    let wanted = ctx.plan.expected_len(index)?;

    ctx.set_state(index, WorkerState::Running);
    let started = Instant::now();
    ctx.logger.record(&format!("开始下载分片 #{index}..."));

    let body = ctx.source.fetch(range).await?;
    let got = body
        .content_length
        .ok_or(DownloadError::MissingSizeHeader)?;
    if got != wanted {
        return Err(DownloadError::SizeMismatch {
            part: index,
            wanted,
            got,
        });
    }

    ctx.logger
        .record(&format!("分片 #{index} 从偏移 {} 开始写入...", range.start));
    let reader = StreamReader::new(body.stream);
    let mut writer = OffsetWriter::new(Arc::clone(&ctx.file), index, range.start);
    let written = writer
        .write_from(reader, |n| {
            ctx.progress.update_field(|p| p.bytes_done += n);
        })
        .await?;

    ctx.logger.record(&format!(
        "分片 #{index} 下载结束，写入 {written}B（{:?}）",
        started.elapsed()
    ));
    Ok(written)
}
