//! 把一个分片的响应体按固定大小读块，逐块写入目标文件的绝对偏移处。

use std::io;
use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::internal::downloader::traits::offset_write::OffsetWrite;

use super::download_error::DownloadError;

/// 每次从响应体读取的字节数上限（4KB）。
pub const WRITE_BUFFER_SIZE: usize = 4 * 1024;

/// 读取端最多领先写入线程的数据块数
const WRITE_QUEUE_DEPTH: usize = 8;

/// 单个分片的写入器：从 `start` 开始写，偏移随实际写入字节数推进。
pub struct OffsetWriter {
    file: Arc<dyn OffsetWrite>,
    part: usize,
    offset: u64,
    written: u64,
}

impl OffsetWriter {
    pub fn new(file: Arc<dyn OffsetWrite>, part: usize, start: u64) -> Self {
        Self {
            file,
            part,
            offset: start,
            written: 0,
        }
    }

    /// 下一次写入的绝对偏移
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// 已写入的字节数
    pub fn written(&self) -> u64 {
        self.written
    }

    /// 读到流结束为止，每写完一块调用一次 `on_progress(本块字节数)`，返回本分片累计写入字节数。
    ///
    /// 整个分片只占用一个阻塞线程：读取在当前任务进行，数据块经有界通道交给写入线程，
    /// 写入线程按块回报已写字节数。
    /// 读取失败为 [`DownloadError::Transport`]，写入失败为 [`DownloadError::WriteFile`]。
    pub async fn write_from<R, F>(
        &mut self,
        mut reader: R,
        mut on_progress: F,
    ) -> Result<u64, DownloadError>
    where
        R: AsyncRead + Unpin,
        F: FnMut(u64),
    {
        let (chunk_tx, chunk_rx) = mpsc::channel::<Bytes>(WRITE_QUEUE_DEPTH);
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<u64>();
        let writer = spawn_writer(Arc::clone(&self.file), self.offset, chunk_rx, done_tx);

        let mut buf = vec![0u8; WRITE_BUFFER_SIZE];
        let mut read_error = None;
        loop {
            let n = match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    read_error = Some(e);
                    break;
                }
            };
            // 写入线程已退出，错误在 join 之后取出
            if chunk_tx.send(Bytes::copy_from_slice(&buf[..n])).await.is_err() {
                break;
            }
            while let Ok(nw) = done_rx.try_recv() {
                self.advance(nw, &mut on_progress);
            }
        }

        drop(chunk_tx);
        let result = writer.await?;
        while let Some(nw) = done_rx.recv().await {
            self.advance(nw, &mut on_progress);
        }

        result.map_err(|source| DownloadError::WriteFile {
            part: self.part,
            source,
        })?;
        if let Some(e) = read_error {
            return Err(DownloadError::Transport(e));
        }
        Ok(self.written)
    }

    fn advance<F: FnMut(u64)>(&mut self, nw: u64, on_progress: &mut F) {
        self.offset += nw;
        self.written += nw;
        on_progress(nw);
    }
}

/// 在阻塞线程池里顺序写入收到的数据块，直到通道关闭或写入失败。
fn spawn_writer(
    file: Arc<dyn OffsetWrite>,
    start: u64,
    mut chunks: mpsc::Receiver<Bytes>,
    done: mpsc::UnboundedSender<u64>,
) -> JoinHandle<io::Result<()>> {
    tokio::task::spawn_blocking(move || {
        let mut offset = start;
        while let Some(chunk) = chunks.blocking_recv() {
            let nw = write_fully(file.as_ref(), &chunk, offset)?;
            offset += nw;
            let _ = done.send(nw);
        }
        Ok(())
    })
}

/// 把 `data` 完整写到 `offset` 起始处；短写时按已写字节推进偏移继续写剩余部分。
fn write_fully(file: &dyn OffsetWrite, data: &[u8], offset: u64) -> io::Result<u64> {
    let mut done = 0usize;
    while done < data.len() {
        match file.write_at(&data[done..], offset + done as u64) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "写入返回 0 字节",
                ));
            }
            Ok(nw) => done += nw,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(done as u64)
}
