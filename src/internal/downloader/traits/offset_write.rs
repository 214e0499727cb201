use std::io;

/// 可按绝对偏移写入的目标文件。
///
/// 写入不移动共享游标，多个分片任务可以同时持有同一句柄，
/// 只要各自的写入区间互不重叠就无需加锁。
pub trait OffsetWrite: Send + Sync + 'static {
    /// 从 `offset` 处写入 `buf`，返回实际写入的字节数（可能少于 `buf.len()`）。
    fn write_at(&self, buf: &[u8], offset: u64) -> io::Result<usize>;

    /// 预分配文件大小；默认什么也不做。
    fn preallocate(&self, _len: u64) -> io::Result<()> {
        Ok(())
    }
}
