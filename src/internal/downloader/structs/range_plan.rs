//! 分片规划：根据资源大小与分片数计算互不重叠、首尾相接的字节区间。

use super::byte_range::ByteRange;
use super::download_error::DownloadError;

/// 已规划好的分片列表，按分片序号索引；规划后长度固定，不再增删。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangePlan {
    total: u64,
    ranges: Vec<ByteRange>,
}

impl RangePlan {
    /// 把 `total` 字节平均切成 `workers` 段，余数全部归最后一段。
    ///
    /// 分片数不会超过总字节数，保证每段至少 1 字节。
    pub fn plan(total: u64, workers: usize) -> Result<Self, DownloadError> {
        if total == 0 {
            return Err(DownloadError::InvalidInput(
                "无法为大小为 0 的资源生成分片".into(),
            ));
        }
        if workers == 0 {
            return Err(DownloadError::InvalidInput(
                "分片数为 0，无法生成分片".into(),
            ));
        }

        let parts = (workers as u64).min(total);
        let part_size = total / parts;

        let ranges = (0..parts)
            .map(|part| {
                if part == parts - 1 {
                    ByteRange::new(part * part_size, total)
                } else {
                    ByteRange::new(part * part_size, (part + 1) * part_size - 1)
                }
            })
            .collect();

        Ok(Self { total, ranges })
    }

    /// 资源总大小（字节）
    pub fn total(&self) -> u64 {
        self.total
    }

    /// 分片数
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn ranges(&self) -> &[ByteRange] {
        &self.ranges
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.ranges.len()
    }

    pub fn get(&self, index: usize) -> Result<ByteRange, DownloadError> {
        self.ranges
            .get(index)
            .copied()
            .ok_or(DownloadError::IndexOutOfRange {
                index,
                capacity: self.ranges.len(),
            })
    }

    /// 该分片响应体应有的字节数（最后一段按 `end - start` 计算）。
    pub fn expected_len(&self, index: usize) -> Result<u64, DownloadError> {
        let range = self.get(index)?;
        range
            .expected_len(self.is_last(index))
            .ok_or_else(|| DownloadError::InvalidInput(format!("分片 #{index} 的区间长度无效")))
    }

    /// 覆盖指定序号的分片区间；序号越界时报错，不会扩容。
    ///
    /// 区间必须满足 `start <= end`，且按该分片位置计算的长度不溢出。
    pub fn assign(&mut self, index: usize, range: ByteRange) -> Result<(), DownloadError> {
        let capacity = self.ranges.len();
        if index < capacity && range.expected_len(self.is_last(index)).is_none() {
            return Err(DownloadError::InvalidInput(format!(
                "分片 #{index} 的区间 {} 无效",
                range.header_value()
            )));
        }
        let slot = self
            .ranges
            .get_mut(index)
            .ok_or(DownloadError::IndexOutOfRange { index, capacity })?;
        *slot = range;
        Ok(())
    }
}
