use serde::Serialize;

/// 一个分片负责的字节区间。
///
/// 除最后一个分片外 `end` 均为包含上界；最后一个分片的 `end` 等于资源总大小，
/// 校验长度时由 [`ByteRange::expected_len`] 的 `is_last` 分支抵消这一差异。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ByteRange {
    /// 起始字节（含）
    pub start: u64,
    /// 结束字节
    pub end: u64,
}

impl ByteRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Range 请求头的值：`bytes=start-end`，直接使用存储的 `end`。
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }

    /// 服务器应返回的字节数；`start > end` 或长度溢出 `u64` 时为 `None`。
    pub fn expected_len(&self, is_last: bool) -> Option<u64> {
        let span = self.end.checked_sub(self.start)?;
        if is_last { Some(span) } else { span.checked_add(1) }
    }
}
