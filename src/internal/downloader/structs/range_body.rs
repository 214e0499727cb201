use std::fmt;

use bytes::Bytes;
use futures_util::stream::BoxStream;

/// 探测结果：资源总大小（来自 `Content-Length`），此时已确认服务器支持 Range。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeInfo {
    pub total: u64,
}

/// 单段 Range 响应：声明的长度与流式响应体。
pub struct RangeBody {
    /// 响应头 `Content-Length`，缺失时为 `None`
    pub content_length: Option<u64>,
    /// 响应体数据流；读取失败以 `io::Error` 形式给出
    pub stream: BoxStream<'static, std::io::Result<Bytes>>,
}

impl fmt::Debug for RangeBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeBody")
            .field("content_length", &self.content_length)
            .field("stream", &"<byte stream>")
            .finish()
    }
}
