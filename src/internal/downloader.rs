//! 下载器领域模块：分片规划、Range 拉取、偏移写入与并发调度。
//!
//! 使用方式：`DownloadSession::builder(url).destination(file).workers(n).build()`，
//! 随后依次 `preload` / `start_all` / `wait`。对外导出以 [`crate`] 根为准，此处仅做模块划分。

pub mod impl_traits;
pub mod structs;
pub mod traits;
