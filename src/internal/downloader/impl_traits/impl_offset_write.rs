use std::fs::File;
use std::io;

use crate::internal::downloader::traits::offset_write::OffsetWrite;

#[cfg(unix)]
impl OffsetWrite for File {
    fn write_at(&self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::write_at(self, buf, offset)
    }

    fn preallocate(&self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

// seek_write 会移动游标，但所有写入都带绝对偏移，游标位置无关紧要
#[cfg(windows)]
impl OffsetWrite for File {
    fn write_at(&self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_write(self, buf, offset)
    }

    fn preallocate(&self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}
