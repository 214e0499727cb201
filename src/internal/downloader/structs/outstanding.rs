//! 未完成分片计数：spawn 之前登记，任务结束时由守卫递减，归零后唤醒所有等待者。

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Counter {
    pending: AtomicUsize,
    notify: Notify,
}

/// 可共享的未完成计数句柄。
#[derive(Debug, Clone, Default)]
pub struct Outstanding {
    inner: Arc<Counter>,
}

impl Outstanding {
    pub fn new() -> Self {
        Self::default()
    }

    /// 计数加一并返回守卫；守卫被 drop 时恰好递减一次，
    /// 无论任务成功、出错还是 panic。
    pub fn register(&self) -> DoneGuard {
        self.inner.pending.fetch_add(1, Ordering::AcqRel);
        DoneGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// 当前未完成的任务数
    pub fn pending(&self) -> usize {
        self.inner.pending.load(Ordering::Acquire)
    }

    /// 等待计数归零；没有登记任何任务时立即返回。
    pub async fn wait(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            // 先挂上通知再检查计数，避免检查与等待之间丢失唤醒
            notified.as_mut().enable();
            if self.pending() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// 单个任务的完成守卫。
#[derive(Debug)]
pub struct DoneGuard {
    inner: Arc<Counter>,
}

impl Drop for DoneGuard {
    fn drop(&mut self) {
        if self.inner.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.inner.notify.notify_waiters();
        }
    }
}
