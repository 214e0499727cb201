//! # ReactiveProperty
//!
//! 会话状态、分片状态与下载进度共用的可监听值，基于 [`tokio::sync::watch`]。
//! 写入方调用 `update` / `update_field`，观察方 `watch()` 后 `changed().await`。
//!
//! ```rust,no_run
//! use range_dl::states::ReactiveProperty;
//!
//! let prop = ReactiveProperty::new(0u64);
//! prop.update(1);
//! prop.update_field(|v| *v += 1);
//! assert_eq!(prop.get_current(), 2);
//! ```

use std::sync::Arc;

use tokio::sync::watch;

pub use tokio::sync::watch::error::RecvError;

/// 可共享、可监听的值；clone 出的句柄指向同一份数据。
#[derive(Debug)]
pub struct ReactiveProperty<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for ReactiveProperty<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T> ReactiveProperty<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// 整体替换，没有监听者时同样生效。
    pub fn update(&self, value: T) -> &Self {
        self.sender.send_replace(value);
        self
    }

    /// 在通道写锁内原地修改，并发任务各自累加不会互相覆盖。
    pub fn update_field<F>(&self, updater: F) -> &Self
    where
        F: FnOnce(&mut T),
    {
        self.sender.send_modify(updater);
        self
    }

    /// 当前值的快照
    pub fn get_current(&self) -> T {
        self.sender.borrow().clone()
    }

    pub fn watch(&self) -> PropertyWatcher<T> {
        PropertyWatcher {
            receiver: self.sender.subscribe(),
        }
    }
}

/// 监听句柄；所有 [`ReactiveProperty`] 句柄都被 drop 后 `changed` 返回错误。
#[derive(Debug)]
pub struct PropertyWatcher<T> {
    receiver: watch::Receiver<T>,
}

impl<T: Clone> PropertyWatcher<T> {
    /// 等到出现未读过的新值并返回它；连续多次更新只会看到最新一次。
    pub async fn changed(&mut self) -> Result<T, RecvError> {
        self.receiver.changed().await?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    pub fn borrow(&self) -> T {
        self.receiver.borrow().clone()
    }
}
