//! The in-flight-operation flag that blocks the UI during async calls.
//!
//! `start()` hands back a guard whose drop is the matching `stop()`, so the
//! flag is released on both the success and the failure path of whatever the
//! caller awaits. An unpaired start would leave the UI permanently blocked,
//! which is exactly what the guard makes unrepresentable.

use tokio::sync::watch;

pub struct BusyFlag {
    tx: watch::Sender<bool>,
}

/// Scoped acquisition of the busy flag. Dropping it clears the flag.
#[must_use = "dropping the guard immediately clears the busy flag"]
pub struct BusyGuard<'a> {
    flag: &'a BusyFlag,
}

impl BusyFlag {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Raise the flag for the duration of the returned guard.
    pub fn start(&self) -> BusyGuard<'_> {
        self.tx.send_replace(true);
        BusyGuard { flag: self }
    }

    pub fn is_busy(&self) -> bool {
        *self.tx.borrow()
    }

    /// Observe flag changes (spinner rendering).
    pub fn watch(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for BusyFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.tx.send_replace(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_clears_on_drop() {
        let flag = BusyFlag::new();
        assert!(!flag.is_busy());
        {
            let _guard = flag.start();
            assert!(flag.is_busy());
        }
        assert!(!flag.is_busy());
    }

    #[tokio::test]
    async fn guard_clears_on_error_path() {
        let flag = BusyFlag::new();
        let result: Result<(), &str> = async {
            let _guard = flag.start();
            Err("boom")
        }
        .await;
        assert!(result.is_err());
        assert!(!flag.is_busy());
    }
}
