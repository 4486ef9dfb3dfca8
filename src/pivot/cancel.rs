use crate::Error;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// Cooperative cancellation flag shared between a caller and a running
/// computation. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct Cancel(Arc<AtomicBool>);

impl Cancel {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
    /// Called at every pivot or iteration boundary.
    pub fn check(&self, pivots: usize) -> Result<(), Error> {
        match self.is_cancelled() {
            true => Err(Error::Cancelled { pivots }),
            false => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let cancel = Cancel::new();
        let other = cancel.clone();
        assert!(cancel.check(0).is_ok());
        other.cancel();
        assert!(cancel.is_cancelled());
        assert_eq!(cancel.check(7), Err(Error::Cancelled { pivots: 7 }));
    }
}
