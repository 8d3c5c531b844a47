//! Test utilities for listener ordering.

use crate::Event;
use parking_lot::Mutex;
use std::sync::Arc;

/// Records the order in which its listeners were invoked.
///
/// Every listener produced by [`listener`](Self::listener) appends its
/// label to a shared log.
#[derive(Clone, Default)]
pub struct RecordingListener {
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingListener {
    /// Creates a recorder with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a listener for `E` that logs `label` when called.
    pub fn listener<E: Event>(
        &self,
        label: &'static str,
    ) -> impl Fn(&mut E) -> anyhow::Result<()> + Send + Sync + 'static {
        let log = Arc::clone(&self.log);
        move |_: &mut E| {
            log.lock().push(label);
            Ok(())
        }
    }

    /// Labels logged so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<&'static str> {
        self.log.lock().clone()
    }

    /// Clears the log.
    pub fn reset(&self) {
        self.log.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tick;
    impl Event for Tick {}

    #[test]
    fn records_in_call_order() {
        let rec = RecordingListener::new();
        let a = rec.listener::<Tick>("a");
        let b = rec.listener::<Tick>("b");
        b(&mut Tick).expect("ok");
        a(&mut Tick).expect("ok");
        b(&mut Tick).expect("ok");
        assert_eq!(rec.calls(), ["b", "a", "b"]);

        rec.reset();
        assert!(rec.calls().is_empty());
    }
}
