//! Debounce
//!
//! Runs only the last of a burst of calls, after a quiet period.

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct Debouncer {
    wait_ms: u32,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl Debouncer {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// Schedule `f`, dropping (and so cancelling) whatever was scheduled before
    pub fn call(&self, f: impl FnOnce() + 'static) {
        let timeout = Timeout::new(self.wait_ms, f);
        self.pending.borrow_mut().replace(timeout);
    }
}
