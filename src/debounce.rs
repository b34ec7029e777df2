use std::cell::RefCell;
use std::rc::Rc;

use crate::timers::Scheduler;

struct DebounceState<A, S: Scheduler> {
    action: Rc<dyn Fn(A)>,
    wait_ms: u32,
    scheduler: S,
    pending: RefCell<Option<S::Handle>>,
}

pub struct Debounced<A, S: Scheduler> {
    state: Rc<DebounceState<A, S>>,
}

impl<A, S: Scheduler> Clone for Debounced<A, S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

pub fn debounce<A, S, F>(action: F, wait_ms: u32, scheduler: S) -> Debounced<A, S>
where
    A: 'static,
    S: Scheduler,
    F: Fn(A) + 'static,
{
    Debounced {
        state: Rc::new(DebounceState {
            action: Rc::new(action),
            wait_ms,
            scheduler,
            pending: RefCell::new(None),
        }),
    }
}

impl<A: 'static, S: Scheduler> Debounced<A, S> {
    pub fn call(&self, args: A) {
        let previous = self.state.pending.borrow_mut().take();
        drop(previous);

        let action = self.state.action.clone();
        let handle = self
            .state
            .scheduler
            .schedule(self.state.wait_ms, Box::new(move || action(args)));
        *self.state.pending.borrow_mut() = Some(handle);
    }
}
