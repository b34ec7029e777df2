/// Schedules one-shot tasks. Dropping a returned handle cancels the task if it
/// has not fired yet.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

#[cfg(target_arch = "wasm32")]
impl Scheduler for BrowserScheduler {
    type Handle = gloo_timers::callback::Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle {
        gloo_timers::callback::Timeout::new(delay_ms, task)
    }
}

#[cfg(target_arch = "wasm32")]
pub fn schedule_detached<F>(delay_ms: u32, task: F)
where
    F: FnOnce() + 'static,
{
    gloo_timers::callback::Timeout::new(delay_ms, task).forget();
}
