//! Resend throttling. [`Countdown`] is the pure value; [`CooldownTimer`] drives
//! it once per second and stops scheduling ticks as soon as it is dropped, so a
//! torn-down view never acts on stale state.

use std::time::Duration;

/// Period between cooldown ticks.
pub const TICK: Duration = Duration::from_secs(1);

/// Seconds left before a resend is allowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn start(&mut self, seconds: u32) {
        self.remaining = seconds;
    }

    /// Decrements by one second, never below zero, and returns what is left.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use host::CooldownTimer;

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use super::TICK;
    use crate::app_lib::AppError;
    use tokio::{runtime::Handle, task::JoinHandle, time::sleep};
    use tracing::debug;

    /// Recurring one-second tick on the current tokio runtime. `on_tick`
    /// returns whether another tick should be scheduled.
    #[derive(Debug)]
    pub struct CooldownTimer {
        task: JoinHandle<()>,
    }

    impl CooldownTimer {
        /// # Errors
        /// Returns `AppError::Config` when called outside a tokio runtime.
        pub fn start<F>(mut on_tick: F) -> Result<Self, AppError>
        where
            F: FnMut() -> bool + Send + 'static,
        {
            let handle = Handle::try_current()
                .map_err(|err| AppError::Config(format!("No async runtime for timer: {err}")))?;

            let task = handle.spawn(async move {
                loop {
                    sleep(TICK).await;
                    if !on_tick() {
                        debug!("cooldown timer finished");
                        break;
                    }
                }
            });

            Ok(Self { task })
        }

        #[must_use]
        pub fn is_finished(&self) -> bool {
            self.task.is_finished()
        }

        pub fn cancel(self) {
            drop(self);
        }
    }

    impl Drop for CooldownTimer {
        fn drop(&mut self) {
            self.task.abort();
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::CooldownTimer;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::TICK;
    use crate::app_lib::AppError;
    use gloo_timers::callback::Interval;
    use std::{cell::RefCell, rc::Rc};
    use tracing::debug;

    /// Recurring one-second browser interval. `on_tick` returns whether
    /// further ticks are wanted; the interval is cleared as soon as it returns
    /// `false`, or when the owner drops the timer.
    pub struct CooldownTimer {
        interval: Rc<RefCell<Option<Interval>>>,
    }

    impl CooldownTimer {
        /// # Errors
        /// Never fails in the browser; the signature matches the host timer.
        pub fn start<F>(mut on_tick: F) -> Result<Self, AppError>
        where
            F: FnMut() -> bool + 'static,
        {
            let slot: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
            let owner = Rc::downgrade(&slot);
            let millis = u32::try_from(TICK.as_millis()).unwrap_or(1_000);
            let interval = Interval::new(millis, move || {
                if on_tick() {
                    return;
                }
                let Some(slot) = owner.upgrade() else {
                    return;
                };
                let finished = slot.try_borrow_mut().ok().and_then(|mut current| current.take());
                if let Some(interval) = finished {
                    debug!("cooldown timer finished");
                    // the callback is still running; free it once it has returned
                    let callback = interval.cancel();
                    wasm_bindgen_futures::spawn_local(async move { drop(callback) });
                }
            });
            *slot.borrow_mut() = Some(interval);

            Ok(Self { interval: slot })
        }

        #[must_use]
        pub fn is_finished(&self) -> bool {
            self.interval.borrow().is_none()
        }

        pub fn cancel(self) {
            drop(self.interval.borrow_mut().take());
        }
    }
}
