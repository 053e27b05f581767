//! Deep-sleep adapter.
//!
//! Implements [`SleepPort`] on top of [`power::enter_deep_sleep`].  On the
//! device the call never returns; on the host it logs and returns.

use crate::app::ports::SleepPort;
use crate::power;

pub struct DeepSleep;

impl SleepPort for DeepSleep {
    fn sleep_for(&mut self, secs: u32) {
        power::enter_deep_sleep(secs);
    }
}
