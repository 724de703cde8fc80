//! Delay seam
//!
//! Job follow-ups wait a fixed time before firing. The browser build plugs
//! in a `setTimeout`-backed timer; tests plug in doubles that record the
//! requested delay.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait(?Send)]
pub trait Timer {
    /// Resolve once `duration` has elapsed
    async fn sleep(&self, duration: Duration);
}
