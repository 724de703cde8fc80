//! `setTimeout`-backed timer for job follow-ups

use std::time::Duration;

use async_trait::async_trait;
use portal_client::Timer;

#[derive(Clone, Copy, Default)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
