use std::time::Duration;

#[async_trait::async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

/// Timer on the tokio clock, which tests can pause and advance.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Timer on `setTimeout`.
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
#[async_trait::async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
