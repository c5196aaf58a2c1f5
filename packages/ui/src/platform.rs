//! Small platform shims: timers, wall-clock milliseconds, and the forced
//! reload used when a session is evicted.

/// Suspend for `ms` milliseconds on the current task.
pub(crate) async fn sleep(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(std::time::Duration::from_millis(ms)).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

/// Milliseconds since the Unix epoch, as used for cache freshness stamps.
pub(crate) fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0)
    }
}

/// Reload the whole application. On the web this drops every piece of
/// in-memory state and re-renders from the (now possibly empty) credential
/// store, which is the signed-out view when the session was just evicted.
pub(crate) fn reload_app() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!("session ended, application restart required");
    }
}
