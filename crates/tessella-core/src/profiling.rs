//! Profiling scopes based on the `puffin` crate.

use std::sync::OnceLock;

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

/// Keeps the profiler server alive for the process lifetime.
static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Enable scope collection and start the puffin HTTP server so a viewer
/// can attach.
pub fn init_profiling() {
    puffin::set_scopes_on(true);

    match puffin_http::Server::new("0.0.0.0:8585") {
        Ok(server) => {
            tracing::info!("puffin profiler listening on http://0.0.0.0:8585");
            let _ = PROFILING_SERVER.set(server);
        }
        Err(err) => {
            tracing::error!("failed to start puffin server: {err}");
        }
    }
}

/// Mark the start of a new frame. Call once per frame from the main loop.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
