//! Backend selection.
//!
//! Routing is decided once per invocation: connectivity is probed fresh,
//! the credential is consulted, and the chosen backend runs to completion.
//! A failed remote attempt is never retried against the local daemon; its
//! result is returned as-is.

use crate::backend::{Backend, LocalBackend, RemoteBackend};
use crate::config::Config;
use crate::error::Result;
use crate::observability::{ROUTE_LOCAL, ROUTE_REMOTE};
use crate::probe;
use crate::render::Renderer;

/// The backend chosen for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Hosted API over the internet.
    Remote,
    /// Same-machine model daemon.
    Local,
}

/// Picks a backend from the connectivity verdict and credential
/// availability.
///
/// The table is exhaustive: remote requires both connectivity and a
/// credential; every other combination routes local.
pub fn choose_route(online: bool, has_credential: bool) -> Route {
    if online && has_credential {
        Route::Remote
    } else {
        Route::Local
    }
}

/// Wraps a prompt in the fixed translation instruction used by the `dic`
/// subcommand.
pub fn translation_prompt(text: &str) -> String {
    format!("Translate the following text: {text}")
}

/// Routes one prompt to the remote or local backend.
pub struct Dispatcher<'a> {
    config: &'a Config,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher over the process configuration.
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Sends one prompt and returns the accumulated reply.
    ///
    /// Connectivity is probed fresh on every call; the verdict is never
    /// cached across invocations because network state can change between
    /// them. Once a backend is chosen its result is returned unchanged,
    /// success or failure.
    pub async fn dispatch(&self, prompt: &str, renderer: &mut dyn Renderer) -> Result<String> {
        let online = probe::is_online().await;
        match choose_route(online, self.config.has_credential()) {
            Route::Remote => {
                ROUTE_REMOTE.click();
                RemoteBackend::new(self.config)?.send(prompt, renderer).await
            }
            Route::Local => {
                ROUTE_LOCAL.click();
                if online {
                    renderer.print_info("no API key configured; using the local model");
                } else {
                    renderer.print_info("offline; using the local model");
                }
                LocalBackend::new(self.config)?.send(prompt, renderer).await
            }
        }
    }
}
