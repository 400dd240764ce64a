// Public modules
pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ndjson;
pub mod observability;
pub mod probe;
pub mod render;
pub mod sse;
pub mod types;

// Re-exports
pub use backend::{Backend, LocalBackend, RemoteBackend};
pub use config::Config;
pub use dispatch::{Dispatcher, Route, choose_route, translation_prompt};
pub use error::{Error, Result};
pub use render::{PlainTextRenderer, Renderer};
pub use types::*;
