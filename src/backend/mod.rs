//! Backend clients for the remote and local chat services.
//!
//! Both clients share one contract: build a fresh request for a single
//! prompt, open a bounded-timeout streaming POST, and drive the format's
//! decoder over the open response, printing fragments as they arrive and
//! returning the accumulated reply.

mod local;
mod remote;

pub use local::LocalBackend;
pub use remote::RemoteBackend;

use futures::stream::{Stream, StreamExt};

use crate::error::Result;
use crate::observability::STREAM_FRAGMENTS;
use crate::render::Renderer;
use crate::types::Fragment;

/// A chat backend that can stream one reply for one prompt.
#[async_trait::async_trait]
pub trait Backend {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Sends a prompt and streams the reply.
    ///
    /// Fragments are rendered as they arrive. The returned string is the
    /// ordered concatenation of the content channel only; reasoning-channel
    /// text is rendered but never accumulated.
    async fn send(&self, prompt: &str, renderer: &mut dyn Renderer) -> Result<String>;
}

/// Drives a fragment stream through the renderer while accumulating the
/// reply.
///
/// Emits one trailing newline through the renderer once the stream is
/// exhausted, then hands back the accumulated reply.
pub(crate) async fn drain_fragments<S>(stream: S, renderer: &mut dyn Renderer) -> Result<String>
where
    S: Stream<Item = Result<Fragment>>,
{
    futures::pin_mut!(stream);
    let mut reply = String::new();
    while let Some(fragment) = stream.next().await {
        let fragment = fragment?;
        STREAM_FRAGMENTS.click();
        match fragment {
            Fragment::Content(text) => {
                renderer.print_text(&text);
                reply.push_str(&text);
            }
            Fragment::Reasoning(text) => renderer.print_reasoning(&text),
        }
    }
    renderer.finish_reply();
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[derive(Default)]
    struct RecordingRenderer {
        text: String,
        reasoning: String,
        finished: usize,
    }

    impl Renderer for RecordingRenderer {
        fn print_text(&mut self, text: &str) {
            self.text.push_str(text);
        }

        fn print_reasoning(&mut self, text: &str) {
            self.reasoning.push_str(text);
        }

        fn print_info(&mut self, _info: &str) {}

        fn print_error(&mut self, _error: &str) {}

        fn finish_reply(&mut self) {
            self.finished += 1;
        }
    }

    #[tokio::test]
    async fn accumulates_content_only() {
        let fragments = vec![
            Ok(Fragment::Reasoning("thinking".to_string())),
            Ok(Fragment::Content("Hi".to_string())),
            Ok(Fragment::Content(" there".to_string())),
        ];
        let mut renderer = RecordingRenderer::default();
        let reply = drain_fragments(stream::iter(fragments), &mut renderer)
            .await
            .unwrap();

        assert_eq!(reply, "Hi there");
        assert_eq!(renderer.text, "Hi there");
        assert_eq!(renderer.reasoning, "thinking");
        assert_eq!(renderer.finished, 1);
    }

    #[tokio::test]
    async fn stream_error_propagates() {
        let fragments = vec![
            Ok(Fragment::Content("partial".to_string())),
            Err(crate::error::Error::streaming("connection reset", None)),
        ];
        let mut renderer = RecordingRenderer::default();
        let result = drain_fragments(stream::iter(fragments), &mut renderer).await;

        assert!(result.is_err());
        assert_eq!(renderer.text, "partial");
        assert_eq!(renderer.finished, 0);
    }
}
