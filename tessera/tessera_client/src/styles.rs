//! Stylesheet loading.
//!
//! A load links every stylesheet not yet present in the document head and
//! completes once each requested URL is either already present or settled.
//! Settling means the fetch was attempted, successful or not; detecting it
//! is left to a [`StyleProbe`].

use async_trait::async_trait;
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tracing::debug;

use crate::dom::Dom;

/// Detects when a linked stylesheet has settled.
#[async_trait]
pub trait StyleProbe: Send + Sync {
    /// Resolve once the fetch of `url` has settled.
    async fn settle(&self, url: &str);
}

/// A probe for documents that apply stylesheets synchronously.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateProbe;

#[async_trait]
impl StyleProbe for ImmediateProbe {
    async fn settle(&self, _url: &str) {}
}

/// Counts settled URLs and fires exactly once when all of them are.
struct CompletionToken {
    remaining: AtomicUsize,
    done: Mutex<Option<oneshot::Sender<()>>>,
}

impl CompletionToken {
    fn new(total: usize) -> (Arc<Self>, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        let token = Arc::new(Self {
            remaining: AtomicUsize::new(total),
            done: Mutex::new(Some(tx)),
        });
        if total == 0 {
            token.fire();
        }
        (token, rx)
    }

    fn settle_one(&self) {
        if self.remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.fire();
        }
    }

    fn fire(&self) {
        if let Some(tx) = self.done.lock().take() {
            let _ = tx.send(());
        }
    }
}

/// A pending stylesheet load. Resolves when every URL is accounted for.
#[derive(Debug)]
pub struct StyleLoad {
    done: oneshot::Receiver<()>,
}

impl Future for StyleLoad {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        // A dropped sender means the probe task was torn down; nothing is
        // left to wait for.
        Pin::new(&mut self.done).poll(cx).map(|_| ())
    }
}

/// Links stylesheets and reports when they are loaded.
#[derive(Clone)]
pub struct StyleLoader {
    dom: Arc<dyn Dom>,
    probe: Arc<dyn StyleProbe>,
}

impl StyleLoader {
    /// Create a loader over a document.
    pub fn new(dom: Arc<dyn Dom>, probe: Arc<dyn StyleProbe>) -> Self {
        Self { dom, probe }
    }

    /// Load stylesheets.
    ///
    /// URLs already linked in the head count as loaded and are not linked
    /// again, including URLs linked by a concurrent load. Must be called
    /// from within a tokio runtime when any URL is new.
    pub fn load(&self, urls: &[String]) -> StyleLoad {
        let (token, done) = CompletionToken::new(urls.len());

        for url in urls {
            if self.dom.has_stylesheet(url) {
                token.settle_one();
                continue;
            }

            debug!(url = %url, "Linking stylesheet");
            self.dom.append_stylesheet(url);

            let probe = Arc::clone(&self.probe);
            let token = Arc::clone(&token);
            let url = url.clone();
            tokio::spawn(async move {
                probe.settle(&url).await;
                token.settle_one();
            });
        }

        StyleLoad { done }
    }
}
