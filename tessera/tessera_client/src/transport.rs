//! Render transport.
//!
//! The client emits `render` requests and receives rendered components
//! pushed by the server leg. [`channel`] wires both directions over tokio
//! channels.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::trace;

use tessera_core::error::TransportError;
use tessera_core::{ComponentPayload, RenderRequest};

/// Carries render requests to the server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Emit a render request and wait for the server leg to acknowledge it.
    ///
    /// The acknowledgement carries no payload; the rendered component arrives
    /// separately as a push.
    async fn emit(&self, request: RenderRequest) -> Result<(), TransportError>;
}

/// A render request awaiting acknowledgement by the server leg.
#[derive(Debug)]
pub struct PendingRender {
    /// The request.
    pub request: RenderRequest,

    ack: oneshot::Sender<()>,
}

impl PendingRender {
    /// Acknowledge the request. The client may have stopped waiting.
    pub fn ack(self) {
        let _ = self.ack.send(());
    }
}

/// Client end of a channel transport.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    requests: mpsc::Sender<PendingRender>,
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn emit(&self, request: RenderRequest) -> Result<(), TransportError> {
        let label = request.id.clone().unwrap_or_default();
        let (ack, acked) = oneshot::channel();

        self.requests
            .send(PendingRender { request, ack })
            .await
            .map_err(|_| TransportError::Closed)?;
        trace!(component = %label, "Render request emitted");

        acked.await.map_err(|_| TransportError::AckDropped(label))
    }
}

/// Server end of a channel transport.
#[derive(Debug)]
pub struct ServerChannel {
    requests: mpsc::Receiver<PendingRender>,
    pushes: mpsc::Sender<ComponentPayload>,
}

impl ServerChannel {
    /// The next render request, `None` once every client end is dropped.
    pub async fn recv(&mut self) -> Option<PendingRender> {
        self.requests.recv().await
    }

    /// Push a rendered component to the client.
    pub async fn push(&self, payload: ComponentPayload) -> Result<(), TransportError> {
        self.pushes
            .send(payload)
            .await
            .map_err(|_| TransportError::Closed)
    }

    /// A handle for pushing from other tasks.
    pub fn pusher(&self) -> mpsc::Sender<ComponentPayload> {
        self.pushes.clone()
    }
}

/// Create a connected transport.
///
/// # Returns
///
/// The client transport, the server end, and the stream of pushed
/// components the client renderer listens on.
pub fn channel(buffer: usize) -> (ChannelTransport, ServerChannel, mpsc::Receiver<ComponentPayload>) {
    let (request_tx, request_rx) = mpsc::channel(buffer);
    let (push_tx, push_rx) = mpsc::channel(buffer);
    (
        ChannelTransport {
            requests: request_tx,
        },
        ServerChannel {
            requests: request_rx,
            pushes: push_tx,
        },
        push_rx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::InstanceId;

    #[tokio::test]
    async fn test_emit_waits_for_ack() {
        let (transport, mut server, _pushes) = channel(4);

        let server_task = tokio::spawn(async move {
            let pending = server.recv().await.unwrap();
            assert_eq!(pending.request.view.as_deref(), Some("index"));
            pending.ack();
        });

        transport
            .emit(RenderRequest::new("button", "1.0", "index", InstanceId::new()))
            .await
            .unwrap();
        server_task.await.unwrap();
    }

    #[tokio::test]
    async fn test_dropped_ack_is_reported() {
        let (transport, mut server, _pushes) = channel(4);

        tokio::spawn(async move {
            drop(server.recv().await);
        });

        let result = transport
            .emit(RenderRequest::new("button", "1.0", "index", InstanceId::new()))
            .await;
        assert_eq!(result, Err(TransportError::AckDropped("button".to_string())));
    }

    #[tokio::test]
    async fn test_closed_server() {
        let (transport, server, _pushes) = channel(4);
        drop(server);

        let result = transport
            .emit(RenderRequest::new("button", "1.0", "index", InstanceId::new()))
            .await;
        assert_eq!(result, Err(TransportError::Closed));
    }
}
