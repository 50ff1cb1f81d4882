//! Client renderer.
//!
//! The renderer requests component instances, inserts the components pushed
//! back by the server and races a placeholder against slow deliveries.
//!
//! Rendering a component:
//!
//! 1. deregister the instance
//! 2. bind, hide and fill its node, tagging it with the container class
//! 3. register the instance
//! 4. reveal the node, right away or once its stylesheets are loaded
//! 5. pre-register the declared children and arm placeholders for those
//!    that race one
//!
//! Placeholder timers and real deliveries commit under one lock, and a timer
//! only commits while its instance is still pending. Once a real component
//! has been rendered for an instance, a late timer never replaces it.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use tessera_core::{
    container_class, ClientSettings, ComponentPayload, Error, InstanceId, RenderRequest, Result,
};

use crate::dom::Dom;
use crate::placeholder::{ArmTicket, PlaceholderScheduler};
use crate::registry::ComponentRegistry;
use crate::styles::StyleLoader;
use crate::transport::Transport;

struct Inner {
    dom: Arc<dyn Dom>,
    registry: Arc<ComponentRegistry>,
    styles: StyleLoader,
    transport: Arc<dyn Transport>,
    scheduler: PlaceholderScheduler,
    settings: RwLock<ClientSettings>,
    /// Serializes commits of real and placeholder renders.
    commit: Mutex<()>,
    /// Render generation of each instance awaiting a delayed reveal.
    generations: Mutex<HashMap<InstanceId, u64>>,
    next_generation: AtomicU64,
}

/// Inserts rendered components into a document.
///
/// Cloning is cheap; clones share all state. Rendering spawns tasks and must
/// happen inside a tokio runtime.
#[derive(Clone)]
pub struct ClientRenderer {
    inner: Arc<Inner>,
}

impl ClientRenderer {
    /// Create a new renderer.
    ///
    /// # Arguments
    ///
    /// * `dom` - The document components are inserted into.
    /// * `registry` - The component registry of the page.
    /// * `styles` - The stylesheet loader.
    /// * `transport` - Carries render requests to the server.
    pub fn new(
        dom: Arc<dyn Dom>,
        registry: Arc<ComponentRegistry>,
        styles: StyleLoader,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                dom,
                registry,
                styles,
                transport,
                scheduler: PlaceholderScheduler::new(),
                settings: RwLock::new(ClientSettings::default()),
                commit: Mutex::new(()),
                generations: Mutex::new(HashMap::new()),
                next_generation: AtomicU64::new(1),
            }),
        }
    }

    /// Apply the settings handed over by the server.
    pub fn configure(&self, settings: ClientSettings) {
        info!(
            timeout_ms = settings.placeholder_timeout_ms,
            placeholder = settings.placeholder.is_some(),
            "Client renderer configured"
        );
        *self.inner.settings.write() = settings;
    }

    /// Set the rendered placeholder component.
    pub fn set_placeholder(&self, placeholder: Option<ComponentPayload>) {
        self.inner.settings.write().placeholder = placeholder;
    }

    /// Set how long to wait before showing the placeholder.
    ///
    /// A zero timeout is rejected; timeouts beyond `u64::MAX` milliseconds
    /// saturate.
    pub fn set_placeholder_timeout(&self, timeout: Duration) -> Result<()> {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        if timeout_ms == 0 {
            return Err(Error::Config("Placeholder timeout cannot be zero".to_string()));
        }
        self.inner.settings.write().placeholder_timeout_ms = timeout_ms;
        Ok(())
    }

    /// The component registry.
    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.inner.registry
    }

    /// The placeholder scheduler.
    pub fn scheduler(&self) -> &PlaceholderScheduler {
        &self.inner.scheduler
    }

    /// Request a component instance from the server.
    ///
    /// A request missing its id, instance id or view is logged and dropped.
    /// When the request races a placeholder, the timer is armed before the
    /// request is emitted.
    pub async fn request_component(&self, request: RenderRequest) {
        let missing = request.missing_fields();
        let Some(instance_id) = request.instance_id.filter(|_| missing.is_empty()) else {
            error!(missing = ?missing, "Component id, instance id and view are required");
            return;
        };

        if request.placeholder {
            self.arm(instance_id);
        }

        if let Err(err) = self.inner.transport.emit(request).await {
            error!(instance_id = %instance_id, "Render request failed: {}", err);
        }
    }

    /// Spawn a task rendering every pushed component.
    pub fn listen(&self, mut pushes: mpsc::Receiver<ComponentPayload>) -> JoinHandle<()> {
        let renderer = self.clone();
        tokio::spawn(async move {
            while let Some(component) = pushes.recv().await {
                renderer.render_component(&component);
            }
            debug!("Render push stream closed");
        })
    }

    /// Render a delivered component.
    ///
    /// The instance is marked delivered, so a pending placeholder timer for
    /// it has no effect.
    pub fn render_component(&self, component: &ComponentPayload) {
        let _commit = self.inner.commit.lock();
        self.inner.scheduler.disarm(component.instance_id);
        self.commit(component);
    }

    /// Render the placeholder into an instance.
    ///
    /// A pending placeholder timer for the instance is cancelled.
    pub fn render_placeholder(&self, instance_id: InstanceId) {
        let _commit = self.inner.commit.lock();
        self.inner.scheduler.disarm(instance_id);
        self.commit_placeholder(instance_id);
    }

    fn arm(&self, instance_id: InstanceId) {
        let ticket = self.inner.scheduler.arm(instance_id);
        let timeout = self.inner.settings.read().placeholder_timeout();
        let renderer = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            renderer.expire(instance_id, ticket);
        });
    }

    fn expire(&self, instance_id: InstanceId, ticket: ArmTicket) {
        let _commit = self.inner.commit.lock();
        if self.inner.scheduler.claim(instance_id, ticket) {
            debug!(instance_id = %instance_id, "Component late, showing placeholder");
            self.commit_placeholder(instance_id);
        }
    }

    fn commit_placeholder(&self, instance_id: InstanceId) {
        let placeholder = self.inner.settings.read().placeholder.clone();
        match placeholder {
            Some(placeholder) => self.commit(&placeholder.rebind(instance_id)),
            None => warn!(instance_id = %instance_id, "No placeholder component configured"),
        }
    }

    fn commit(&self, component: &ComponentPayload) {
        let id = component.instance_id;
        let dom = &self.inner.dom;

        self.inner.registry.deregister(id);

        dom.ensure_node(id);
        dom.hide(id);
        dom.set_html(id, &component.html);
        dom.set_class(id, &container_class(&component.id, &component.version));

        self.inner.registry.register(component);
        debug!(instance_id = %id, component = %component.id, version = %component.version, "Component inserted");

        if component.css.is_empty() {
            self.inner.generations.lock().remove(&id);
            dom.show(id);
        } else {
            let generation = self.next_generation(id);
            let load = self.inner.styles.load(&component.css);
            let renderer = self.clone();
            tokio::spawn(async move {
                load.await;
                let _commit = renderer.inner.commit.lock();
                if renderer.finish_generation(id, generation) {
                    renderer.inner.dom.show(id);
                } else {
                    debug!(instance_id = %id, "Skipping reveal of a replaced render");
                }
            });
        }

        for child in &component.children {
            if let Err(err) = self.inner.registry.pre_register(child) {
                warn!(instance_id = %child.instance_id, "Child not pre-registered: {}", err);
            }
            if child.placeholder {
                self.arm(child.instance_id);
            }
        }
    }

    fn next_generation(&self, id: InstanceId) -> u64 {
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
        self.inner.generations.lock().insert(id, generation);
        generation
    }

    /// Drops the instance's generation if it is still `generation`.
    fn finish_generation(&self, id: InstanceId, generation: u64) -> bool {
        let mut generations = self.inner.generations.lock();
        if generations.get(&id) == Some(&generation) {
            generations.remove(&id);
            true
        } else {
            false
        }
    }
}
