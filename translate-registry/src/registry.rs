use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::Notify;
use translate_provider::{Translator, TranslatorCapability};

type ProviderMap = HashMap<String, Arc<dyn Translator>>;

/// One point-in-time snapshot of the registered providers. Swapped as a
/// whole on reconfiguration rather than mutated in place, so a [`Handle`]
/// holding an old snapshot keeps seeing a consistent set for the lifetime
/// of its translation.
struct RegistrySnapshot {
    providers: ProviderMap,
}

/// Process-wide `service_id → provider instance` mapping.
///
/// Reconfiguration (swapping in a provider built from new credentials)
/// must not race a translation reading the old instance mid-flight.
/// Rather than locking every read, callers take a [`Handle`] up front;
/// [`ProviderRegistry::configure`] waits for the outstanding handle count
/// to reach zero before it swaps in the new snapshot, then proceeds
/// atomically. No handle is ever blocked or torn — it keeps the snapshot
/// it started with even if a reconfiguration completes underneath it.
pub struct ProviderRegistry {
    snapshot: RwLock<Arc<RegistrySnapshot>>,
    handle_count: AtomicUsize,
    idle: Notify,
}

impl ProviderRegistry {
    pub fn new(providers: impl IntoIterator<Item = Arc<dyn Translator>>) -> Self {
        let providers = providers
            .into_iter()
            .map(|p| (p.service_id().to_string(), p))
            .collect();
        ProviderRegistry {
            snapshot: RwLock::new(Arc::new(RegistrySnapshot { providers })),
            handle_count: AtomicUsize::new(0),
            idle: Notify::new(),
        }
    }

    pub fn empty() -> Self {
        ProviderRegistry::new(Vec::new())
    }

    /// Increments the outstanding-handle count and hands back a
    /// [`Handle`] pinned to the current snapshot.
    pub fn acquire(self: &Arc<Self>) -> Handle {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.snapshot.read().expect("registry lock poisoned").clone();
        Handle {
            registry: Arc::clone(self),
            snapshot,
        }
    }

    /// Replaces one provider's instance, waiting for the outstanding
    /// handle count to reach zero first. New translations that call
    /// [`ProviderRegistry::acquire`] while this is waiting are not
    /// blocked — they still see the old snapshot until the swap lands,
    /// and the swap only has to wait for handles already outstanding at
    /// the moment `configure` was called.
    pub async fn configure(&self, service_id: impl Into<String>, provider: Arc<dyn Translator>) {
        let service_id = service_id.into();
        self.wait_for_idle().await;
        let mut guard = self.snapshot.write().expect("registry lock poisoned");
        let mut providers = guard.providers.clone();
        providers.insert(service_id.clone(), provider);
        *guard = Arc::new(RegistrySnapshot { providers });
        log::debug!("registry: configured provider \"{service_id}\"");
    }

    /// Removes a provider entirely, under the same zero-handle wait as
    /// [`ProviderRegistry::configure`].
    pub async fn remove(&self, service_id: &str) {
        self.wait_for_idle().await;
        let mut guard = self.snapshot.write().expect("registry lock poisoned");
        let mut providers = guard.providers.clone();
        providers.remove(service_id);
        *guard = Arc::new(RegistrySnapshot { providers });
    }

    async fn wait_for_idle(&self) {
        loop {
            let notified = self.idle.notified();
            if self.handle_count.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }

    /// The [`TranslatorCapability`] of every currently registered
    /// provider, for callers choosing a provider before committing to a
    /// translation.
    pub fn list_capabilities(&self) -> Vec<TranslatorCapability> {
        self.snapshot
            .read()
            .expect("registry lock poisoned")
            .providers
            .values()
            .map(|p| p.capability().clone())
            .collect()
    }
}

/// A reference-counted hold on one snapshot of the registry.
///
/// Dropping the last outstanding handle wakes any [`ProviderRegistry::configure`]
/// or [`ProviderRegistry::remove`] call waiting for the registry to go idle.
pub struct Handle {
    registry: Arc<ProviderRegistry>,
    snapshot: Arc<RegistrySnapshot>,
}

impl Handle {
    pub fn get(&self, service_id: &str) -> Option<Arc<dyn Translator>> {
        self.snapshot.providers.get(service_id).cloned()
    }

    pub fn list_capabilities(&self) -> Vec<TranslatorCapability> {
        self.snapshot.providers.values().map(|p| p.capability().clone()).collect()
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if self.registry.handle_count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.registry.idle.notify_waiters();
        }
    }
}
