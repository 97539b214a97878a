//! Store shared between several event producers.
//!
//! Only one event may be in flight at a time. An event that arrives while
//! another still holds the store is rejected with [`GalleryError::Busy`]
//! instead of queuing behind it.

use crate::app::{handle_event, Event, Store};
use crate::domain::error::{GalleryError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Debug)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Handles `event` unless another event is in flight.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Busy`] if the store is held, otherwise whatever
    /// [`handle_event`] returns.
    pub async fn dispatch(&self, event: Event) -> Result<()> {
        let Ok(mut store) = self.inner.try_lock() else {
            tracing::warn!(?event, "rejected while another operation is in flight");
            return Err(GalleryError::Busy);
        };
        handle_event(&mut store, event).await
    }

    /// Runs `f` on the store once no event is in flight.
    pub async fn read<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        let store = self.inner.lock().await;
        f(&store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::status::{self, Status};
    use crate::app::testing::{Gate, ScriptedGallery};
    use crate::domain::Entry;
    use crate::service::WriteSync;

    #[tokio::test]
    async fn second_event_is_rejected_while_first_is_in_flight() {
        let gate = Gate::default();
        let gallery = ScriptedGallery::new(WriteSync::Reload)
            .with_entries(vec![Entry::new("a")])
            .with_gate(gate.clone());
        let shared = SharedStore::new(Store::new(Box::new(gallery)));

        let first = tokio::spawn({
            let shared = shared.clone();
            async move { shared.dispatch(Event::Load).await }
        });
        gate.entered.notified().await;

        let err = shared.dispatch(Event::NewEntry).await.unwrap_err();
        assert!(matches!(err, GalleryError::Busy));

        gate.release.notify_one();
        first.await.unwrap().unwrap();

        let (count, loaded) = shared
            .read(|store| (store.entries().len(), store.status().clone()))
            .await;
        assert_eq!(count, 1);
        assert_eq!(loaded, Status::info(status::LOADED));
    }

    #[tokio::test]
    async fn sequential_events_are_accepted() {
        let gallery = ScriptedGallery::new(WriteSync::Mirror).with_entries(vec![Entry::new("a")]);
        let shared = SharedStore::new(Store::new(Box::new(gallery)));

        shared.dispatch(Event::Load).await.unwrap();
        shared.dispatch(Event::Select("a".into())).await.unwrap();

        let selected = shared.read(|store| store.selected_id().map(String::from)).await;
        assert_eq!(selected.as_deref(), Some("a"));
    }
}
