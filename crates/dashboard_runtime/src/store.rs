//! Store-owner side of the bridge: durable record ownership and host
//! notification routing.

use std::rc::Rc;

use futures::channel::mpsc::UnboundedSender;

use dashboard_contract::{StoreMessage, SurfaceMessage};
use platform_store::{DashboardRecordStore, NotificationService, DASHBOARD_STATE_KEY};

/// The durable-store owner's half of the persistence bridge.
///
/// Owns the single dashboard record exclusively. Performs no validation of
/// payloads in either direction: loads are repaired by the surface-side
/// normalizer, and saves arrive pre-validated from the surface's reducer.
pub struct StoreOwner {
    records: Rc<dyn DashboardRecordStore>,
    notifier: Rc<dyn NotificationService>,
    outbound: UnboundedSender<StoreMessage>,
}

impl StoreOwner {
    /// Creates a store owner over injected services and the store→surface
    /// channel endpoint.
    pub fn new(
        records: Rc<dyn DashboardRecordStore>,
        notifier: Rc<dyn NotificationService>,
        outbound: UnboundedSender<StoreMessage>,
    ) -> Self {
        Self {
            records,
            notifier,
            outbound,
        }
    }

    /// Handles one surface→store message.
    ///
    /// Save and notification failures are logged and dropped, never
    /// retried. A failed load produces no reply at all: the surface stays
    /// in its un-synced placeholder state, which cannot destroy the
    /// persisted record, whereas replying with an empty payload would.
    pub async fn handle_surface_message(&self, message: SurfaceMessage) {
        match message {
            SurfaceMessage::GetState => match self.records.load_record(DASHBOARD_STATE_KEY).await
            {
                Ok(payload) => self.send(StoreMessage::SetState { payload }),
                Err(err) => {
                    log::warn!("dashboard state load failed: {err}");
                    self.show_error(&format!("Dashboard could not be loaded: {err}"))
                        .await;
                }
            },
            SurfaceMessage::SaveState { state } => match serde_json::to_value(&state) {
                Ok(payload) => {
                    if let Err(err) =
                        self.records.save_record(DASHBOARD_STATE_KEY, &payload).await
                    {
                        log::warn!("dashboard state save failed: {err}");
                    }
                }
                Err(err) => log::warn!("dashboard snapshot serialization failed: {err}"),
            },
            SurfaceMessage::ShowInfo { message } => {
                if let Err(err) = self.notifier.show_info(&message).await {
                    log::warn!("info notification failed: {err}");
                }
            }
            SurfaceMessage::ShowError { message } => self.show_error(&message).await,
        }
    }

    /// Signals the surface to run its own add-widget flow, for example from
    /// a host command outside the panel.
    pub fn request_add_widget(&self) {
        self.send(StoreMessage::AddWidget);
    }

    async fn show_error(&self, message: &str) {
        if let Err(err) = self.notifier.show_error(message).await {
            log::warn!("error notification failed: {err}");
        }
    }

    fn send(&self, message: StoreMessage) {
        if self.outbound.unbounded_send(message).is_err() {
            log::warn!("store bridge channel closed; message dropped");
        }
    }
}
