//! Surface-side bridge client: state ownership, hydration, and the
//! load-before-save gate.

use futures::channel::mpsc::UnboundedSender;

use dashboard_contract::{StoreMessage, SurfaceMessage, WidgetId, WidgetKind};

use crate::{
    model::DashboardState,
    normalize::normalize_payload,
    reducer::{reduce_dashboard, DashboardAction, DashboardError, RuntimeEffect},
};

/// The rendering surface's half of the persistence bridge.
///
/// Owns the in-memory [`DashboardState`] exclusively and holds the injected
/// surface→store channel endpoint; there is no ambient transport handle.
/// The surface starts from the bootstrap placeholder state and stays there
/// until the one load response arrives; absence of a response leaves it
/// permanently un-synced, which is accepted rather than retried.
pub struct DashboardSurface {
    state: DashboardState,
    state_loaded: bool,
    outbound: UnboundedSender<SurfaceMessage>,
}

impl DashboardSurface {
    /// Creates a surface over the given channel endpoint and immediately
    /// requests the persisted state, once, per surface instance.
    pub fn connect(outbound: UnboundedSender<SurfaceMessage>) -> Self {
        let surface = Self {
            state: DashboardState::bootstrap(),
            state_loaded: false,
            outbound,
        };
        surface.send(SurfaceMessage::GetState);
        surface
    }

    /// Returns the current in-memory state.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Returns whether the initial load response has been applied.
    pub fn is_loaded(&self) -> bool {
        self.state_loaded
    }

    /// Applies a store→surface message.
    pub fn handle_store_message(&mut self, message: StoreMessage) {
        match message {
            StoreMessage::SetState { payload } => {
                if self.state_loaded {
                    // The gate flips exactly once; a stale echo must not
                    // clobber mutations applied since the first load.
                    log::warn!("ignoring duplicate setState after initial load");
                    return;
                }
                let loaded = normalize_payload(payload.as_ref());
                if let Err(err) =
                    self.dispatch(DashboardAction::HydrateState { state: loaded })
                {
                    log::warn!("hydration dispatch failed: {err}");
                    return;
                }
                self.state_loaded = true;
            }
            StoreMessage::AddWidget => {
                // External trigger for the surface's own add flow; the panel
                // header adds a clock by default.
                if let Err(err) = self.add_widget(WidgetKind::Clock.token()) {
                    log::warn!("externally triggered add failed: {err}");
                }
            }
        }
    }

    /// Applies an action through the reducer and executes the resulting
    /// effects.
    ///
    /// # Errors
    ///
    /// Propagates [`DashboardError`] from the reducer; the state is
    /// unchanged on error.
    pub fn dispatch(&mut self, action: DashboardAction) -> Result<(), DashboardError> {
        let effects = reduce_dashboard(&mut self.state, action)?;
        for effect in effects {
            self.run_effect(effect);
        }
        Ok(())
    }

    /// Adds a widget of the given kind token.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidType`] for tokens outside the
    /// enumeration.
    pub fn add_widget(&mut self, kind: &str) -> Result<(), DashboardError> {
        self.dispatch(DashboardAction::AddWidget {
            kind: kind.to_string(),
        })
    }

    /// Removes a widget; a missing id is a no-op.
    pub fn remove_widget(&mut self, id: WidgetId) {
        let removal = self.dispatch(DashboardAction::RemoveWidget { id });
        debug_assert!(removal.is_ok());
    }

    /// Resizes a widget by size token.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidSize`] for tokens outside the
    /// enumeration.
    pub fn resize_widget(&mut self, id: WidgetId, size: &str) -> Result<(), DashboardError> {
        self.dispatch(DashboardAction::ResizeWidget {
            id,
            size: size.to_string(),
        })
    }

    /// Sets a notes entry; text beyond the cap is truncated.
    pub fn edit_notes(&mut self, key: impl Into<String>, text: impl Into<String>) {
        let edit = self.dispatch(DashboardAction::EditNotes {
            key: key.into(),
            text: text.into(),
        });
        debug_assert!(edit.is_ok());
    }

    /// Moves `dragged` immediately before `target`; self-drops and unknown
    /// ids are no-ops.
    pub fn reorder_widget(&mut self, dragged: WidgetId, target: WidgetId) {
        let reorder = self.dispatch(DashboardAction::ReorderWidget { dragged, target });
        debug_assert!(reorder.is_ok());
    }

    /// Asks the host to show an informational message.
    pub fn notify_info(&self, message: impl Into<String>) {
        self.send(SurfaceMessage::ShowInfo {
            message: message.into(),
        });
    }

    /// Asks the host to show an error message.
    pub fn notify_error(&self, message: impl Into<String>) {
        self.send(SurfaceMessage::ShowError {
            message: message.into(),
        });
    }

    fn run_effect(&self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistState => {
                if !self.state_loaded {
                    // Saving the bootstrap state before the load response
                    // would overwrite the previously persisted dashboard.
                    log::warn!("suppressing save until the initial load completes");
                    return;
                }
                self.send(SurfaceMessage::SaveState {
                    state: self.state.snapshot(),
                });
            }
        }
    }

    fn send(&self, message: SurfaceMessage) {
        if self.outbound.unbounded_send(message).is_err() {
            log::warn!("surface bridge channel closed; message dropped");
        }
    }
}
