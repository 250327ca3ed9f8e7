//! Shared contract types between the dashboard rendering surface and the
//! durable-store owner.
//!
//! The widget record model, the persisted snapshot shape, and the bridge
//! message protocol all live here so both sides of the bridge agree on one
//! wire format. Message enums are closed sum types: adding a message kind is
//! a compile-time event for every `match` over them.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum stored length of a notes entry, in characters.
pub const NOTES_MAX_CHARS: usize = 1000;

/// Notes key for the always-present default notes surface.
pub const DEFAULT_NOTES_KEY: &str = "default-notes";

/// Widget id used by the bootstrap single-clock dashboard.
pub const DEFAULT_WIDGET_ID: &str = "default-clock";

/// Opaque identifier for one widget, unique within a dashboard.
///
/// Ids are minted once at widget creation and never change; the engine
/// attaches no meaning to their contents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Wraps a raw id string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Closed enumeration of widget types the panel can host.
pub enum WidgetKind {
    /// Local time display.
    Clock,
    /// Greeting card.
    Welcome,
    /// Free-text quick notes.
    QuickNotes,
    /// Ambient sound player.
    Ambient,
    /// Live sports scores.
    Sports,
    /// Market prices.
    Stocks,
    /// Issue-tracker activity.
    GitHub,
}

impl WidgetKind {
    /// Every widget kind, in declaration order.
    pub const ALL: [WidgetKind; 7] = [
        Self::Clock,
        Self::Welcome,
        Self::QuickNotes,
        Self::Ambient,
        Self::Sports,
        Self::Stocks,
        Self::GitHub,
    ];

    /// Returns the stable wire token for this kind.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Clock => "clock",
            Self::Welcome => "welcome",
            Self::QuickNotes => "quicknotes",
            Self::Ambient => "ambient",
            Self::Sports => "sports",
            Self::Stocks => "stocks",
            Self::GitHub => "github",
        }
    }

    /// Parses a wire token, returning `None` for anything outside the
    /// enumeration.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.token() == token)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
/// Closed enumeration of grid cell spans a widget can occupy.
pub enum WidgetSize {
    /// Single cell.
    Small,
    /// Default span.
    #[default]
    Medium,
    /// Double-width, double-height span.
    Large,
    /// Full-row span.
    Wide,
    /// Full-column span.
    Tall,
}

impl WidgetSize {
    /// Every widget size, in declaration order.
    pub const ALL: [WidgetSize; 5] = [
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::Wide,
        Self::Tall,
    ];

    /// Returns the stable wire token for this size.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Wide => "wide",
            Self::Tall => "tall",
        }
    }

    /// Parses a wire token, returning `None` for anything outside the
    /// enumeration.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.token() == token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One grid entry: type, size, and display order.
pub struct WidgetRecord {
    /// Opaque unique id, immutable after creation.
    pub id: WidgetId,
    /// Widget type, immutable after creation.
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    /// Current grid span.
    pub size: WidgetSize,
    /// Display-order rank; `0..N-1` across the collection when dense.
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// The whole persisted dashboard unit exchanged over the bridge.
///
/// Display order is derived by sorting on [`WidgetRecord::order`], never on
/// sequence position.
pub struct DashboardSnapshot {
    /// Widget collection, in no inherent order.
    pub widgets: Vec<WidgetRecord>,
    /// Free-text notes keyed by widget id or [`DEFAULT_NOTES_KEY`].
    ///
    /// Entries may outlive the widget they were keyed by; removal does not
    /// cascade-delete notes.
    #[serde(rename = "notesData")]
    pub notes_data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
/// Messages sent from the rendering surface to the durable-store owner.
pub enum SurfaceMessage {
    /// Request the persisted dashboard payload. Sent once, at surface
    /// initialization.
    GetState,
    /// Persist the current state. Fire-and-forget; no acknowledgement is
    /// awaited or required.
    SaveState {
        /// Snapshot of the surface's settled state.
        state: DashboardSnapshot,
    },
    /// Ask the host to show an informational message.
    #[serde(rename = "info")]
    ShowInfo {
        /// Message text.
        message: String,
    },
    /// Ask the host to show an error message.
    #[serde(rename = "error")]
    ShowError {
        /// Message text.
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
/// Messages sent from the durable-store owner to the rendering surface.
pub enum StoreMessage {
    /// Load response for [`SurfaceMessage::GetState`].
    SetState {
        /// Raw persisted payload, or `None` when no record exists yet. The
        /// surface normalizes this into a valid state; the store performs no
        /// validation of its own.
        #[serde(default)]
        payload: Option<Value>,
    },
    /// External trigger (for example a host command outside the panel)
    /// asking the surface to run its own add-widget flow.
    AddWidget,
}
