//! In-memory dashboard state and bootstrap defaults.

use std::collections::BTreeMap;

use dashboard_contract::{
    DashboardSnapshot, WidgetId, WidgetKind, WidgetRecord, WidgetSize, DEFAULT_WIDGET_ID,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// The whole dashboard unit owned by the rendering surface.
///
/// The widget sequence carries no inherent order; display order is derived
/// by sorting on [`WidgetRecord::order`].
pub struct DashboardState {
    /// Widget collection.
    pub widgets: Vec<WidgetRecord>,
    /// Free-text notes keyed by widget id or the default-notes sentinel.
    pub notes_data: BTreeMap<String, String>,
}

impl DashboardState {
    /// Returns the state a dashboard starts from when no durable record
    /// exists: a single medium clock at order zero, no notes.
    pub fn bootstrap() -> Self {
        Self {
            widgets: vec![WidgetRecord {
                id: WidgetId::new(DEFAULT_WIDGET_ID),
                kind: WidgetKind::Clock,
                size: WidgetSize::Medium,
                order: 0,
            }],
            notes_data: BTreeMap::new(),
        }
    }

    /// Builds the persistable snapshot of this state.
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            widgets: self.widgets.clone(),
            notes_data: self.notes_data.clone(),
        }
    }

    /// Rebuilds a state from a snapshot that already satisfies the model
    /// invariants.
    pub fn from_snapshot(snapshot: DashboardSnapshot) -> Self {
        Self {
            widgets: snapshot.widgets,
            notes_data: snapshot.notes_data,
        }
    }

    /// Returns the widget with the given id, if present.
    pub fn widget(&self, id: &WidgetId) -> Option<&WidgetRecord> {
        self.widgets.iter().find(|w| &w.id == id)
    }

    /// Returns widgets sorted for display: by `order`, with sequence
    /// position as the tiebreak.
    pub fn widgets_in_display_order(&self) -> Vec<&WidgetRecord> {
        let mut ordered: Vec<&WidgetRecord> = self.widgets.iter().collect();
        ordered.sort_by_key(|w| w.order);
        ordered
    }

    /// Returns whether `order` values form the dense permutation `0..N-1`.
    ///
    /// Holds after reorder, after normalize, and after add on a dense
    /// state; remove deliberately leaves gaps until the next reorder.
    pub fn order_is_dense(&self) -> bool {
        let mut orders: Vec<u32> = self.widgets.iter().map(|w| w.order).collect();
        orders.sort_unstable();
        orders
            .iter()
            .enumerate()
            .all(|(position, order)| *order == position as u32)
    }
}
