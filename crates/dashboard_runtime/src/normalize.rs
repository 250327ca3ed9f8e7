//! Load-time normalization of raw persisted payloads.
//!
//! This is the only place stale data is rewritten to satisfy the model
//! invariants; it runs once per load and never on the save path.

use std::collections::BTreeMap;

use serde_json::Value;

use dashboard_contract::{WidgetId, WidgetKind, WidgetRecord, WidgetSize};

use crate::model::DashboardState;

/// Converts an arbitrary saved payload into a valid [`DashboardState`].
///
/// Absent payloads, and payloads without any widgets, yield the bootstrap
/// single-clock state. Widget entries missing `id` or carrying an
/// unrecognized `type` are dropped individually so one corrupt entry cannot
/// brick the whole load; `size` falls back to `medium` and `order` falls
/// back to the entry's original sequence position. Existing `order` values
/// are passed through as-is, gaps included; only reorder restores density.
pub fn normalize_payload(payload: Option<&Value>) -> DashboardState {
    let Some(root) = payload else {
        return DashboardState::bootstrap();
    };

    let raw_widgets = root.get("widgets").and_then(Value::as_array);
    let Some(raw_widgets) = raw_widgets.filter(|entries| !entries.is_empty()) else {
        return DashboardState::bootstrap();
    };

    let mut widgets = Vec::with_capacity(raw_widgets.len());
    for (position, entry) in raw_widgets.iter().enumerate() {
        match normalize_widget(position, entry) {
            Some(widget) => widgets.push(widget),
            None => log::warn!("dropping malformed widget entry at position {position}"),
        }
    }

    DashboardState {
        widgets,
        notes_data: normalize_notes(root.get("notesData")),
    }
}

fn normalize_widget(position: usize, entry: &Value) -> Option<WidgetRecord> {
    let id = entry.get("id").and_then(Value::as_str)?;
    let kind = entry
        .get("type")
        .and_then(Value::as_str)
        .and_then(WidgetKind::from_token)?;
    let size = entry
        .get("size")
        .and_then(Value::as_str)
        .and_then(WidgetSize::from_token)
        .unwrap_or_default();
    let order = entry
        .get("order")
        .and_then(Value::as_u64)
        .map(|order| order as u32)
        .unwrap_or(position as u32);

    Some(WidgetRecord {
        id: WidgetId::new(id),
        kind,
        size,
        order,
    })
}

fn normalize_notes(raw: Option<&Value>) -> BTreeMap<String, String> {
    let Some(Value::Object(entries)) = raw else {
        return BTreeMap::new();
    };

    entries
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_str()
                .map(|text| (key.clone(), text.to_string()))
        })
        .collect()
}
