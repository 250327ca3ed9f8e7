//! Reducer actions, side-effect intents, and transition logic for the
//! dashboard state engine.

use thiserror::Error;

use dashboard_contract::{WidgetId, WidgetKind, WidgetRecord, WidgetSize, NOTES_MAX_CHARS};

use crate::model::DashboardState;

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_dashboard`] to mutate [`DashboardState`].
///
/// `kind` and `size` arrive as raw wire tokens because the UI event layer is
/// stringly typed; token validation happens here so an out-of-enumeration
/// value is rejected before it can reach the state.
pub enum DashboardAction {
    /// Append a new widget of the given kind.
    AddWidget {
        /// Widget kind wire token (for example `"clock"`).
        kind: String,
    },
    /// Remove a widget by id. Its notes are retained.
    RemoveWidget {
        /// Widget to remove.
        id: WidgetId,
    },
    /// Change a widget's grid span.
    ResizeWidget {
        /// Widget to resize.
        id: WidgetId,
        /// Widget size wire token (for example `"wide"`).
        size: String,
    },
    /// Set a notes entry, truncated to the notes cap.
    EditNotes {
        /// Notes key: a widget id or the default-notes sentinel.
        key: String,
        /// Replacement text.
        text: String,
    },
    /// Move a dragged widget immediately before the drop target.
    ReorderWidget {
        /// Widget being dragged.
        dragged: WidgetId,
        /// Widget it was dropped onto.
        target: WidgetId,
    },
    /// Replace the in-memory state with a normalized loaded state.
    HydrateState {
        /// Normalized state from the load path.
        state: DashboardState,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_dashboard`] for the surface
/// runtime to execute.
pub enum RuntimeEffect {
    /// Persist the current state through the bridge.
    PersistState,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions carrying out-of-enumeration tokens.
pub enum DashboardError {
    /// The widget kind token is not in the enumeration.
    #[error("unknown widget type `{0}`")]
    InvalidType(String),
    /// The widget size token is not in the enumeration.
    #[error("unknown widget size `{0}`")]
    InvalidSize(String),
}

/// Applies a [`DashboardAction`] to the dashboard state and collects
/// resulting side effects.
///
/// This function is the authoritative state transition engine. Every settled
/// mutation pushes exactly one [`RuntimeEffect::PersistState`]; no-ops
/// (removing or resizing an absent id, dropping a widget onto itself) leave
/// the state untouched and emit nothing. Hydration replaces the state
/// without emitting a persist effect, so a load can never feed back into a
/// save.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidType`] or
/// [`DashboardError::InvalidSize`] when an action carries a token outside
/// the respective enumeration; the state is unchanged in both cases.
pub fn reduce_dashboard(
    state: &mut DashboardState,
    action: DashboardAction,
) -> Result<Vec<RuntimeEffect>, DashboardError> {
    let mut effects = Vec::new();
    match action {
        DashboardAction::AddWidget { kind } => {
            let kind = WidgetKind::from_token(&kind).ok_or(DashboardError::InvalidType(kind))?;
            let order = state.widgets.len() as u32;
            state.widgets.push(WidgetRecord {
                id: mint_widget_id(),
                kind,
                size: WidgetSize::Medium,
                order,
            });
            effects.push(RuntimeEffect::PersistState);
        }
        DashboardAction::RemoveWidget { id } => {
            let before_len = state.widgets.len();
            state.widgets.retain(|w| w.id != id);
            if state.widgets.len() != before_len {
                // Survivors keep their order values; gaps persist until the
                // next reorder. Notes for the removed id are retained.
                effects.push(RuntimeEffect::PersistState);
            }
        }
        DashboardAction::ResizeWidget { id, size } => {
            let size = WidgetSize::from_token(&size).ok_or(DashboardError::InvalidSize(size))?;
            if let Some(widget) = find_widget_mut(state, &id) {
                widget.size = size;
                effects.push(RuntimeEffect::PersistState);
            }
        }
        DashboardAction::EditNotes { key, text } => {
            state.notes_data.insert(key, truncate_notes(text));
            effects.push(RuntimeEffect::PersistState);
        }
        DashboardAction::ReorderWidget { dragged, target } => {
            if reorder_widgets(state, &dragged, &target) {
                effects.push(RuntimeEffect::PersistState);
            }
        }
        DashboardAction::HydrateState { state: loaded } => {
            *state = loaded;
        }
    }

    Ok(effects)
}

fn mint_widget_id() -> WidgetId {
    WidgetId::new(platform_store::next_monotonic_timestamp_ms().to_string())
}

fn find_widget_mut<'a>(
    state: &'a mut DashboardState,
    id: &WidgetId,
) -> Option<&'a mut WidgetRecord> {
    state.widgets.iter_mut().find(|w| &w.id == id)
}

/// Moves `dragged` immediately before `target` in the display sequence and
/// re-densifies every `order` value. Returns `false` for the dropped-on-self
/// and unknown-id no-op cases.
fn reorder_widgets(state: &mut DashboardState, dragged: &WidgetId, target: &WidgetId) -> bool {
    if dragged == target {
        return false;
    }

    let mut sequence: Vec<WidgetId> = state
        .widgets_in_display_order()
        .into_iter()
        .map(|w| w.id.clone())
        .collect();

    let Some(from) = sequence.iter().position(|id| id == dragged) else {
        return false;
    };
    if !sequence.iter().any(|id| id == target) {
        return false;
    }

    let moved = sequence.remove(from);
    // Target position after the removal shift.
    let Some(to) = sequence.iter().position(|id| id == target) else {
        return false;
    };
    sequence.insert(to, moved);

    for (position, id) in sequence.iter().enumerate() {
        if let Some(widget) = find_widget_mut(state, id) {
            widget.order = position as u32;
        }
    }
    true
}

fn truncate_notes(text: String) -> String {
    match text.char_indices().nth(NOTES_MAX_CHARS) {
        Some((boundary, _)) => text[..boundary].to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn add(state: &mut DashboardState, kind: &str) -> WidgetId {
        let effects = reduce_dashboard(
            state,
            DashboardAction::AddWidget {
                kind: kind.to_string(),
            },
        )
        .expect("add widget");
        assert_eq!(effects, vec![RuntimeEffect::PersistState]);
        state.widgets.last().expect("widget").id.clone()
    }

    fn ids_in_display_order(state: &DashboardState) -> Vec<String> {
        state
            .widgets_in_display_order()
            .iter()
            .map(|w| w.id.to_string())
            .collect()
    }

    #[test]
    fn add_extends_the_dense_permutation_by_one() {
        let mut state = DashboardState::bootstrap();
        add(&mut state, "welcome");
        add(&mut state, "stocks");
        let before: Vec<u32> = state.widgets.iter().map(|w| w.order).collect();

        let id = add(&mut state, "clock");

        let added = state.widget(&id).expect("added widget");
        assert_eq!(added.order, 3);
        assert_eq!(added.size, WidgetSize::Medium);
        let untouched: Vec<u32> = state.widgets[..3].iter().map(|w| w.order).collect();
        assert_eq!(untouched, before);
        assert!(state.order_is_dense());
    }

    #[test]
    fn add_mints_unique_ids() {
        let mut state = DashboardState::bootstrap();
        let first = add(&mut state, "ambient");
        let second = add(&mut state, "ambient");
        assert_ne!(first, second);
    }

    #[test]
    fn add_rejects_unknown_kind_tokens() {
        let mut state = DashboardState::bootstrap();
        let before = state.clone();

        let err = reduce_dashboard(
            &mut state,
            DashboardAction::AddWidget {
                kind: "teleporter".to_string(),
            },
        )
        .expect_err("unknown kind");

        assert_eq!(err, DashboardError::InvalidType("teleporter".to_string()));
        assert_eq!(state, before);
    }

    #[test]
    fn remove_leaves_order_gaps_and_keeps_notes() {
        let mut state = DashboardState::bootstrap();
        let doomed = add(&mut state, "quicknotes");
        add(&mut state, "sports");
        reduce_dashboard(
            &mut state,
            DashboardAction::EditNotes {
                key: doomed.to_string(),
                text: "keep me".to_string(),
            },
        )
        .expect("edit notes");

        let effects = reduce_dashboard(
            &mut state,
            DashboardAction::RemoveWidget { id: doomed.clone() },
        )
        .expect("remove");

        assert_eq!(effects, vec![RuntimeEffect::PersistState]);
        assert!(state.widget(&doomed).is_none());
        let orders: Vec<u32> = state.widgets.iter().map(|w| w.order).collect();
        assert_eq!(orders, vec![0, 2]);
        assert!(!state.order_is_dense());
        assert_eq!(
            state.notes_data.get(doomed.as_str()).map(String::as_str),
            Some("keep me")
        );
    }

    #[test]
    fn remove_of_missing_id_is_a_noop() {
        let mut state = DashboardState::bootstrap();
        let before = state.clone();

        let effects = reduce_dashboard(
            &mut state,
            DashboardAction::RemoveWidget {
                id: WidgetId::new("ghost"),
            },
        )
        .expect("remove missing");

        assert_eq!(effects, Vec::new());
        assert_eq!(state, before);
    }

    #[test]
    fn resize_applies_enumerated_sizes_only() {
        let mut state = DashboardState::bootstrap();
        let id = add(&mut state, "stocks");

        reduce_dashboard(
            &mut state,
            DashboardAction::ResizeWidget {
                id: id.clone(),
                size: "tall".to_string(),
            },
        )
        .expect("resize");
        assert_eq!(state.widget(&id).expect("widget").size, WidgetSize::Tall);

        let before = state.clone();
        let err = reduce_dashboard(
            &mut state,
            DashboardAction::ResizeWidget {
                id: id.clone(),
                size: "gigantic".to_string(),
            },
        )
        .expect_err("unknown size");
        assert_eq!(err, DashboardError::InvalidSize("gigantic".to_string()));
        assert_eq!(state, before);
    }

    #[test]
    fn resize_of_missing_id_is_a_noop() {
        let mut state = DashboardState::bootstrap();
        let before = state.clone();

        let effects = reduce_dashboard(
            &mut state,
            DashboardAction::ResizeWidget {
                id: WidgetId::new("ghost"),
                size: "small".to_string(),
            },
        )
        .expect("resize missing");

        assert_eq!(effects, Vec::new());
        assert_eq!(state, before);
    }

    #[test]
    fn edit_notes_truncates_at_the_character_cap() {
        let mut state = DashboardState::bootstrap();

        let effects = reduce_dashboard(
            &mut state,
            DashboardAction::EditNotes {
                key: "default-notes".to_string(),
                text: "é".repeat(1200),
            },
        )
        .expect("edit notes");

        assert_eq!(effects, vec![RuntimeEffect::PersistState]);
        let stored = state.notes_data.get("default-notes").expect("note");
        assert_eq!(stored.chars().count(), NOTES_MAX_CHARS);
    }

    #[test]
    fn edit_notes_stores_short_text_unchanged() {
        let mut state = DashboardState::bootstrap();
        reduce_dashboard(
            &mut state,
            DashboardAction::EditNotes {
                key: "default-notes".to_string(),
                text: "ship it".to_string(),
            },
        )
        .expect("edit notes");

        assert_eq!(
            state.notes_data.get("default-notes").map(String::as_str),
            Some("ship it")
        );
    }

    #[test]
    fn reorder_moves_dragged_before_target_and_renumbers() {
        let mut state = DashboardState::bootstrap();
        let a = state.widgets[0].id.clone();
        let b = add(&mut state, "welcome");
        let c = add(&mut state, "stocks");

        let effects = reduce_dashboard(
            &mut state,
            DashboardAction::ReorderWidget {
                dragged: c.clone(),
                target: a.clone(),
            },
        )
        .expect("reorder");

        assert_eq!(effects, vec![RuntimeEffect::PersistState]);
        assert_eq!(
            ids_in_display_order(&state),
            vec![c.to_string(), a.to_string(), b.to_string()]
        );
        assert!(state.order_is_dense());
    }

    #[test]
    fn reorder_onto_self_or_unknown_ids_is_a_noop() {
        let mut state = DashboardState::bootstrap();
        let a = state.widgets[0].id.clone();
        add(&mut state, "sports");
        let before = state.clone();

        for (dragged, target) in [
            (a.clone(), a.clone()),
            (WidgetId::new("ghost"), a.clone()),
            (a.clone(), WidgetId::new("ghost")),
        ] {
            let effects =
                reduce_dashboard(&mut state, DashboardAction::ReorderWidget { dragged, target })
                    .expect("reorder noop");
            assert_eq!(effects, Vec::new());
            assert_eq!(state, before);
        }
    }

    #[test]
    fn reorder_restores_density_after_historical_remove_gaps() {
        let mut state = DashboardState::bootstrap();
        let a = state.widgets[0].id.clone();
        let b = add(&mut state, "welcome");
        let c = add(&mut state, "github");
        let d = add(&mut state, "ambient");

        reduce_dashboard(&mut state, DashboardAction::RemoveWidget { id: b })
            .expect("remove");
        assert!(!state.order_is_dense());

        reduce_dashboard(
            &mut state,
            DashboardAction::ReorderWidget {
                dragged: d.clone(),
                target: c.clone(),
            },
        )
        .expect("reorder");

        assert!(state.order_is_dense());
        assert_eq!(
            ids_in_display_order(&state),
            vec![a.to_string(), d.to_string(), c.to_string()]
        );
    }

    #[test]
    fn add_after_remove_uses_the_widget_count_rule() {
        let mut state = DashboardState::bootstrap();
        let b = add(&mut state, "welcome");
        add(&mut state, "github");
        reduce_dashboard(&mut state, DashboardAction::RemoveWidget { id: b })
            .expect("remove");

        let id = add(&mut state, "sports");

        // The new order is the surviving widget count, not max + 1; display
        // order stays deterministic through the sequence-position tiebreak
        // until the next reorder re-densifies.
        assert_eq!(state.widget(&id).expect("widget").order, 2);
        let orders: Vec<u32> = state.widgets.iter().map(|w| w.order).collect();
        assert_eq!(orders, vec![0, 2, 2]);
    }

    #[test]
    fn hydrate_replaces_state_without_a_persist_effect() {
        let mut state = DashboardState::bootstrap();
        let mut loaded = DashboardState::bootstrap();
        loaded
            .notes_data
            .insert("default-notes".to_string(), "from disk".to_string());

        let effects = reduce_dashboard(
            &mut state,
            DashboardAction::HydrateState {
                state: loaded.clone(),
            },
        )
        .expect("hydrate");

        assert_eq!(effects, Vec::new());
        assert_eq!(state, loaded);
    }
}
