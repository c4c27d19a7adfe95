//! Timeline branch transitions

use std::sync::Arc;

use super::{TimelineAction, TimelineEntry, TimelineState};
use crate::error::{ChorusError, Result};
use crate::state::{Action, RootState};

/// Root-level reducer for use with `merge_reducers`
pub fn reducer(state: Option<RootState>, action: &Action) -> Result<RootState> {
    let Some(mut root) = state else {
        return Ok(RootState {
            timeline: Some(TimelineState::default()),
            ..RootState::default()
        });
    };

    let Action::Timeline(action) = action else {
        return Ok(root);
    };

    let timeline = root
        .timeline
        .take()
        .ok_or(ChorusError::MissingSubState("timeline"))?;
    root.timeline = Some(reduce(timeline, action)?);
    Ok(root)
}

fn unknown_id(id: u64) -> ChorusError {
    ChorusError::InvalidEvent(format!("unknown timeline id {}", id))
}

/// Pure branch transition
pub fn reduce(state: TimelineState, action: &TimelineAction) -> Result<TimelineState> {
    match action {
        TimelineAction::AddTimeline(entry) => {
            if state.timelines.iter().any(|t| t.id == entry.id) {
                return Err(ChorusError::InvalidEvent(format!(
                    "duplicate timeline id {}",
                    entry.id
                )));
            }
            let mut timelines = Vec::with_capacity(state.timelines.len() + 1);
            timelines.extend(state.timelines.iter().cloned());
            timelines.push(entry.clone());

            Ok(TimelineState {
                timelines: Arc::new(timelines),
                ..state
            })
        }

        TimelineAction::RequestLike { id } => {
            if !state.timelines.iter().any(|t| t.id == *id) {
                return Err(unknown_id(*id));
            }
            Ok(state)
        }

        TimelineAction::AddLike { id, value } => {
            let position = state
                .timelines
                .iter()
                .position(|t| t.id == *id)
                .ok_or_else(|| unknown_id(*id))?;
            let like_count = state.timelines[position]
                .like_count
                .checked_add(*value)
                .ok_or_else(|| {
                    ChorusError::InvalidEvent(format!("like count overflow for timeline {}", id))
                })?;

            let timelines: Vec<TimelineEntry> = state
                .timelines
                .iter()
                .enumerate()
                .map(|(index, entry)| {
                    if index == position {
                        TimelineEntry {
                            like_count,
                            ..entry.clone()
                        }
                    } else {
                        entry.clone()
                    }
                })
                .collect();

            Ok(TimelineState {
                timelines: Arc::new(timelines),
                ..state
            })
        }

        TimelineAction::SetLoading(is_loading) => Ok(TimelineState {
            is_loading: *is_loading,
            ..state
        }),

        TimelineAction::SetError(error) => Ok(TimelineState {
            error: error.clone(),
            ..state
        }),

        TimelineAction::TrySetText(_) => Ok(state),

        TimelineAction::SetText(text) => Ok(TimelineState {
            text: text.clone(),
            ..state
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::friend::FriendAction;

    fn entry(id: u64) -> TimelineEntry {
        TimelineEntry {
            id,
            desc: format!("timeline{}", id),
            like_count: 0,
        }
    }

    fn with_entries(ids: &[u64]) -> TimelineState {
        ids.iter().fold(TimelineState::default(), |state, id| {
            reduce(state, &TimelineAction::AddTimeline(entry(*id))).unwrap()
        })
    }

    #[test]
    fn test_init_contributes_timeline_branch_only() {
        let root = reducer(None, &Action::init()).unwrap();
        assert_eq!(root.timeline, Some(TimelineState::default()));
        assert!(root.friend.is_none());
    }

    #[test]
    fn test_add_timeline_appends() {
        let state = with_entries(&[1, 2, 3]);
        let ids: Vec<u64> = state.timelines.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_timeline_rejected() {
        let state = with_entries(&[1]);
        assert!(reduce(state, &TimelineAction::AddTimeline(entry(1))).is_err());
    }

    #[test]
    fn test_add_like_changes_only_target() {
        let state = with_entries(&[1, 2]);
        let state = reduce(state, &TimelineAction::AddLike { id: 2, value: 1 }).unwrap();
        let state = reduce(state, &TimelineAction::AddLike { id: 2, value: 1 }).unwrap();

        assert_eq!(state.timelines[0].like_count, 0);
        assert_eq!(state.timelines[1].like_count, 2);
    }

    #[test]
    fn test_add_like_negative_rolls_back() {
        let state = with_entries(&[1]);
        let state = reduce(state, &TimelineAction::AddLike { id: 1, value: 1 }).unwrap();
        let state = reduce(state, &TimelineAction::AddLike { id: 1, value: -1 }).unwrap();

        assert_eq!(state.timelines[0].like_count, 0);
    }

    #[test]
    fn test_add_like_unknown_id() {
        let err = reduce(with_entries(&[1]), &TimelineAction::AddLike { id: 9, value: 1 })
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid event: unknown timeline id 9");
    }

    #[test]
    fn test_add_like_overflow_rejected() {
        let state = reduce(with_entries(&[1]), &TimelineAction::AddLike { id: 1, value: 1 }).unwrap();

        let err = reduce(
            state,
            &TimelineAction::AddLike {
                id: 1,
                value: i64::MAX,
            },
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid event: like count overflow for timeline 1"
        );
    }

    #[test]
    fn test_request_like_is_validated_but_inert() {
        let state = with_entries(&[1]);
        let same = reduce(state.clone(), &TimelineAction::RequestLike { id: 1 }).unwrap();
        assert_eq!(same, state);

        assert!(reduce(state, &TimelineAction::RequestLike { id: 2 }).is_err());
    }

    #[test]
    fn test_loading_error_and_text() {
        let state = TimelineState::default();
        let state = reduce(state, &TimelineAction::SetLoading(true)).unwrap();
        let state = reduce(state, &TimelineAction::SetError(Some("boom".to_string()))).unwrap();
        let state = reduce(state, &TimelineAction::TrySetText("draft".to_string())).unwrap();
        assert_eq!(state.text, "");

        let state = reduce(state, &TimelineAction::SetText("hello".to_string())).unwrap();

        assert!(state.is_loading);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(state.text, "hello");
    }

    #[test]
    fn test_friend_actions_pass_through() {
        let root = reducer(None, &Action::init()).unwrap();
        let action = Action::Friend(FriendAction::SetShowLimit(3));
        let next = reducer(Some(root.clone()), &action).unwrap();
        assert_eq!(next, root);
    }

    #[test]
    fn test_missing_branch_in_steady_state() {
        let action = Action::Timeline(TimelineAction::SetText("x".to_string()));
        let err = reducer(Some(RootState::default()), &action).unwrap_err();
        assert!(matches!(err, ChorusError::MissingSubState("timeline")));
    }
}
