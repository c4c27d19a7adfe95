//! Friend branch transitions

use std::sync::Arc;

use super::{FriendAction, FriendState};
use crate::error::{ChorusError, Result};
use crate::state::{Action, RootState};

/// Root-level reducer for use with `merge_reducers`
///
/// Contributes `{friend}` at initialization; afterwards takes the whole
/// tree and only rewrites the friend branch.
pub fn reducer(state: Option<RootState>, action: &Action) -> Result<RootState> {
    let Some(mut root) = state else {
        return Ok(RootState {
            friend: Some(FriendState::default()),
            ..RootState::default()
        });
    };

    let Action::Friend(action) = action else {
        return Ok(root);
    };

    let friend = root
        .friend
        .take()
        .ok_or(ChorusError::MissingSubState("friend"))?;
    root.friend = Some(reduce(friend, action)?);
    Ok(root)
}

/// Pure branch transition
pub fn reduce(state: FriendState, action: &FriendAction) -> Result<FriendState> {
    match action {
        FriendAction::AddFriend(friend) => {
            if state.friends.iter().any(|f| f.id == friend.id) {
                return Err(ChorusError::InvalidEvent(format!(
                    "duplicate friend id {}",
                    friend.id
                )));
            }
            let mut friends = Vec::with_capacity(state.friends.len() + 1);
            friends.extend(state.friends.iter().cloned());
            friends.push(friend.clone());

            Ok(FriendState {
                friends: Arc::new(friends),
                ..state
            })
        }

        FriendAction::SetShowLimit(limit) => {
            if *limit == 0 {
                return Err(ChorusError::InvalidEvent(
                    "show limit must be at least 1".to_string(),
                ));
            }
            Ok(FriendState {
                show_limit: *limit,
                ..state
            })
        }
    }
}
