//! Intents to store actions
//!
//! Runs after the UI reducer, so `EditText` sees the updated draft. Mock
//! records are generated here, outside every reducer.

use libchorus::friend::FriendAction;
use libchorus::mock::MockData;
use libchorus::timeline::TimelineAction;
use libchorus::{Action as StoreAction, Result, RootState};

use super::actions::Intent;
use super::state::AppState;

/// Store action for an intent, `None` when there is nothing to do
///
/// # Errors
///
/// Returns `MissingSubState` if a branch the intent reads is absent.
pub fn store_action(
    intent: &Intent,
    app: &AppState,
    root: &RootState,
    mock: &mut MockData,
) -> Result<Option<StoreAction>> {
    let action: Option<StoreAction> = match intent {
        Intent::AddFriend => Some(FriendAction::AddFriend(mock.next_friend()).into()),
        Intent::ChangeShowLimit(step) => {
            let current = root.friend()?.show_limit;
            let next = current
                .saturating_add_signed(*step as isize)
                .clamp(1, app.friends.max_show_limit.max(1));
            (next != current).then(|| FriendAction::SetShowLimit(next).into())
        }
        Intent::AddTimeline => Some(TimelineAction::AddTimeline(mock.next_timeline()).into()),
        Intent::LikeSelected => root
            .timeline()?
            .timelines
            .get(app.timeline.selected)
            .map(|entry| TimelineAction::RequestLike { id: entry.id }.into()),
        Intent::EditText(_) => Some(TimelineAction::TrySetText(app.timeline.draft.clone()).into()),
    };
    Ok(action)
}
