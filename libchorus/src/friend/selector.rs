//! Friend selectors
//!
//! `get_*` functions are plain projections. The `make_*` factories build a
//! fresh memoized selector per call; give each mounted view its own.

use std::sync::Arc;

use super::Friend;
use crate::error::{ChorusError, Result};
use crate::redux::{create_selector, ByAddress, Selector};
use crate::state::RootState;

/// Call-site parameters of a friend view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriendProps {
    pub age_limit: u32,
}

/// Memoized friend view keyed on the friends collection and one more input
pub type FriendsView<K> = Selector<RootState, FriendProps, (ByAddress<Vec<Friend>>, K), Vec<Friend>>;

pub fn get_friends(state: &RootState) -> Result<Arc<Vec<Friend>>> {
    state
        .friend
        .as_ref()
        .map(|friend| Arc::clone(&friend.friends))
        .ok_or(ChorusError::MissingSubState("friend"))
}

pub fn get_age_limit(_state: &RootState, props: &FriendProps) -> u32 {
    props.age_limit
}

pub fn get_show_limit(state: &RootState) -> Result<usize> {
    state
        .friend
        .as_ref()
        .map(|friend| friend.show_limit)
        .ok_or(ChorusError::MissingSubState("friend"))
}

/// Friends whose age is at most `props.age_limit`, in insertion order
pub fn make_get_friends_with_age_limit() -> FriendsView<u32> {
    create_selector(
        |state: &RootState, props: &FriendProps| {
            Ok((ByAddress(get_friends(state)?), get_age_limit(state, props)))
        },
        |(friends, age_limit): &(ByAddress<Vec<Friend>>, u32)| {
            friends
                .iter()
                .filter(|friend| friend.age <= *age_limit)
                .cloned()
                .collect()
        },
    )
}

/// The age-limited view truncated to the branch's show limit
///
/// Keyed on the inner selector's output, so it only recomputes when the
/// age-limited list or the show limit changes.
pub fn make_get_friends_with_age_show_limit() -> FriendsView<usize> {
    let mut with_age_limit = make_get_friends_with_age_limit();
    create_selector(
        move |state: &RootState, props: &FriendProps| {
            let friends = with_age_limit.select(state, props)?;
            Ok((ByAddress(friends), get_show_limit(state)?))
        },
        |(friends, show_limit): &(ByAddress<Vec<Friend>>, usize)| {
            friends.iter().take(*show_limit).cloned().collect()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::friend::{FriendAction, FriendState};
    use crate::state::{root_reducer, Action};

    fn friend(id: u64, age: u32) -> Friend {
        Friend {
            id,
            name: format!("friend{}", id),
            age,
        }
    }

    fn state_with(friends: Vec<Friend>) -> RootState {
        RootState {
            friend: Some(FriendState {
                friends: Arc::new(friends),
                show_limit: 8,
            }),
            timeline: None,
        }
    }

    #[test]
    fn test_filters_by_age_limit_and_reuses_result() {
        let state = state_with(vec![friend(1, 10), friend(2, 25), friend(3, 40)]);
        let mut selector = make_get_friends_with_age_limit();
        let props = FriendProps { age_limit: 25 };

        let first = selector.select(&state, &props).unwrap();
        let second = selector.select(&state, &props).unwrap();

        assert_eq!(*first, vec![friend(1, 10), friend(2, 25)]);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(selector.recomputations(), 1);
    }

    #[test]
    fn test_unrelated_dispatch_keeps_cached_view() {
        let reducer = root_reducer();
        let state = reducer(None, &Action::init()).unwrap();
        let state = reducer(
            Some(state),
            &Action::Friend(FriendAction::AddFriend(friend(1, 20))),
        )
        .unwrap();
        let mut selector = make_get_friends_with_age_limit();
        let props = FriendProps { age_limit: 30 };
        let before = selector.select(&state, &props).unwrap();

        let state = reducer(Some(state), &Action::Friend(FriendAction::SetShowLimit(2))).unwrap();
        let after = selector.select(&state, &props).unwrap();

        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(selector.recomputations(), 1);
    }

    #[test]
    fn test_new_friend_invalidates_view() {
        let reducer = root_reducer();
        let state = reducer(None, &Action::init()).unwrap();
        let mut selector = make_get_friends_with_age_limit();
        let props = FriendProps { age_limit: 30 };
        assert!(selector.select(&state, &props).unwrap().is_empty());

        let state = reducer(
            Some(state),
            &Action::Friend(FriendAction::AddFriend(friend(1, 20))),
        )
        .unwrap();

        assert_eq!(selector.select(&state, &props).unwrap().len(), 1);
        assert_eq!(selector.recomputations(), 2);
    }

    #[test]
    fn test_show_limit_view_truncates() {
        let mut state = state_with((1..=5).map(|id| friend(id, 20)).collect());
        if let Some(branch) = state.friend.as_mut() {
            branch.show_limit = 2;
        }
        let mut selector = make_get_friends_with_age_show_limit();

        let view = selector.select(&state, &FriendProps { age_limit: 45 }).unwrap();

        assert_eq!(view.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_show_limit_view_reuses_result() {
        let state = state_with(vec![friend(1, 20), friend(2, 50)]);
        let mut selector = make_get_friends_with_age_show_limit();
        let props = FriendProps { age_limit: 45 };

        let first = selector.select(&state, &props).unwrap();
        let second = selector.select(&state, &props).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(selector.recomputations(), 1);
    }

    #[test]
    fn test_missing_branch() {
        let mut selector = make_get_friends_with_age_limit();
        let err = selector
            .select(&RootState::default(), &FriendProps { age_limit: 1 })
            .unwrap_err();

        assert!(matches!(err, ChorusError::MissingSubState("friend")));
    }
}
