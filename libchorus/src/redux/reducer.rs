//! Reducer composition
//!
//! A reducer is a pure transition function `(Option<State>, &Action) -> State`.
//! `None` means the state tree does not exist yet (initialization).
//!
//! [`merge_reducers`] combines an ordered list of reducers into one. The
//! combined reducer has two different branches:
//!
//! - **Initialization** (`None`): every reducer is called with `None` and
//!   contributes its own slice; the partial states are shallow-merged in
//!   list order onto `State::default()`, later slices winning.
//! - **Steady state** (`Some(state)`): the state is threaded through every
//!   reducer in order (a left fold). Each reducer takes the whole state and
//!   returns the whole state.

use crate::error::Result;

/// Boxed transition function
pub type BoxedReducer<S, A> = Box<dyn Fn(Option<S>, &A) -> Result<S>>;

/// State trees that can be assembled from partial slices
///
/// `merge_from` copies every slice that is present in `other` over the
/// matching slice of `self`. Slices absent from `other` are left alone.
pub trait ShallowMerge: Default {
    fn merge_from(&mut self, other: Self);
}

/// Box a reducer function for use with [`merge_reducers`]
pub fn boxed<S, A, F>(reducer: F) -> BoxedReducer<S, A>
where
    F: Fn(Option<S>, &A) -> Result<S> + 'static,
{
    Box::new(reducer)
}

/// Combine reducers into a single reducer
///
/// With an empty list the initialization branch yields `S::default()` and
/// the steady-state branch is the identity.
///
/// # Errors
///
/// The combined reducer returns the first error raised by any reducer.
pub fn merge_reducers<S, A>(
    reducers: Vec<BoxedReducer<S, A>>,
) -> impl Fn(Option<S>, &A) -> Result<S>
where
    S: ShallowMerge,
{
    move |state: Option<S>, action: &A| match state {
        None => {
            let mut merged = S::default();
            for reducer in &reducers {
                merged.merge_from(reducer(None, action)?);
            }
            Ok(merged)
        }
        Some(state) => {
            let mut next = state;
            for reducer in &reducers {
                next = reducer(Some(next), action)?;
            }
            Ok(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChorusError;

    /// Flat record with three optional slices
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Tree {
        a: Option<i32>,
        b: Option<i32>,
        c: Option<i32>,
    }

    impl ShallowMerge for Tree {
        fn merge_from(&mut self, other: Self) {
            if other.a.is_some() {
                self.a = other.a;
            }
            if other.b.is_some() {
                self.b = other.b;
            }
            if other.c.is_some() {
                self.c = other.c;
            }
        }
    }

    fn slice_a(state: Option<Tree>, step: &i32) -> Result<Tree> {
        match state {
            None => Ok(Tree { a: Some(0), ..Tree::default() }),
            Some(tree) => Ok(Tree { a: tree.a.map(|a| a + step), ..tree }),
        }
    }

    fn slice_b(state: Option<Tree>, step: &i32) -> Result<Tree> {
        match state {
            None => Ok(Tree { b: Some(100), ..Tree::default() }),
            Some(tree) => Ok(Tree { b: tree.b.map(|b| b * step), ..tree }),
        }
    }

    /// Claims slice `a` at init, to check that later reducers win
    fn override_a(state: Option<Tree>, _: &i32) -> Result<Tree> {
        match state {
            None => Ok(Tree { a: Some(7), c: Some(1), ..Tree::default() }),
            Some(tree) => Ok(tree),
        }
    }

    fn failing(_: Option<Tree>, _: &i32) -> Result<Tree> {
        Err(ChorusError::InvalidEvent("rejected".to_string()))
    }

    #[test]
    fn test_init_merges_slices_in_order() {
        let reducer = merge_reducers(vec![boxed(slice_a), boxed(slice_b)]);
        let tree = reducer(None, &1).unwrap();

        assert_eq!(tree, Tree { a: Some(0), b: Some(100), c: None });
    }

    #[test]
    fn test_init_later_reducer_wins_on_conflict() {
        let reducer = merge_reducers(vec![boxed(slice_a), boxed(slice_b), boxed(override_a)]);
        let tree = reducer(None, &1).unwrap();

        assert_eq!(tree, Tree { a: Some(7), b: Some(100), c: Some(1) });
    }

    #[test]
    fn test_steady_state_is_left_fold() {
        let reducer = merge_reducers(vec![boxed(slice_a), boxed(slice_b)]);
        let start = Tree { a: Some(1), b: Some(2), c: Some(3) };

        let expected = slice_b(Some(slice_a(Some(start.clone()), &5).unwrap()), &5).unwrap();
        let tree = reducer(Some(start), &5).unwrap();

        assert_eq!(tree, expected);
        assert_eq!(tree, Tree { a: Some(6), b: Some(10), c: Some(3) });
    }

    #[test]
    fn test_steady_state_output_feeds_next_reducer() {
        // slice_a twice: second call sees the first call's result
        let reducer = merge_reducers(vec![boxed(slice_a), boxed(slice_a)]);
        let tree = reducer(Some(Tree { a: Some(0), ..Tree::default() }), &2).unwrap();

        assert_eq!(tree.a, Some(4));
    }

    #[test]
    fn test_empty_list_init_is_default() {
        let reducer = merge_reducers::<Tree, i32>(Vec::new());
        assert_eq!(reducer(None, &1).unwrap(), Tree::default());
    }

    #[test]
    fn test_empty_list_steady_state_is_identity() {
        let reducer = merge_reducers::<Tree, i32>(Vec::new());
        let start = Tree { a: Some(9), b: None, c: Some(4) };

        assert_eq!(reducer(Some(start.clone()), &1).unwrap(), start);
    }

    #[test]
    fn test_error_aborts_both_branches() {
        let reducer = merge_reducers(vec![boxed(slice_a), boxed(failing), boxed(slice_b)]);

        assert!(matches!(reducer(None, &1), Err(ChorusError::InvalidEvent(_))));
        assert!(matches!(
            reducer(Some(Tree::default()), &1),
            Err(ChorusError::InvalidEvent(_))
        ));
    }

    #[test]
    fn test_closures_are_accepted() {
        let offset = 3;
        let reducer = merge_reducers(vec![boxed(move |state: Option<Tree>, _: &i32| {
            Ok(match state {
                None => Tree { c: Some(offset), ..Tree::default() },
                Some(tree) => tree,
            })
        })]);

        assert_eq!(reducer(None, &0).unwrap().c, Some(3));
    }
}
