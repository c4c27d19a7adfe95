//! Redux-style building blocks
//!
//! - [`reducer`]: combine transition functions with [`merge_reducers`]
//! - [`selector`]: memoized derived views
//! - [`store`]: state holder with dispatch and scoped subscriptions
//!
//! None of these know about the friend or timeline features.

pub mod reducer;
pub mod selector;
pub mod store;

pub use reducer::{boxed, merge_reducers, BoxedReducer, ShallowMerge};
pub use selector::{create_selector, ByAddress, CacheSlot, Selector};
pub use store::{Store, Subscription};
