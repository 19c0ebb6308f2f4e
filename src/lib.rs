#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod diff;
pub mod matches;
pub mod pattern;
pub mod search;
pub mod span;

pub use diff::{difference, ChangeScript};
pub use matches::{AtomicMatch, PatternMatch};
pub use pattern::{AnyPattern, Pattern, PatternExt, ReversiblePattern};
pub use search::{Search, SearchMut};
pub use span::{Orientation, Span};
