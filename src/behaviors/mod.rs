//! DOM-free state machines and predicates behind the page behaviors.
//!
//! `Page` owns one instance of each state struct and applies the results to
//! the DOM; everything here can be exercised directly.

pub mod counter;
pub mod form;
pub mod nav;
pub mod reveal;
pub mod scroll;
pub mod slider;
pub mod strip_loop;
pub mod tooltip;
