//! Quota draws from registration rosters.
//!
//! Registrants who won in the previous round are only drawn once everyone
//! else has been, pinned names always win, and a draw can be repeated
//! independently for each group (class, session, ...) in the roster.

pub mod config;
pub mod draw;
pub mod formats;
pub mod metrics;
pub mod model;
pub mod reports;
pub mod util;
