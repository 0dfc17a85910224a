//! Tests for the app module.
//!
//! This module is organized into submodules by functionality:
//! - `auth` - Sign-in / sign-out gating
//! - `dispatch` - Send path and fan-out batch merging
//! - `helpers` - Shared test utilities
//! - `input` - Composer key bindings and paste handling
//! - `settings` - Settings panel and persistence
//! - `threads` - Thread intents (create, delete, select, split off)
//! - `ui` - Rendering smoke tests

#[allow(clippy::unwrap_used, clippy::expect_used)]
mod auth;
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod threads;
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod ui;
