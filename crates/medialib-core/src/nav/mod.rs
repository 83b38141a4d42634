//! Navigation logic for the media library.
//!
//! This module contains the breadcrumb [`path::NavPath`], back/forward
//! [`history::History`], the click-driven [`selection::Selection`] engine,
//! and item [`filter`]ing/sorting (including fuzzy search).

pub mod filter;
pub mod history;
pub mod path;
pub mod selection;
