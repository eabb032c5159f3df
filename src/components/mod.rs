//! Shared UI components used across pages.

pub mod layout;
pub mod modal;
pub mod stat_card;
pub mod toast;
