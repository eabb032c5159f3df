//! # rollcall-client
//!
//! Leptos + WASM frontend for the Roll Call classroom attendance application.
//! Replaces the React + Ant Design client with a Rust-native UI layer.
//!
//! This crate contains pages, components, application state, network types,
//! and the camera capture controller used by the attendance check-in flow.
//! All business logic (authentication token issuance, face matching,
//! persistence, report aggregation) lives in the external HTTP backend and
//! identity provider; this crate renders state fetched from those services
//! and submits user input back to them.

pub mod app;
pub mod capture;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;
