//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `wizard`, `toast`) so individual
//! components can depend on small focused models. Each module is plain data
//! with synchronous transition methods; pages hold them in `RwSignal`
//! contexts. Keeping the transitions free of browser types lets them run
//! under native `cargo test`.

pub mod auth;
pub mod toast;
pub mod wizard;
