//! Page components, one per route.

pub mod attendance;
pub mod classes;
pub mod dashboard;
pub mod login;
pub mod profile;
pub mod register;
pub mod reports;
pub mod students;
