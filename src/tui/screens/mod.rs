//! Full-screen views of the navigation stack.

pub mod details;
pub mod home;
