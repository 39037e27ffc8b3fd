//! Reusable widgets shared by the screens.

pub mod status_bar;
pub mod tile;
