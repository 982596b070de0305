#![allow(
    clippy::collapsible_if,
    clippy::derivable_impls,
    clippy::too_many_arguments,
    clippy::type_complexity
)]

pub mod app;
pub mod character;
pub mod grid_overlay;
pub mod input;
pub mod settings;
pub mod ui;
pub mod world;
