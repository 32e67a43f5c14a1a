//! User interface: layout, components, theming and the event loop.

pub mod components;
pub mod layout;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
