mod popover_component;
mod state;

pub use popover_component::PopoverComponent;
pub use state::PopoverState;
