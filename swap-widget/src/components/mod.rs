//! Widget chrome components

pub mod dialogs;
pub mod fault;
pub mod swap_panel;

pub use dialogs::DialogLayer;
pub use fault::FaultFallback;
pub use swap_panel::SwapPanel;
