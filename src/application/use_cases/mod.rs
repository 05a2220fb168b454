pub mod badge;
pub mod overlay;
pub mod panel;
