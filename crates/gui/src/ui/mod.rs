pub mod display_panel;
pub mod status_bar;
