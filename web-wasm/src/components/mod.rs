pub mod header;
pub mod settings_panel;
pub mod controls;
pub mod preview_area;
pub mod gallery;
