pub mod app;
pub mod camera_controls;
pub mod controls_panel;
pub mod export_panel;
pub mod pixel_view;
pub mod settings_modal;
pub mod stats_panel;
