pub mod model_info;
pub mod plane_panel;
pub mod status_bar;
pub mod toolbar;
