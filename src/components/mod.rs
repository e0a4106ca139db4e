pub mod job_form;
pub mod map_view;
pub mod result_panel;
