pub mod header;
pub mod input_panel;
pub mod loading_indicator;
pub mod node_view;
pub mod notice_bar;
pub mod question_panel;
pub mod results;
