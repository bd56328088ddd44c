pub mod detail_chart;
pub mod detail_modal;
pub mod empty_state;
pub mod filter_bar;
pub mod help_bar;
pub mod help_popup;
pub mod popup;
pub mod status_indicator;
pub mod tab_bar;
pub mod tooltip;
