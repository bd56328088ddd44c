pub mod dashboard_screen;
pub mod logs_screen;
pub mod summary_screen;
