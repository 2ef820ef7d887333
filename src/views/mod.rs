pub mod browser;
pub mod confirm_exit;
pub mod setup;
