pub mod actions;
pub mod session;

pub use session::Session;
