pub mod idle;
pub mod scheduler;
pub mod session;
pub mod state;
