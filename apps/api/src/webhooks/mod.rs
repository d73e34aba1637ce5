pub mod handlers;
pub mod signature;
