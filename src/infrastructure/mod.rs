pub mod seed;
pub mod session;
