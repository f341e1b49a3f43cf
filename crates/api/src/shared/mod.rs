pub mod session;
pub mod usecase;
