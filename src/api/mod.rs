pub mod account;
pub mod hod;
pub mod leave;
