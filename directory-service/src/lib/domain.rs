pub mod access;
pub mod contact;
pub mod user;
