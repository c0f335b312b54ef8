pub mod cache;
pub mod email;
pub mod events;
pub mod repositories;
