pub mod models;
pub mod policy;

pub use models::SessionClaims;
