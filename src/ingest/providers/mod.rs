pub mod edgar;
pub mod fixture;
