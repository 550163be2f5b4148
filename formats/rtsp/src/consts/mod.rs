pub mod common;
pub mod methods;
pub mod status;
pub mod version;
