pub mod error;
pub mod report;
pub mod session;
pub mod tone;
