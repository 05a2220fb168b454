pub mod bootstrap;
pub mod config;
pub mod grader_client;
pub mod page;
