pub mod cli;
pub mod dev_backend;
pub mod dom;
