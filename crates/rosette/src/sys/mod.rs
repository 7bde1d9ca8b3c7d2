pub mod exec;
pub mod hold;
pub mod runtime;
pub mod server;
