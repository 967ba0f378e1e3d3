pub mod commands;

pub use commands::CommandHandlers;
