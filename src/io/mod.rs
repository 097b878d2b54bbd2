/// Named defaults and argument string parsing
pub mod configuration;
/// Error type shared by all components
pub mod error;
