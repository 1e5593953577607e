mod commands;

pub use self::commands::{Cli, Commands};
