//! Shared argument types used across multiple commands.

use clap::ValueEnum;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum TableFormat {
    #[default]
    Text,
    Json,
}
