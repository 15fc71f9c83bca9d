//! CLI configuration

pub mod loader;

pub use loader::{CliConfigLoader, RawConfig, ResolvedConfig, TemplateSource};
