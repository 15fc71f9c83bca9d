//! CLI command implementations

pub mod open;
pub mod routes;
pub mod seed;
pub mod shell;

pub use open::open_command;
pub use routes::routes_command;
pub use seed::seed_command;
pub use shell::shell_command;
