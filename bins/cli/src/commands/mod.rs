//! CLI command handlers.

pub mod check;
pub mod normalize;
pub mod settings;

pub use check::run_check;
pub use normalize::run_normalize;
pub use settings::run_settings;
