pub mod loader;
pub mod templates;

pub use loader::{config_path, load_config};
pub use templates::starter_config;
