pub mod build;
pub mod configure;
pub mod deps;
pub mod init;
pub mod kind;
pub mod roots;

pub use build::build_command;
pub use configure::configure_command;
pub use deps::deps_command;
pub use init::init_command;
pub use kind::kind_command;
pub use roots::roots_command;
