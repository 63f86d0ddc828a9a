//! Fabric CLI collaboration: running `fab` and copying items with it

pub mod copier;
pub mod runner;

pub use copier::{ItemCopier, ItemType, item_path};
pub use runner::{CommandOutput, CommandRunner, FabCli, display_command};
