mod admission;
mod registration;
mod registry;
mod registry_command;
mod registry_handle;
mod registry_settings;

pub use admission::*;
pub(crate) use registration::*;
pub use registry::*;
pub use registry_command::*;
pub use registry_handle::*;
pub use registry_settings::*;
