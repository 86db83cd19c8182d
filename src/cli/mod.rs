mod binder;
mod help;

pub use binder::HELP_FLAG;
pub(crate) use binder::{FlagRegistry, bind_args};
pub(crate) use help::render_help;
pub use help::program_name;
