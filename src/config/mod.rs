pub(crate) mod assign;
mod env;
mod loader;
mod naming;
mod sources;
mod walker;

pub use assign::{assign_text, assign_value};
pub use env::Env;
pub use loader::{LoadOptions, load};
pub use naming::{derive_key, env_var_name, flag_name, is_usable_flag};
pub use sources::load_tree;
pub use walker::{Configurable, Walker};
