use serde::de::DeserializeOwned;
use serde_json::Value;

use super::assign::{assign_text, assign_value};
use super::env::Env;
use super::naming::{derive_key, env_var_name, flag_name, is_usable_flag};
use crate::cli::FlagRegistry;
use crate::error::{AppError, ErrorKind};

/// A record whose fields can be populated by [`crate::load`].
///
/// Implementations hand every field to the walker in declaration order: leaves
/// through [`Walker::field`] or [`Walker::field_with_help`], nested records
/// through [`Walker::nested`].
///
/// ```
/// use layerconf::{Configurable, Walker};
///
/// #[derive(Default)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl Configurable for Server {
///     fn visit<'a>(&'a mut self, walker: &mut Walker<'a, '_>) {
///         walker.field("host", &mut self.host);
///         walker.field_with_help("port", "Port to listen on", &mut self.port);
///     }
/// }
/// ```
pub trait Configurable {
    fn visit<'a>(&'a mut self, walker: &mut Walker<'a, '_>);
}

impl<C: Configurable + Default> Configurable for Option<C> {
    fn visit<'a>(&'a mut self, walker: &mut Walker<'a, '_>) {
        self.get_or_insert_with(C::default).visit(walker);
    }
}

impl<C: Configurable + ?Sized> Configurable for Box<C> {
    fn visit<'a>(&'a mut self, walker: &mut Walker<'a, '_>) {
        (**self).visit(walker);
    }
}

/// Walks a record, applying file and environment values to each leaf and
/// binding it to its command-line flag.
pub struct Walker<'a, 'src> {
    node: Option<&'src Value>,
    env: &'src Env,
    path: Vec<String>,
    registry: FlagRegistry<'a>,
    duplicates: Vec<String>,
    unusable: Vec<String>,
}

impl<'a, 'src> Walker<'a, 'src> {
    pub(crate) fn new(tree: &'src Value, env: &'src Env) -> Self {
        Self {
            node: Some(tree),
            env,
            path: Vec::new(),
            registry: FlagRegistry::default(),
            duplicates: Vec::new(),
            unusable: Vec::new(),
        }
    }

    pub fn field<T>(&mut self, name: &str, slot: &'a mut T)
    where
        T: DeserializeOwned + 'static,
    {
        self.leaf(name, None, slot);
    }

    /// Same as [`Walker::field`], with a description shown in `--help`.
    pub fn field_with_help<T>(&mut self, name: &str, help: impl Into<String>, slot: &'a mut T)
    where
        T: DeserializeOwned + 'static,
    {
        self.leaf(name, Some(help.into()), slot);
    }

    pub fn nested<C: Configurable + ?Sized>(&mut self, name: &str, slot: &'a mut C) {
        let segment = derive_key(name);
        let child = self.child(&segment);
        let parent = std::mem::replace(&mut self.node, child);
        self.path.push(segment);
        slot.visit(self);
        self.path.pop();
        self.node = parent;
    }

    /// Hands back the flag registry, or a config error when two fields share a
    /// key or a field name cannot form a flag.
    pub(crate) fn finish(self) -> Result<FlagRegistry<'a>, AppError> {
        let mut problems = Vec::new();
        if !self.duplicates.is_empty() {
            problems.push(format!(
                "Fields share a configuration key: {}",
                self.duplicates.join(", ")
            ));
        }
        if !self.unusable.is_empty() {
            problems.push(format!(
                "Field names do not form a usable flag: {}",
                self.unusable.join(", ")
            ));
        }
        if problems.is_empty() {
            Ok(self.registry)
        } else {
            Err(AppError::new(ErrorKind::Config, problems.join("; ")))
        }
    }

    fn leaf<T>(&mut self, name: &str, help: Option<String>, slot: &'a mut T)
    where
        T: DeserializeOwned + 'static,
    {
        let segment = derive_key(name);
        let file_value = self.child(&segment);
        self.path.push(segment);

        if let Some(value) = file_value {
            if assign_value(slot, value) {
                tracing::debug!(field = %self.path.join("."), "applied value from config file");
            }
        }

        let var = env_var_name(&self.path);
        if let Some(text) = self.env.get_non_empty(&var) {
            if assign_text(slot, text) {
                tracing::debug!(field = %self.path.join("."), var = %var, "applied value from environment");
            }
        }

        let flag = flag_name(&self.path);
        if !is_usable_flag(&flag) {
            tracing::warn!(flag = %flag, field = %self.path.join("."), "field name does not form a usable flag");
            self.unusable.push(flag);
        } else if self.registry.bind(flag.clone(), slot, help) {
            tracing::warn!(flag = %flag, "flag bound by more than one field");
            self.duplicates.push(flag);
        }
        self.path.pop();
    }

    fn child(&self, segment: &str) -> Option<&'src Value> {
        self.node
            .and_then(Value::as_object)
            .and_then(|map| map.get(segment))
    }
}
