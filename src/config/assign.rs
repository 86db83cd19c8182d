use std::any::Any;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Best-effort assignment of a decoded JSON value. The slot is only written
/// when the whole value converts to `T`. A `null` is treated as no value.
pub fn assign_value<T: DeserializeOwned>(slot: &mut T, value: &Value) -> bool {
    if value.is_null() {
        return false;
    }
    match T::deserialize(value) {
        Ok(decoded) => {
            *slot = decoded;
            true
        }
        Err(err) => {
            tracing::trace!(error = %err, "value does not fit slot");
            false
        }
    }
}

/// Best-effort assignment of raw text from the environment or command line.
/// The text must be JSON for `T`: strings need their quotes.
pub fn assign_text<T: DeserializeOwned>(slot: &mut T, text: &str) -> bool {
    match serde_json::from_str::<T>(text) {
        Ok(decoded) => {
            *slot = decoded;
            true
        }
        Err(err) => {
            tracing::trace!(error = %err, text, "text does not fit slot");
            false
        }
    }
}

/// Type-erased view of a leaf field so slots of different types can share one
/// flag registry.
pub(crate) trait Slot {
    fn assign_value(&mut self, value: &Value) -> bool;
    fn assign_text(&mut self, text: &str) -> bool;
    /// `bool` and `Option<bool>` leaves take no argument on the command line.
    fn is_switch(&self) -> bool;
    fn switch_on(&mut self) -> bool;
}

impl<T: DeserializeOwned + 'static> Slot for T {
    fn assign_value(&mut self, value: &Value) -> bool {
        assign_value(self, value)
    }

    fn assign_text(&mut self, text: &str) -> bool {
        assign_text(self, text)
    }

    fn is_switch(&self) -> bool {
        let any = self as &dyn Any;
        any.is::<bool>() || any.is::<Option<bool>>()
    }

    fn switch_on(&mut self) -> bool {
        let any = self as &mut dyn Any;
        if let Some(flag) = any.downcast_mut::<bool>() {
            *flag = true;
            return true;
        }
        if let Some(flag) = any.downcast_mut::<Option<bool>>() {
            *flag = Some(true);
            return true;
        }
        false
    }
}
