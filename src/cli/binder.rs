use std::collections::BTreeMap;

use crate::config::assign::Slot;

pub const HELP_FLAG: &str = "--help";
const FLAG_PREFIX: &str = "--";

struct BoundSlot<'a> {
    slot: &'a mut dyn Slot,
    help: Option<String>,
}

/// Flags bound during a walk, keyed by their `--long-name`. Iterates in sorted order.
#[derive(Default)]
pub(crate) struct FlagRegistry<'a> {
    flags: BTreeMap<String, BoundSlot<'a>>,
}

pub(crate) struct FlagEntry<'r> {
    pub flag: &'r str,
    pub switch: bool,
    pub help: Option<&'r str>,
}

impl<'a> FlagRegistry<'a> {
    /// Binds `flag` to `slot`. Returns `true` when the flag was already bound; the
    /// newer slot replaces the older one.
    pub(crate) fn bind(&mut self, flag: String, slot: &'a mut dyn Slot, help: Option<String>) -> bool {
        self.flags
            .insert(flag, BoundSlot { slot, help })
            .is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.flags.len()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = FlagEntry<'_>> {
        self.flags.iter().map(|(flag, bound)| FlagEntry {
            flag: flag.as_str(),
            switch: bound.slot.is_switch(),
            help: bound.help.as_deref(),
        })
    }
}

/// Applies command-line overrides to the bound slots and reports whether
/// `--help` was seen.
///
/// Tokens are matched whole. Switch flags (`bool` slots) take no argument and
/// set `true`. Every other flag consumes the next token as JSON text. Unknown
/// flags, values that do not decode and a trailing flag with no value are all
/// skipped.
pub(crate) fn bind_args(registry: &mut FlagRegistry<'_>, args: &[String]) -> bool {
    let mut help_requested = false;
    let mut tokens = args.iter();

    while let Some(token) = tokens.next() {
        if !token.starts_with(FLAG_PREFIX) {
            continue;
        }
        if token == HELP_FLAG {
            help_requested = true;
            continue;
        }

        let flag = token.as_str();
        let Some(bound) = registry.flags.get_mut(flag) else {
            tracing::trace!(flag, "ignoring unknown flag");
            continue;
        };

        if bound.slot.is_switch() {
            bound.slot.switch_on();
            tracing::debug!(flag, "applied switch from command line");
            continue;
        }

        let Some(value) = tokens.next() else {
            tracing::trace!(flag, "flag has no value");
            continue;
        };
        if bound.slot.assign_text(value) {
            tracing::debug!(flag, "applied value from command line");
        }
    }

    help_requested
}
