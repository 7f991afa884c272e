//! Field selection: which parts of an issue or pull request feed the
//! searchable blob.
//!
//! Precedence: caller-provided list > config-declared list > both fields.

use crate::models::event::EventContext;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bitset over the evaluable fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FieldFlags(u8);

impl FieldFlags {
    pub const NONE: FieldFlags = FieldFlags(0);
    pub const TITLE: FieldFlags = FieldFlags(1);
    pub const BODY: FieldFlags = FieldFlags(1 << 1);
    pub const ALL: FieldFlags = FieldFlags(Self::TITLE.0 | Self::BODY.0);

    /// Build flags from field names. Unknown names are ignored;
    /// `description` is an alias for `body`.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> FieldFlags {
        let mut flags = FieldFlags::NONE;
        for name in names {
            match name.as_ref() {
                "title" => flags |= FieldFlags::TITLE,
                "body" | "description" => flags |= FieldFlags::BODY,
                _ => {}
            }
        }
        flags
    }

    pub fn has(self, flag: FieldFlags) -> bool {
        self.0 & flag.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// An empty selection means every field.
    pub fn or_default(self) -> FieldFlags {
        if self.is_empty() {
            FieldFlags::ALL
        } else {
            self
        }
    }

    /// Apply the caller > config > default precedence.
    pub fn resolve(caller: FieldFlags, config: FieldFlags) -> FieldFlags {
        if !caller.is_empty() {
            caller
        } else {
            config.or_default()
        }
    }

    /// Text fragments for `event`, title first.
    pub fn fragments<'a>(self, event: &'a EventContext) -> Vec<&'a str> {
        let flags = self.or_default();
        let mut out = Vec::with_capacity(2);
        if flags.has(FieldFlags::TITLE) {
            out.push(event.title.as_str());
        }
        if flags.has(FieldFlags::BODY) {
            out.push(event.body.as_str());
        }
        out
    }

    pub fn names(self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.has(FieldFlags::TITLE) {
            out.push("title");
        }
        if self.has(FieldFlags::BODY) {
            out.push("body");
        }
        out
    }
}

impl BitOr for FieldFlags {
    type Output = FieldFlags;

    fn bitor(self, rhs: FieldFlags) -> FieldFlags {
        FieldFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for FieldFlags {
    fn bitor_assign(&mut self, rhs: FieldFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for FieldFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(","))
    }
}
