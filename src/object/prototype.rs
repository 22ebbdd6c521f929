//! The ambient template shared by every generic object.

use std::fmt;

/// Property names reachable on every generic object, whatever its data.
pub const OBJECT_PROTOTYPE: &[&str] = &[
    "__proto__",
    "constructor",
    "hasOwnProperty",
    "isPrototypeOf",
    "propertyIsEnumerable",
    "toLocaleString",
    "toString",
    "valueOf",
    "__defineGetter__",
    "__defineSetter__",
    "__lookupGetter__",
    "__lookupSetter__",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbientKind {
    /// The prototype link itself.
    Prototype,
    /// The object constructor.
    Constructor,
    /// A built-in method.
    Method,
}

/// A structural placeholder found through the template, never payload data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmbientProperty {
    name: &'static str,
    kind: AmbientKind,
}

impl AmbientProperty {
    /// Resolve `name` against the template.
    pub fn lookup(name: &str) -> Option<Self> {
        let name = *OBJECT_PROTOTYPE.iter().find(|candidate| **candidate == name)?;
        let kind = match name {
            "__proto__" => AmbientKind::Prototype,
            "constructor" => AmbientKind::Constructor,
            _ => AmbientKind::Method,
        };
        Some(Self { name, kind })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> AmbientKind {
        self.kind
    }
}

impl fmt::Display for AmbientProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AmbientKind::Prototype => f.write_str("[Object: null prototype] {}"),
            AmbientKind::Constructor => f.write_str("[Function: Object]"),
            AmbientKind::Method => write!(f, "[Function: {}]", self.name),
        }
    }
}
