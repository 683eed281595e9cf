use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::netlist::Value;

/// A simulator control statement
///
/// A directive without arguments is raw: its command is written verbatim.
///
/// ```
/// # use crossnet::netlist::Directive;
/// let global = Directive::new("global").flag("0").flag("gnd!");
/// assert!(!global.is_raw());
/// let raw = Directive::new("global 0 gnd!");
/// assert!(raw.is_raw());
/// assert_ne!(global, raw);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Directive {
    /// Command executed by the directive
    pub command: String,
    /// Arguments, in order; a `None` value is a flag written without `=`
    #[serde(default)]
    pub args: IndexMap<String, Option<Value>>,
}

impl Directive {
    /// Create a directive with no arguments
    pub fn new(command: impl Into<String>) -> Self {
        Directive {
            command: command.into(),
            args: IndexMap::new(),
        }
    }

    /// Create a directive from a mapping of arguments
    pub fn with_args(command: impl Into<String>, args: IndexMap<String, Option<Value>>) -> Self {
        Directive {
            command: command.into(),
            args,
        }
    }

    /// Add a `name=value` argument
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(name.into(), Some(value.into()));
        self
    }

    /// Add an argument written without value
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.args.insert(name.into(), None);
        self
    }

    /// Returns true if the directive has no arguments
    pub fn is_raw(&self) -> bool {
        self.args.is_empty()
    }
}

impl PartialEq for Directive {
    /// Raw directives compare by command; others by command and arguments.
    /// A raw directive never equals a directive with arguments.
    fn eq(&self, other: &Self) -> bool {
        match (self.is_raw(), other.is_raw()) {
            (true, true) => self.command == other.command,
            (false, false) => self.command == other.command && self.args == other.args,
            _ => false,
        }
    }
}
