use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::netlist::{Node, Value};

/// A concrete placed device, with its terminal connections and parameter values
///
/// In Spectre, an instance is written as
/// ```text
///     M1 (GND VDD) NMOS vth=1.0
/// ```
/// The `uid` and `context` are set by the container the instance is added to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Name of the device or subcircuit being placed
    pub name: String,
    /// Connection of each terminal
    pub nodes: IndexMap<String, Node>,
    /// Parameter values
    #[serde(default)]
    pub params: IndexMap<String, Value>,
    /// Index of the instance among the instances of the same name in its container
    #[serde(default)]
    pub uid: Option<u32>,
    /// Name of the container owning the instance
    #[serde(default)]
    pub context: Option<String>,
    /// Single-letter device kind used as prefix in the netlist
    #[serde(default)]
    pub tag: Option<char>,
}

impl Instance {
    /// Create an instance with no connection
    pub fn new(name: impl Into<String>) -> Self {
        Instance {
            name: name.into(),
            nodes: IndexMap::new(),
            params: IndexMap::new(),
            uid: None,
            context: None,
            tag: None,
        }
    }

    /// Connect a terminal
    pub fn node(mut self, name: impl Into<String>, node: impl Into<Node>) -> Self {
        self.nodes.insert(name.into(), node.into());
        self
    }

    /// Set a parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Set the uid
    pub fn with_uid(mut self, uid: u32) -> Self {
        self.uid = Some(uid);
        self
    }

    /// Set the device tag
    pub fn with_tag(mut self, tag: char) -> Self {
        self.tag = Some(tag);
        self
    }
}

impl From<&Instance> for Instance {
    fn from(inst: &Instance) -> Self {
        inst.clone()
    }
}
