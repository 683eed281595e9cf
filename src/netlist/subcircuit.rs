use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::netlist::{Instance, Node, Slot, Template, UidCounter, Value};

/// A named group of instances, that can itself be instantiated like a component
///
/// ```
/// # use crossnet::netlist::{Bindings, Component, Subcircuit, Template};
/// let res = Component::with_ports("resistor", ["P", "N"]).param("r");
/// let mut divider = Subcircuit::with_ports("divider", ["IN", "MID", "GND"]);
/// divider.add(res.instantiate(vec!["IN", "MID"], [("r", 1e3)]).unwrap());
/// divider.add(res.instantiate(vec!["MID", "GND"], [("r", 1e3)]).unwrap());
/// assert_eq!(divider.instances[1].uid, Some(2));
///
/// let inst = divider.instantiate(vec!["VDD", "OUT", "0"], Bindings::default()).unwrap();
/// assert_eq!(inst.name, "divider");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "SubcircuitData")]
pub struct Subcircuit {
    /// Name of the subcircuit, shared by all its instances
    pub name: String,
    /// Declared terminals with their default connection
    pub nodes: IndexMap<String, Slot<Node>>,
    /// Declared parameters with their default value
    pub params: IndexMap<String, Slot<Value>>,
    /// Instances inside the subcircuit, in insertion order
    pub instances: Vec<Instance>,
    /// Device tag given to generated instances
    pub tag: Option<char>,
    #[serde(skip)]
    uids: UidCounter,
}

/// Serialized form of a subcircuit; counters are rebuilt from the instances
#[derive(Deserialize)]
struct SubcircuitData {
    name: String,
    nodes: IndexMap<String, Slot<Node>>,
    #[serde(default)]
    params: IndexMap<String, Slot<Value>>,
    #[serde(default)]
    instances: Vec<Instance>,
    #[serde(default)]
    tag: Option<char>,
}

impl From<SubcircuitData> for Subcircuit {
    fn from(d: SubcircuitData) -> Self {
        Subcircuit {
            uids: UidCounter::resume(&d.instances),
            name: d.name,
            nodes: d.nodes,
            params: d.params,
            instances: d.instances,
            tag: d.tag,
        }
    }
}

impl Subcircuit {
    /// Create an empty subcircuit with no terminal
    pub fn new(name: impl Into<String>) -> Self {
        Subcircuit {
            name: name.into(),
            nodes: IndexMap::new(),
            params: IndexMap::new(),
            instances: Vec::new(),
            tag: None,
            uids: UidCounter::default(),
        }
    }

    /// Create an empty subcircuit with the given required terminals
    pub fn with_ports<S: Into<String>>(
        name: impl Into<String>,
        ports: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut ret = Subcircuit::new(name);
        for p in ports {
            ret = ret.port(p);
        }
        ret
    }

    /// Declare a required terminal
    pub fn port(mut self, name: impl Into<String>) -> Self {
        self.nodes.insert(name.into(), Slot::Unset);
        self
    }

    /// Declare a terminal with a default connection
    pub fn port_default(mut self, name: impl Into<String>, node: impl Into<Node>) -> Self {
        self.nodes.insert(name.into(), Slot::Set(node.into()));
        self
    }

    /// Declare a parameter with a default value
    pub fn param_default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), Slot::Set(value.into()));
        self
    }

    /// Declare a required parameter
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.insert(name.into(), Slot::Unset);
        self
    }

    /// Set the device tag
    pub fn with_tag(mut self, tag: char) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Add a copy of an instance, numbered among the instances of the same name
    pub fn add(&mut self, inst: impl Into<Instance>) {
        let inst = self.uids.adopt(inst.into(), Some(self.name.as_str()));
        self.instances.push(inst);
    }

    /// Add several instances, in order
    pub fn add_all<I: Into<Instance>>(&mut self, insts: impl IntoIterator<Item = I>) {
        for i in insts {
            self.add(i);
        }
    }

    /// Returns true if a structurally equal instance is part of the subcircuit
    pub fn contains(&self, inst: &Instance) -> bool {
        self.instances.contains(inst)
    }
}

impl PartialEq for Subcircuit {
    /// Structural equality on name, terminals, parameters and instances
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.nodes == other.nodes
            && self.params == other.params
            && self.instances == other.instances
    }
}

impl<T: Into<Instance>> std::ops::AddAssign<T> for Subcircuit {
    fn add_assign(&mut self, inst: T) {
        self.add(inst);
    }
}

impl Template for Subcircuit {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_defaults(&self) -> &IndexMap<String, Slot<Node>> {
        &self.nodes
    }

    fn param_defaults(&self) -> &IndexMap<String, Slot<Value>> {
        &self.params
    }

    fn tag(&self) -> Option<char> {
        self.tag
    }
}
