//! Instance generation from templates
//!
//! Components and subcircuits are both templates: they declare terminals and parameters,
//! each with an optional default, and generate instances from the values supplied by the caller.
//!
//! ```
//! # use crossnet::netlist::{Bindings, Component, Template};
//! # use crossnet::Error;
//! let vsource = Component::new("vsource")
//!     .port("VDD")
//!     .port_default("GND", 0)
//!     .param_default("type", "dc")
//!     .param("dc")
//!     .with_tag('V');
//!
//! let inst = vsource.instantiate([("VDD", "IN_000")], [("dc", 0.5)]).unwrap();
//! assert_eq!(inst.nodes["GND"].to_string(), "0");
//! assert_eq!(inst.params.len(), 2);
//!
//! // The dc voltage is required
//! let err = vsource.instantiate([("VDD", "IN_000")], Bindings::default()).unwrap_err();
//! assert!(matches!(err, Error::MissingParams { .. }));
//!
//! // Positional nodes must cover every terminal, defaulted ones included
//! let err = vsource.instantiate(vec!["IN_000"], [("dc", 0.5)]).unwrap_err();
//! assert!(matches!(err, Error::Arity { .. }));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::netlist::{Instance, Node, Slot, Value};
use crate::{Error, Result};

/// Values supplied by the caller when instantiating a template
///
/// Either a sequence matched against the declared names in order, or an explicit mapping.
/// Unset values are ignored, so that the template default applies.
#[derive(Debug, Clone, PartialEq)]
pub enum Bindings<T> {
    /// Values in declaration order
    Positional(Vec<Slot<T>>),
    /// Values by name
    Named(IndexMap<String, Slot<T>>),
}

impl<T> Default for Bindings<T> {
    fn default() -> Self {
        Bindings::Named(IndexMap::new())
    }
}

impl<T, V: Into<T>> From<Vec<V>> for Bindings<T> {
    fn from(v: Vec<V>) -> Self {
        Bindings::Positional(v.into_iter().map(|x| Slot::Set(x.into())).collect())
    }
}

impl<'a, T, V: Into<T>, const N: usize> From<[(&'a str, V); N]> for Bindings<T> {
    fn from(v: [(&'a str, V); N]) -> Self {
        Bindings::Named(
            v.into_iter()
                .map(|(k, x)| (k.to_string(), Slot::Set(x.into())))
                .collect(),
        )
    }
}

impl<T, V: Into<T>> From<IndexMap<String, V>> for Bindings<T> {
    fn from(v: IndexMap<String, V>) -> Self {
        Bindings::Named(v.into_iter().map(|(k, x)| (k, Slot::Set(x.into()))).collect())
    }
}

impl<T> Bindings<T> {
    /// Attach each value to its name, checking positional arity against the declaration
    fn resolve(
        self,
        declared: &IndexMap<String, Slot<T>>,
        template: &str,
        kind: &'static str,
    ) -> Result<IndexMap<String, Slot<T>>> {
        match self {
            Bindings::Named(m) => Ok(m),
            Bindings::Positional(v) => {
                if v.len() != declared.len() {
                    return Err(Error::Arity {
                        template: template.to_string(),
                        kind,
                        expected: declared.len(),
                        found: v.len(),
                    });
                }
                Ok(declared.keys().cloned().zip(v).collect())
            }
        }
    }
}

/// Names of the entries that are required by the template but not provided, sorted
pub fn missing_required<T>(
    defaults: &IndexMap<String, Slot<T>>,
    provided: &IndexMap<String, Slot<T>>,
) -> Vec<String> {
    let mut missing: Vec<String> = defaults
        .iter()
        .filter(|(_, v)| v.is_unset())
        .map(|(k, _)| k)
        .filter(|k| !provided.get(*k).is_some_and(Slot::is_set))
        .cloned()
        .collect();
    missing.sort();
    missing
}

/// Overlay the provided values on the defaults; entries left unset are dropped
fn merge<T: Clone>(
    defaults: &IndexMap<String, Slot<T>>,
    provided: IndexMap<String, Slot<T>>,
) -> IndexMap<String, T> {
    let mut ret = defaults.clone();
    for (k, v) in provided {
        if v.is_set() {
            ret.insert(k, v);
        }
    }
    ret.into_iter()
        .filter_map(|(k, v)| v.into_option().map(|v| (k, v)))
        .collect()
}

/// Generate an instance from a template, optionally checking that all required values are given
fn generate<S: Template + ?Sized>(
    template: &S,
    nodes: Bindings<Node>,
    params: Bindings<Value>,
    check: bool,
) -> Result<Instance> {
    let name = template.name();
    let nodes = nodes.resolve(template.node_defaults(), name, "nodes")?;
    let params = params.resolve(template.param_defaults(), name, "params")?;
    if check {
        let missing = missing_required(template.node_defaults(), &nodes);
        if !missing.is_empty() {
            return Err(Error::MissingNodes {
                template: name.to_string(),
                names: missing,
            });
        }
        let missing = missing_required(template.param_defaults(), &params);
        if !missing.is_empty() {
            return Err(Error::MissingParams {
                template: name.to_string(),
                names: missing,
            });
        }
    }
    Ok(Instance {
        name: name.to_string(),
        nodes: merge(template.node_defaults(), nodes),
        params: merge(template.param_defaults(), params),
        uid: None,
        context: None,
        tag: template.tag(),
    })
}

/// A template that generates instances
pub trait Template {
    /// Name shared by all generated instances
    fn name(&self) -> &str;

    /// Declared terminals, with their defaults
    fn node_defaults(&self) -> &IndexMap<String, Slot<Node>>;

    /// Declared parameters, with their defaults
    fn param_defaults(&self) -> &IndexMap<String, Slot<Value>>;

    /// Device tag of the generated instances
    fn tag(&self) -> Option<char>;

    /// Create a new instance, failing if a required node or parameter is missing
    fn instantiate<N, P>(&self, nodes: N, params: P) -> Result<Instance>
    where
        N: Into<Bindings<Node>>,
        P: Into<Bindings<Value>>,
    {
        generate(self, nodes.into(), params.into(), true)
    }

    /// Create a new instance without checking for required values
    ///
    /// Required entries that are not provided are simply absent from the instance.
    fn instantiate_unchecked<N, P>(&self, nodes: N, params: P) -> Result<Instance>
    where
        N: Into<Bindings<Node>>,
        P: Into<Bindings<Value>>,
    {
        generate(self, nodes.into(), params.into(), false)
    }
}

/// A reusable device template, with default terminals and parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Name given to all generated instances
    pub name: String,
    /// Declared terminals with their default connection
    pub nodes: IndexMap<String, Slot<Node>>,
    /// Declared parameters with their default value
    #[serde(default)]
    pub params: IndexMap<String, Slot<Value>>,
    /// Device tag given to generated instances
    #[serde(default)]
    pub tag: Option<char>,
}

impl Component {
    /// Create a component with no terminal or parameter
    pub fn new(name: impl Into<String>) -> Self {
        Component {
            name: name.into(),
            nodes: IndexMap::new(),
            params: IndexMap::new(),
            tag: None,
        }
    }

    /// Create a component with the given required terminals
    pub fn with_ports<S: Into<String>>(
        name: impl Into<String>,
        ports: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut ret = Component::new(name);
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

    /// Declare a required parameter
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.insert(name.into(), Slot::Unset);
        self
    }

    /// Declare a parameter with a default value
    pub fn param_default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), Slot::Set(value.into()));
        self
    }

    /// Set the device tag
    pub fn with_tag(mut self, tag: char) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Create a component from an existing instance
    ///
    /// The instance connections and parameter values become the defaults, unless reset:
    /// reset entries become required.
    pub fn from_instance(inst: &Instance, reset_nodes: bool, reset_params: bool) -> Self {
        fn defaults<T: Clone>(m: &IndexMap<String, T>, reset: bool) -> IndexMap<String, Slot<T>> {
            m.iter()
                .map(|(k, v)| {
                    let slot = if reset { Slot::Unset } else { Slot::Set(v.clone()) };
                    (k.clone(), slot)
                })
                .collect()
        }
        Component {
            name: inst.name.clone(),
            nodes: defaults(&inst.nodes, reset_nodes),
            params: defaults(&inst.params, reset_params),
            tag: inst.tag,
        }
    }
}

impl Template for Component {
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

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::{missing_required, Bindings, Component, Template};
    use crate::netlist::{Instance, Node, Slot, Value};
    use crate::Error;

    fn resistor() -> Component {
        Component::with_ports("Res", ["P", "N"]).param_default("R", 1e3)
    }

    #[test]
    fn test_missing_required() {
        let mut defaults = IndexMap::new();
        defaults.insert("a".to_string(), Slot::Unset);
        defaults.insert("b".to_string(), Slot::Set(42));
        let mut provided = IndexMap::new();
        provided.insert("a".to_string(), Slot::Set(32));
        assert!(missing_required(&defaults, &provided).is_empty());

        let mut provided = IndexMap::new();
        provided.insert("b".to_string(), Slot::Set(32));
        assert_eq!(missing_required(&defaults, &provided), vec!["a"]);

        // An unset value does not count as provided
        let mut provided = IndexMap::new();
        provided.insert("a".to_string(), Slot::Unset);
        assert_eq!(missing_required(&defaults, &provided), vec!["a"]);
    }

    #[test]
    fn test_missing_sorted() {
        let c = Component::with_ports("Mos", ["S", "G", "D", "B"]);
        let err = c.instantiate([("G", "g")], Bindings::default()).unwrap_err();
        match err {
            Error::MissingNodes { template, names } => {
                assert_eq!(template, "Mos");
                assert_eq!(names, vec!["B", "D", "S"]);
            }
            e => panic!("Unexpected error {e}"),
        }
    }

    #[test]
    fn test_missing_params() {
        let c = Component::with_ports("Res", ["P", "N"]).param("R").param("M");
        let err = c.instantiate(vec!["a", "b"], Bindings::default()).unwrap_err();
        match err {
            Error::MissingParams { names, .. } => assert_eq!(names, vec!["M", "R"]),
            e => panic!("Unexpected error {e}"),
        }
        // Nodes are checked first
        let err = c.instantiate([("P", "a")], Bindings::default()).unwrap_err();
        assert!(matches!(err, Error::MissingNodes { .. }));
    }

    #[test]
    fn test_positional_named() {
        let r = resistor();
        let a = r.instantiate(vec!["P", "N"], Bindings::default()).unwrap();
        let b = r
            .instantiate([("P", "P"), ("N", "N")], Bindings::default())
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.params["R"], Value::Float(1e3));
        assert_eq!(a.uid, None);
        assert_eq!(a.context, None);
    }

    #[test]
    fn test_arity() {
        let r = resistor();
        let err = r.instantiate(vec!["P"], Bindings::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Arity {
                kind: "nodes",
                expected: 2,
                found: 1,
                ..
            }
        ));
        let err = r
            .instantiate_unchecked(vec!["P", "N", "X"], Bindings::default())
            .unwrap_err();
        assert!(matches!(err, Error::Arity { .. }));
        let err = r.instantiate(vec!["P", "N"], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::Arity { kind: "params", .. }));
    }

    #[test]
    fn test_named_nodes_with_default() {
        let v = Component::new("vsource")
            .port("VDD")
            .port_default("GND", Node::ground())
            .param("dc");
        let inst = v.instantiate([("VDD", "IN_000")], [("dc", 0.5)]).unwrap();
        assert_eq!(inst.nodes["GND"], Node::Index(0));
        let err = v.instantiate([("VDD", "IN_000")], Bindings::default()).unwrap_err();
        match err {
            Error::MissingParams { names, .. } => assert_eq!(names, vec!["dc"]),
            e => panic!("Unexpected error {e}"),
        }
        // A single positional node does not cover the defaulted terminal
        let err = v.instantiate(vec!["IN_000"], [("dc", 0.5)]).unwrap_err();
        assert!(matches!(err, Error::Arity { expected: 2, found: 1, .. }));
    }

    #[test]
    fn test_merge() {
        let c = Component::new("vsource")
            .port("VDD")
            .port_default("GND", 0)
            .param_default("type", "dc")
            .with_tag('V');
        let inst = c
            .instantiate([("VDD", "IN_000")], [("dc", 0.5), ("type", 1.0)])
            .unwrap();
        let nodes: Vec<_> = inst.nodes.keys().map(String::as_str).collect();
        assert_eq!(nodes, vec!["VDD", "GND"]);
        assert_eq!(inst.nodes["GND"], Node::Index(0));
        let params: Vec<_> = inst.params.keys().map(String::as_str).collect();
        assert_eq!(params, vec!["type", "dc"]);
        // Caller values win
        assert_eq!(inst.params["type"], Value::Float(1.0));
        assert_eq!(inst.tag, Some('V'));
    }

    #[test]
    fn test_unset_binding_keeps_default() {
        let c = Component::with_ports("Res", ["P", "N"]).param_default("R", 1e3);
        let mut params = IndexMap::new();
        params.insert("R".to_string(), Slot::Unset);
        let inst = c
            .instantiate(vec!["a", "b"], Bindings::Named(params))
            .unwrap();
        assert_eq!(inst.params["R"], Value::Float(1e3));
    }

    #[test]
    fn test_unchecked() {
        let c = Component::with_ports("Res", ["P", "N"]).param("R");
        let inst = c
            .instantiate_unchecked([("P", "a")], Bindings::default())
            .unwrap();
        assert_eq!(inst.nodes.len(), 1);
        assert!(inst.params.is_empty());
    }

    #[test]
    fn test_from_instance() {
        let inst = Instance::new("Res").node("P", 1).node("N", 0).param("R", 1e3);
        let r = Component::new("Res")
            .port_default("P", 1)
            .port_default("N", 0)
            .param_default("R", 1e3);
        assert_eq!(Component::from_instance(&inst, false, false), r);

        let reset = Component::from_instance(&inst, true, false);
        assert!(reset.nodes.values().all(Slot::is_unset));
        assert!(reset.params.values().all(Slot::is_set));
        let reset = Component::from_instance(&inst, false, true);
        assert!(reset.nodes.values().all(Slot::is_set));
        assert!(reset.params.values().all(Slot::is_unset));
    }

    #[test]
    fn test_json() {
        let r = Component::new("Res")
            .port_default("P", 1)
            .port_default("N", 0)
            .param_default("R", 1e3)
            .port("X");
        let as_json = r#"{"name":"Res","nodes":{"P":1,"N":0,"X":null},"params":{"R":1000.0},"tag":null}"#;
        assert_eq!(serde_json::to_string(&r).unwrap(), as_json);
        let back: Component = serde_json::from_str(as_json).unwrap();
        assert_eq!(back, r);
    }
}
