//! Representation of netlists: directives, models, instances, templates and containers

mod circuit;
mod directive;
mod instance;
mod model;
mod subcircuit;
pub mod template;
mod value;

pub use circuit::{Circuit, Item};
pub use directive::Directive;
pub use instance::Instance;
pub use model::Model;
pub use subcircuit::Subcircuit;
pub use template::{Bindings, Component, Template};
pub use value::{Node, Slot, Value};

use fxhash::FxHashMap;
use serde::Serialize;

use crate::Result;

/// Any entity of a netlist, borrowed
///
/// This is the closed set of kinds a writer knows how to render.
#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    /// A simulator directive
    Directive(&'a Directive),
    /// A device model
    Model(&'a Model),
    /// A placed instance
    Instance(&'a Instance),
    /// A subcircuit definition
    Subcircuit(&'a Subcircuit),
    /// A complete circuit
    Circuit(&'a Circuit),
}

impl<'a> From<&'a Directive> for Element<'a> {
    fn from(d: &'a Directive) -> Self {
        Element::Directive(d)
    }
}

impl<'a> From<&'a Model> for Element<'a> {
    fn from(m: &'a Model) -> Self {
        Element::Model(m)
    }
}

impl<'a> From<&'a Instance> for Element<'a> {
    fn from(i: &'a Instance) -> Self {
        Element::Instance(i)
    }
}

impl<'a> From<&'a Subcircuit> for Element<'a> {
    fn from(s: &'a Subcircuit) -> Self {
        Element::Subcircuit(s)
    }
}

impl<'a> From<&'a Circuit> for Element<'a> {
    fn from(c: &'a Circuit) -> Self {
        Element::Circuit(c)
    }
}

/// Field-by-field view of an entity, for logging and external encoding
///
/// ```
/// # use crossnet::netlist::{Directive, Fields};
/// let d = Directive::new("simulator").arg("lang", "spectre");
/// let fields = d.fields().unwrap();
/// assert_eq!(fields[0].0, "command");
/// assert_eq!(fields[1].1["lang"], "spectre");
/// ```
pub trait Fields: Serialize {
    /// Return the (field name, value) pairs of the entity, in declaration order
    fn fields(&self) -> Result<Vec<(String, serde_json::Value)>> {
        let map = match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => map,
            other => return Ok(vec![(String::new(), other)]),
        };
        Ok(map.into_iter().collect())
    }
}

impl Fields for Directive {}
impl Fields for Model {}
impl Fields for Instance {}
impl Fields for Component {}
impl Fields for Subcircuit {}
impl Fields for Circuit {}

/// Per-name uid counters owned by a single container
#[derive(Debug, Clone, Default)]
pub(crate) struct UidCounter {
    counts: FxHashMap<String, u32>,
}

impl UidCounter {
    /// Counters continuing after the uids already present in a set of instances
    pub(crate) fn resume<'a>(instances: impl IntoIterator<Item = &'a Instance>) -> Self {
        let mut counts = FxHashMap::default();
        for inst in instances {
            let c = counts.entry(inst.name.clone()).or_insert(0);
            *c = (*c).max(inst.uid.unwrap_or(0));
        }
        UidCounter { counts }
    }

    /// Bump the counter for this name and return its new value
    pub(crate) fn next(&mut self, name: &str) -> u32 {
        let c = self.counts.entry(name.to_string()).or_insert(0);
        *c += 1;
        *c
    }

    /// Copy an instance into a container, giving it its uid and context
    pub(crate) fn adopt(&mut self, inst: Instance, context: Option<&str>) -> Instance {
        let uid = self.next(&inst.name);
        Instance {
            uid: Some(uid),
            context: context.map(str::to_string),
            ..inst
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UidCounter;
    use crate::netlist::Instance;

    #[test]
    fn test_counter_per_name() {
        let mut c = UidCounter::default();
        assert_eq!(c.next("resistor"), 1);
        assert_eq!(c.next("vsource"), 1);
        assert_eq!(c.next("resistor"), 2);
        assert_eq!(c.next("resistor"), 3);
        assert_eq!(c.next("vsource"), 2);
    }

    #[test]
    fn test_counters_are_independent() {
        let mut a = UidCounter::default();
        let mut b = UidCounter::default();
        a.next("resistor");
        a.next("resistor");
        assert_eq!(b.next("resistor"), 1);
        assert_eq!(a.next("resistor"), 3);
    }

    #[test]
    fn test_adopt() {
        let mut c = UidCounter::default();
        let inst = Instance::new("res").node("P", 1).node("N", 0);
        let a = c.adopt(inst.clone(), Some("top"));
        assert_eq!(a.uid, Some(1));
        assert_eq!(a.context.as_deref(), Some("top"));
        assert_eq!(a.nodes, inst.nodes);
        assert_eq!(inst.uid, None);
    }

    #[test]
    fn test_resume() {
        let insts = vec![
            Instance::new("res").with_uid(3),
            Instance::new("res").with_uid(1),
            Instance::new("cap"),
        ];
        let mut c = UidCounter::resume(&insts);
        assert_eq!(c.next("res"), 4);
        assert_eq!(c.next("cap"), 1);
        assert_eq!(c.next("ind"), 1);
    }
}
