use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::netlist::{Directive, Element, Instance, Subcircuit, UidCounter};

/// Anything that can be added to a circuit
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// A simulator directive
    Directive(Directive),
    /// A subcircuit definition
    Subcircuit(Subcircuit),
    /// A placed instance
    Instance(Instance),
}

impl From<Directive> for Item {
    fn from(d: Directive) -> Self {
        Item::Directive(d)
    }
}

impl From<Subcircuit> for Item {
    fn from(s: Subcircuit) -> Self {
        Item::Subcircuit(s)
    }
}

impl From<Instance> for Item {
    fn from(i: Instance) -> Self {
        Item::Instance(i)
    }
}

impl From<&Directive> for Item {
    fn from(d: &Directive) -> Self {
        Item::Directive(d.clone())
    }
}

impl From<&Subcircuit> for Item {
    fn from(s: &Subcircuit) -> Self {
        Item::Subcircuit(s.clone())
    }
}

impl From<&Instance> for Item {
    fn from(i: &Instance) -> Self {
        Item::Instance(i.clone())
    }
}

/// A complete netlist: directives, subcircuit definitions and top-level instances
///
/// Added elements are copied in. Instances are numbered per name, starting at 1;
/// top-level instances have no context.
///
/// ```
/// # use crossnet::netlist::{Bindings, Circuit, Component, Directive, Template};
/// let res = Component::with_ports("resistor", ["P", "N"]).param("r").with_tag('R');
/// let mut ckt = Circuit::new();
/// ckt += Directive::new("simulator").arg("lang", "spectre");
/// ckt += res.instantiate(vec!["IN", "0"], [("r", 1e3)]).unwrap();
/// ckt += res.instantiate(vec!["IN", "OUT"], [("r", 2e3)]).unwrap();
/// assert_eq!(ckt.instances[1].uid, Some(2));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "CircuitData")]
pub struct Circuit {
    /// Simulator directives, in insertion order
    pub directives: Vec<Directive>,
    /// Subcircuit definitions, without duplicates
    pub subcircuits: Vec<Subcircuit>,
    /// Top-level instances, in insertion order
    pub instances: Vec<Instance>,
    path: Option<PathBuf>,
    #[serde(skip)]
    uids: UidCounter,
}

/// Serialized form of a circuit; counters are rebuilt from the instances
#[derive(Deserialize)]
struct CircuitData {
    #[serde(default)]
    directives: Vec<Directive>,
    #[serde(default)]
    subcircuits: Vec<Subcircuit>,
    #[serde(default)]
    instances: Vec<Instance>,
    #[serde(default)]
    path: Option<PathBuf>,
}

impl From<CircuitData> for Circuit {
    fn from(d: CircuitData) -> Self {
        Circuit {
            uids: UidCounter::resume(&d.instances),
            directives: d.directives,
            subcircuits: d.subcircuits,
            instances: d.instances,
            path: d.path,
        }
    }
}

impl Circuit {
    /// Create an empty circuit
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a copy of a directive, subcircuit or instance
    ///
    /// A subcircuit structurally equal to one already registered is ignored.
    pub fn add(&mut self, item: impl Into<Item>) {
        match item.into() {
            Item::Directive(d) => self.directives.push(d),
            Item::Subcircuit(s) => {
                if !self.subcircuits.contains(&s) {
                    self.subcircuits.push(s);
                }
            }
            Item::Instance(i) => {
                let i = self.uids.adopt(i, None);
                self.instances.push(i);
            }
        }
    }

    /// Add several elements, in order
    pub fn add_all<I: Into<Item>>(&mut self, items: impl IntoIterator<Item = I>) {
        for i in items {
            self.add(i);
        }
    }

    /// Returns true if a structurally equal element is part of the circuit
    ///
    /// Added instances are numbered, so the value passed to [`Circuit::add`] is
    /// generally not contained afterwards.
    pub fn contains<'a>(&self, elem: impl Into<Element<'a>>) -> bool {
        match elem.into() {
            Element::Directive(d) => self.directives.contains(d),
            Element::Subcircuit(s) => self.subcircuits.contains(s),
            Element::Instance(i) => self.instances.contains(i),
            Element::Model(_) | Element::Circuit(_) => false,
        }
    }

    /// Names of the registered subcircuits that are never instantiated at the top level
    pub fn unused_subcircuits(&self) -> Vec<&str> {
        self.subcircuits
            .iter()
            .filter(|s| !self.instances.iter().any(|i| i.name == s.name))
            .map(|s| s.name.as_str())
            .collect()
    }

    /// Output path of the netlist, if set
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Set the output path of the netlist; relative paths are made absolute
    pub fn set_path(&mut self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        self.path = Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        });
        Ok(())
    }
}

impl<T: Into<Item>> std::ops::AddAssign<T> for Circuit {
    fn add_assign(&mut self, item: T) {
        self.add(item);
    }
}

impl<T: Into<Item>> Extend<T> for Circuit {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}
