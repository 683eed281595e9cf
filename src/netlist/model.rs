use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::netlist::Value;

/// A device model, deriving from a base model with its own parameters
///
/// ```
/// # use crossnet::netlist::Model;
/// let m = Model::new("MOD1", "NPN").param("BF", 50).param("IS", 1e-13);
/// assert_eq!(m.params.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Name of the model
    pub name: String,
    /// Model it inherits from
    pub base: String,
    /// Model parameters
    #[serde(default)]
    pub params: IndexMap<String, Value>,
}

impl Model {
    /// Create a model with no parameters
    pub fn new(name: impl Into<String>, base: impl Into<String>) -> Self {
        Model {
            name: name.into(),
            base: base.into(),
            params: IndexMap::new(),
        }
    }

    /// Add a parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}
