use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An electrical connection point, given by index or by name
///
/// ```
/// # use crossnet::netlist::Node;
/// assert_eq!(Node::from(0).to_string(), "0");
/// assert_eq!(Node::from("IN_000").to_string(), "IN_000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Numbered node; 0 is the ground
    Index(i64),
    /// Named node
    Name(String),
}

impl Node {
    /// The ground node
    pub fn ground() -> Node {
        Node::Index(0)
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Index(i)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Name(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Name(s)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Index(i) => write!(f, "{}", i),
            Node::Name(s) => write!(f, "{}", s),
        }
    }
}

/// Value of a parameter or of a directive argument
///
/// Floats are shown with at least one decimal, so that `1e3` reads `1000.0`
/// and stays distinguishable from the integer `1000`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Free-form value, written as is
    Str(String),
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing ".0" and switches to exponents for extreme magnitudes
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Default value of a template entry: either unset (the entry is required) or set
///
/// Serialized as an optional value, `null` meaning unset.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    /// No default; a value must be supplied on instantiation
    Unset,
    /// A value
    Set(T),
}

impl<T> Slot<T> {
    /// Returns true if the slot holds no value
    pub fn is_unset(&self) -> bool {
        matches!(self, Slot::Unset)
    }

    /// Returns true if the slot holds a value
    pub fn is_set(&self) -> bool {
        !self.is_unset()
    }

    /// Borrow the value, if any
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Slot::Unset => None,
            Slot::Set(v) => Some(v),
        }
    }

    /// Take the value, if any
    pub fn into_option(self) -> Option<T> {
        match self {
            Slot::Unset => None,
            Slot::Set(v) => Some(v),
        }
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Unset
    }
}

impl<T> From<Option<T>> for Slot<T> {
    fn from(o: Option<T>) -> Self {
        match o {
            None => Slot::Unset,
            Some(v) => Slot::Set(v),
        }
    }
}

impl<T: Serialize> Serialize for Slot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Slot<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Slot::from)
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, Slot, Value};

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from(20).to_string(), "20");
        assert_eq!(Value::from(1e3).to_string(), "1000.0");
        assert_eq!(Value::from(0.5).to_string(), "0.5");
        assert_eq!(Value::from(-3.0).to_string(), "-3.0");
        assert_eq!(Value::from("100n").to_string(), "100n");
    }

    #[test]
    fn test_node_display() {
        assert_eq!(Node::ground().to_string(), "0");
        assert_eq!(Node::from("gnd!").to_string(), "gnd!");
    }

    #[test]
    fn test_slot() {
        let s: Slot<Node> = Slot::default();
        assert!(s.is_unset());
        let s = Slot::Set(Node::from(1));
        assert!(s.is_set());
        assert_eq!(s.as_option(), Some(&Node::Index(1)));
        assert_eq!(Slot::from(None::<Value>), Slot::Unset);
    }

    #[test]
    fn test_json() {
        let v: Value = serde_json::from_str("1000.0").unwrap();
        assert_eq!(v, Value::Float(1000.0));
        let v: Value = serde_json::from_str("50").unwrap();
        assert_eq!(v, Value::Int(50));
        let n: Node = serde_json::from_str("\"P\"").unwrap();
        assert_eq!(n, Node::from("P"));
        let s: Slot<Value> = serde_json::from_str("null").unwrap();
        assert_eq!(s, Slot::Unset);
        assert_eq!(serde_json::to_string(&Slot::Set(Value::Int(3))).unwrap(), "3");
    }
}
