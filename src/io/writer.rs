use std::io::Write;

use crate::netlist::{Circuit, Directive, Element, Instance, Model, Subcircuit};
use crate::Result;

/// Rendering of netlist elements to a text format
///
/// A writer provides one method per kind of element. Kinds that a format does not
/// support are rendered by [`Writer::fallback`], which shows the element's debug
/// representation; this is meant for diagnostics, not for simulator input.
pub trait Writer {
    /// Render a directive
    fn directive(&self, d: &Directive) -> String {
        self.fallback(Element::Directive(d))
    }

    /// Render a device model
    fn model(&self, m: &Model) -> String {
        self.fallback(Element::Model(m))
    }

    /// Render an instance
    fn instance(&self, inst: &Instance) -> String {
        self.fallback(Element::Instance(inst))
    }

    /// Render a subcircuit definition, including its instances
    fn subcircuit(&self, subckt: &Subcircuit) -> String {
        self.fallback(Element::Subcircuit(subckt))
    }

    /// Render a complete circuit
    fn circuit(&self, ckt: &Circuit) -> String {
        self.fallback(Element::Circuit(ckt))
    }

    /// Render an element with no dedicated rule
    fn fallback(&self, elem: Element<'_>) -> String {
        format!("{:?}", elem)
    }

    /// Render any element, dispatching on its kind
    fn dump<'a>(&self, elem: impl Into<Element<'a>>) -> String {
        match elem.into() {
            Element::Directive(d) => self.directive(d),
            Element::Model(m) => self.model(m),
            Element::Instance(i) => self.instance(i),
            Element::Subcircuit(s) => self.subcircuit(s),
            Element::Circuit(c) => self.circuit(c),
        }
    }

    /// Render an element and write it to a sink
    fn dump_to_file<'a, W: Write>(&self, elem: impl Into<Element<'a>>, w: &mut W) -> Result<()> {
        w.write_all(self.dump(elem).as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Writer;
    use crate::netlist::{Directive, Model};

    /// Writer that only knows about directives
    struct CommandsOnly;

    impl Writer for CommandsOnly {
        fn directive(&self, d: &Directive) -> String {
            d.command.clone()
        }
    }

    #[test]
    fn test_fallback() {
        let w = CommandsOnly;
        assert_eq!(w.dump(&Directive::new("tran").arg("stop", "1u")), "tran");
        let m = Model::new("MOD1", "NPN");
        let s = w.dump(&m);
        assert!(s.starts_with("Model("));
        assert!(s.contains("MOD1"));
    }

    #[test]
    fn test_dump_to_file() {
        let w = CommandsOnly;
        let mut buf = Vec::new();
        w.dump_to_file(&Directive::new("simulator"), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "simulator");
    }
}
