//! Writer for the Spectre netlist format

use std::fmt::Display;

use itertools::Itertools;

use crate::io::Writer;
use crate::netlist::{Circuit, Directive, Instance, Model, Subcircuit};

/// Format arguments as `name` or `name=value`, separated by spaces
fn fmt_args<'a, V: Display + 'a>(
    args: impl IntoIterator<Item = (&'a String, Option<V>)>,
) -> String {
    args.into_iter()
        .map(|(k, v)| match v {
            Some(v) => format!("{}={}", k, v),
            None => k.to_string(),
        })
        .join(" ")
}

/// Write netlists in Spectre format
///
/// Generated netlists look like this:
/// ```text
///     simulator lang=spectre
///     global 0 gnd!
///     subckt divider IN OUT
///     R1 (IN OUT) resistor r=1000.0
///     R2 (OUT 0) resistor r=1000.0
///     ends divider
///     V1 (VDD 0) vsource type=dc dc=1.0
///     X1 (VDD MID) divider
/// ```
///
/// Instances without a tag are prefixed with `M`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpectreWriter;

impl SpectreWriter {
    /// Create a new writer
    pub fn new() -> Self {
        SpectreWriter
    }
}

impl Writer for SpectreWriter {
    fn directive(&self, d: &Directive) -> String {
        if d.is_raw() {
            d.command.clone()
        } else {
            format!(
                "{} {}",
                d.command,
                fmt_args(d.args.iter().map(|(k, v)| (k, v.as_ref())))
            )
        }
    }

    fn model(&self, m: &Model) -> String {
        format!(
            "model {} {} ({})",
            m.name,
            m.base,
            fmt_args(m.params.iter().map(|(k, v)| (k, Some(v))))
        )
    }

    fn instance(&self, inst: &Instance) -> String {
        let line = format!(
            "{}{} ({}) {}",
            inst.tag.unwrap_or('M'),
            inst.uid.unwrap_or(0),
            inst.nodes.values().join(" "),
            inst.name
        );
        if inst.params.is_empty() {
            line
        } else {
            let params = fmt_args(inst.params.iter().map(|(k, v)| (k, Some(v))));
            format!("{} {}", line, params)
        }
    }

    fn subcircuit(&self, subckt: &Subcircuit) -> String {
        let mut lines = vec![format!(
            "subckt {} {}",
            subckt.name,
            subckt.nodes.keys().join(" ")
        )];
        if !subckt.params.is_empty() {
            let params = fmt_args(subckt.params.iter().map(|(k, v)| (k, v.as_option())));
            lines.push(format!("parameters {}", params));
        }
        lines.extend(subckt.instances.iter().map(|i| self.instance(i)));
        lines.push(format!("ends {}", subckt.name));
        lines.join("\n")
    }

    fn circuit(&self, ckt: &Circuit) -> String {
        let directives = ckt.directives.iter().map(|d| self.directive(d)).join("\n");
        let subcircuits = ckt.subcircuits.iter().map(|s| self.subcircuit(s)).join("\n");
        let instances = ckt.instances.iter().map(|i| self.instance(i)).join("\n");
        [directives, subcircuits, instances]
            .into_iter()
            .filter(|s| !s.is_empty())
            .join("\n")
    }
}
