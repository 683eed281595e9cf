//! Netlist generation for a resistive crossbar
//!
//! Each input drives a row through a DC voltage source. Each positive resistance connects a row
//! to a positive column, each negative resistance to a negative column. The crossbar is wrapped
//! in a subcircuit exposing all the columns:
//! ```text
//!     simulator lang=spectre
//!     global 0 gnd!
//!     subckt mnist_grid COL_000 COL_001 COLN_000 COLN_001
//!     V1 (IN_000 0) vsource type=dc dc=-3.0
//!     R1 (IN_000 COL_000) resistor r=10000.0
//!     R2 (IN_000 COLN_001) resistor r=250000.0
//!     ends mnist_grid
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use itertools::Itertools;
use tracing::info;

use crate::crossbar::nets;
use crate::io::{writer_for, Rows, Writer};
use crate::netlist::{Circuit, Component, Directive, Node, Template};
use crate::Result;

/// Voltage source driving an input row
pub fn vsource() -> Component {
    Component::new("vsource")
        .port("VDD")
        .port_default("GND", Node::ground())
        .param_default("type", "dc")
        .param("dc")
        .with_tag('V')
}

/// Memristor cell, modeled as a resistor
pub fn resistor() -> Component {
    Component::with_ports("resistor", ["P", "N"])
        .param("r")
        .with_tag('R')
}

/// Shape and name of a crossbar
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crossbar {
    /// Name of the wrapping subcircuit
    pub name: String,
    /// Number of inputs
    pub rows: usize,
    /// Number of outputs, in each of the positive and negative crossbars
    pub cols: usize,
}

impl Default for Crossbar {
    /// First layer of a network on 28x28 images, with 100 neurons
    fn default() -> Self {
        Crossbar {
            name: "mnist_grid".to_string(),
            rows: 784,
            cols: 100,
        }
    }
}

impl Crossbar {
    /// Nets driven by the inputs
    pub fn input_nets(&self) -> Vec<String> {
        nets("IN_", self.rows)
    }

    /// Columns of the positive crossbar
    pub fn column_nets(&self) -> Vec<String> {
        nets("COL_", self.cols)
    }

    /// Columns of the negative crossbar
    pub fn negative_column_nets(&self) -> Vec<String> {
        nets("COLN_", self.cols)
    }

    /// Place one resistor for each positive value of a resistance file
    fn place(
        &self,
        ckt: &mut Circuit,
        cell: &Component,
        resistances: &Rows,
        columns: &[String],
    ) -> Result<()> {
        for (i, row_net) in self.input_nets().iter().enumerate() {
            let row = resistances.row(i, self.cols)?;
            for (r, col_net) in row.iter().zip(columns) {
                if *r > 0.0 {
                    ckt.add(cell.instantiate(
                        [("P", row_net.as_str()), ("N", col_net.as_str())],
                        [("r", *r)],
                    )?);
                }
            }
        }
        Ok(())
    }

    /// Build the crossbar circuit
    ///
    /// The first row of `inputs` gives the voltage of each input. `positive` and `negative`
    /// give the resistance of each cell, with a zero where no resistor is placed.
    pub fn build(&self, inputs: &Rows, positive: &Rows, negative: &Rows) -> Result<Circuit> {
        let columns = self.column_nets();
        let negative_columns = self.negative_column_nets();

        let mut ckt = Circuit::new();
        ckt += Directive::new("simulator").arg("lang", "spectre");
        ckt += Directive::new("global 0 gnd!");
        ckt += Directive::new(format!(
            "subckt {} {}",
            self.name,
            columns.iter().chain(negative_columns.iter()).join(" ")
        ));

        let source = vsource();
        let voltages = inputs.row(0, self.rows)?;
        for (net, v) in self.input_nets().into_iter().zip(voltages) {
            ckt.add(source.instantiate([("VDD", net)], [("dc", *v)])?);
        }

        let cell = resistor();
        self.place(&mut ckt, &cell, positive, &columns)?;
        self.place(&mut ckt, &cell, negative, &negative_columns)?;
        Ok(ckt)
    }

    /// Write the crossbar circuit, closing the subcircuit
    pub fn write<W: Write>(&self, ckt: &Circuit, writer: &impl Writer, w: &mut W) -> Result<()> {
        writer.dump_to_file(ckt, w)?;
        writeln!(w)?;
        writeln!(w, "ends {}", self.name)?;
        Ok(())
    }

    /// Generate the netlist file for an input file and two resistance files
    pub fn generate_file(
        &self,
        inputs: &Path,
        positive: &Path,
        negative: &Path,
        output: &Path,
    ) -> Result<()> {
        let ckt = self.build(
            &Rows::read(inputs)?,
            &Rows::read(positive)?,
            &Rows::read(negative)?,
        )?;
        let writer = writer_for(output)?;
        let mut f = BufWriter::new(File::create(output)?);
        self.write(&ckt, &writer, &mut f)?;
        f.flush()?;
        info!(
            "Wrote crossbar {} with {} instances to {}",
            self.name,
            ckt.instances.len(),
            output.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{resistor, vsource, Crossbar};
    use crate::io::{Rows, SpectreWriter};
    use crate::netlist::{Node, Template, Value};
    use crate::Error;

    fn rows(v: Vec<Vec<f64>>) -> Rows {
        Rows::new("test.csv", v)
    }

    fn small() -> Crossbar {
        Crossbar {
            name: "grid".to_string(),
            rows: 2,
            cols: 2,
        }
    }

    #[test]
    fn test_components() {
        let v = vsource().instantiate([("VDD", "IN_000")], [("dc", 1.5)]).unwrap();
        assert_eq!(v.nodes["GND"], Node::Index(0));
        assert_eq!(v.params["type"], Value::from("dc"));
        assert_eq!(v.tag, Some('V'));
        assert!(vsource().instantiate([("VDD", "IN_000")], [("type", "dc")]).is_err());
        assert!(resistor().instantiate(vec!["A", "B"], [("r", 1e4)]).is_ok());
    }

    #[test]
    fn test_default() {
        let c = Crossbar::default();
        assert_eq!(c.input_nets().len(), 784);
        assert_eq!(c.column_nets()[99], "COL_099");
        assert_eq!(c.negative_column_nets()[0], "COLN_000");
    }

    #[test]
    fn test_build() {
        let c = small();
        let ckt = c
            .build(
                &rows(vec![vec![-3.0, 1.5]]),
                &rows(vec![vec![1e4, 0.0], vec![0.0, 0.0]]),
                &rows(vec![vec![0.0, 2.5e5], vec![1e6, 0.0]]),
            )
            .unwrap();
        assert_eq!(ckt.directives.len(), 3);
        assert_eq!(ckt.instances.len(), 5);
        let mut out = Vec::new();
        c.write(&ckt, &SpectreWriter::new(), &mut out).unwrap();
        let expected = "simulator lang=spectre\n\
                        global 0 gnd!\n\
                        subckt grid COL_000 COL_001 COLN_000 COLN_001\n\
                        V1 (IN_000 0) vsource type=dc dc=-3.0\n\
                        V2 (IN_001 0) vsource type=dc dc=1.5\n\
                        R1 (IN_000 COL_000) resistor r=10000.0\n\
                        R2 (IN_000 COLN_001) resistor r=250000.0\n\
                        R3 (IN_001 COLN_000) resistor r=1000000.0\n\
                        ends grid\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_short_rows() {
        let c = small();
        let full = rows(vec![vec![0.0, 0.0], vec![0.0, 0.0]]);
        let res = c.build(&rows(vec![vec![1.0]]), &full, &full);
        assert!(matches!(res, Err(Error::ShortRow { found: 1, .. })));
        let res = c.build(&rows(vec![vec![1.0, 1.0]]), &rows(vec![vec![0.0, 0.0]]), &full);
        assert!(matches!(
            res,
            Err(Error::ShortRow {
                line: 2,
                found: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_generate_file() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, text: &str| {
            let p = dir.path().join(name);
            std::fs::write(&p, text).unwrap();
            p
        };
        let inputs = write("inputs_0.csv", "1.0,2.0\n");
        let pos = write("resistances.csv", "1e4,0\n0,2e4\n");
        let neg = write("resistances_neg.csv", "0,0\n0,0\n");
        let out = dir.path().join("netlist_no_PV0");
        small().generate_file(&inputs, &pos, &neg, &out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("simulator lang=spectre\n"));
        assert!(text.contains("R2 (IN_001 COL_001) resistor r=20000.0\n"));
        assert!(text.ends_with("\nends grid\n"));
    }
}
