//! Netlist builder and Spectre writer for memristor crossbar models
//!
//! This crate provides a small object model for circuit netlists, and the tools to generate
//! the netlists of memristor crossbars that run the inference of a neural network.
//!
//! # Usage
//!
//! The whole flow is available from the command line, from the network data to the netlists
//! ready for simulation:
//!
//! ```bash
//! # Show available commands
//! crossnet help
//! # Select 20 input vectors and convert them to voltages
//! crossnet inputs data/inputs_inverted.csv -o INPUTS/inputs
//! # Convert the weights to resistances, with 20 process variability generations
//! crossnet resistances data/weights.csv -o RESISTANCES/resistances --variability 20
//! # Generate all netlists
//! crossnet batch --netlists NETLISTS
//! ```
//!
//! # Installation
//!
//! Crossnet is written in Rust, and can be installed using
//! [Cargo](https://doc.rust-lang.org/cargo/getting-started/installation.html), Rust's package manager:
//! ```bash
//! cargo install --path .
//! ```
//!
//! # Development
//!
//! ## Datastructures
//!
//! A [`netlist::Circuit`] holds directives, subcircuit definitions and instances.
//! Instances are created from templates, either a [`netlist::Component`] or a
//! [`netlist::Subcircuit`], that declare terminals and parameters with optional defaults.
//! Each container numbers the instances it receives, separately for each instance name.
//!
//! For example, here is a voltage divider:
//! ```
//! # use crossnet::netlist::{Circuit, Component, Directive, Template};
//! # use crossnet::io::{SpectreWriter, Writer};
//! let res = Component::with_ports("resistor", ["P", "N"]).param("r").with_tag('R');
//! let mut ckt = Circuit::new();
//! ckt += Directive::new("simulator").arg("lang", "spectre");
//! ckt += res.instantiate(vec!["IN", "OUT"], [("r", 1e3)]).unwrap();
//! ckt += res.instantiate(vec!["OUT", "0"], [("r", 1e3)]).unwrap();
//! let text = SpectreWriter::new().dump(&ckt);
//! assert_eq!(
//!     text,
//!     "simulator lang=spectre\nR1 (IN OUT) resistor r=1000.0\nR2 (OUT 0) resistor r=1000.0"
//! );
//! ```
//!
//! ## Library and documentation
//!
//! Crossnet is distributed as a library as well as a binary program.
//! The library is not stable, and the datastructures may change between versions.

#![warn(missing_docs)]

pub mod cmd;
pub mod crossbar;
pub mod error;
pub mod io;
pub mod netlist;

pub use error::{Error, Result};
