//! Generation of memristor crossbar netlists for neural network inference
//!
//! The flow goes from network data to Spectre netlists:
//! * input vectors are selected and converted to voltages ([`dac`]);
//! * weights are converted to the resistances of a positive and a negative crossbar,
//!   optionally with process variability ([`resistance`]);
//! * a netlist is generated for each input and set of resistances ([`array`], [`batch`]).

pub mod array;
pub mod batch;
pub mod dac;
mod nets;
pub mod resistance;

pub use array::Crossbar;
pub use batch::Batch;
pub use dac::{Dac, InputSelection};
pub use nets::{nets, NetNamer};
pub use resistance::{max_weight, ResistanceMap, Variability};
