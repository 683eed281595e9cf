//! Command line interface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

use crate::crossbar::batch::{resistance_files, write_inputs, write_resistances, write_variability};
use crate::crossbar::{Batch, Crossbar, Dac, InputSelection, ResistanceMap, Variability};
use crate::io::{read_rows_file, write_rows_file, Rows};
use crate::Result;

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show debug messages
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Select input vectors and convert them to voltages
    ///
    /// Keeps the first vectors with enough non-zero values, quantizes them on the given number
    /// of bits and maps them to the voltage range. Each vector is written to its own file,
    /// named <output>_<i>.csv.
    #[clap()]
    Inputs(InputsArgs),

    /// Convert network weights to crossbar resistances
    ///
    /// The weights are split between a positive and a negative crossbar, written to
    /// <output>.csv and <output>_neg.csv. A zero means that no resistor is placed.
    /// Optionally, generate copies with random process variability.
    #[clap(alias = "res")]
    Resistances(ResistancesArgs),

    /// Generate the netlist of a crossbar
    ///
    /// Uses the first line of the input file as input voltages, and one line of each
    /// resistance file for each input.
    #[clap()]
    Netlist(NetlistArgs),

    /// Generate the netlists for all inputs, with and without process variability
    #[clap()]
    Batch(BatchArgs),

    /// Swap rows and columns of a file
    #[clap()]
    Transpose(TransposeArgs),
}

impl Commands {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        match self {
            Commands::Inputs(a) => a.run(),
            Commands::Resistances(a) => a.run(),
            Commands::Netlist(a) => a.run(),
            Commands::Batch(a) => a.run(),
            Commands::Transpose(a) => a.run(),
        }
    }
}

/// Shape of the crossbar
#[derive(Args)]
pub struct CrossbarArgs {
    /// Number of inputs
    #[arg(long, default_value_t = 784)]
    rows: usize,

    /// Number of outputs
    #[arg(long, default_value_t = 100)]
    cols: usize,

    /// Name of the crossbar subcircuit
    #[arg(long, default_value = "mnist_grid")]
    name: String,
}

impl CrossbarArgs {
    fn crossbar(&self) -> Crossbar {
        Crossbar {
            name: self.name.clone(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

/// Command arguments for input selection
#[derive(Args)]
pub struct InputsArgs {
    /// File with one input vector per line, with values between 0 and 1
    file: PathBuf,

    /// Prefix of the output files
    #[arg(short = 'o', long, default_value = "INPUTS/inputs")]
    output: String,

    /// Number of vectors to keep
    #[arg(short = 'n', long, default_value_t = 20)]
    count: usize,

    /// Keep only vectors with more non-zero values
    #[arg(long, default_value_t = 100)]
    min_nonzero: usize,

    /// Resolution of the digital to analog conversion, from 1 to 63 bits
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=63))]
    bits: u32,

    /// Lowest voltage
    #[arg(long, default_value_t = -3.0, allow_negative_numbers = true)]
    lower: f64,

    /// Highest voltage
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    upper: f64,
}

impl InputsArgs {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        let rows = read_rows_file(&self.file)?;
        let selection = InputSelection {
            count: self.count,
            min_nonzero: self.min_nonzero,
        };
        let dac = Dac::new(self.bits, self.lower, self.upper)?;
        let written = write_inputs(&rows, &selection, &dac, &self.output)?;
        if written < self.count {
            info!(
                "Only {} vectors out of {} have more than {} non-zero values",
                written,
                rows.len(),
                self.min_nonzero
            );
        }
        Ok(())
    }
}

/// Command arguments for resistance conversion
#[derive(Args)]
pub struct ResistancesArgs {
    /// File with the weights, one line per input
    file: PathBuf,

    /// Prefix of the output files
    #[arg(short = 'o', long, default_value = "RESISTANCES/resistances")]
    output: String,

    /// Resistance for the largest weight
    #[arg(long, default_value_t = 1e4)]
    rmin: f64,

    /// Resistance for a zero weight
    #[arg(long, default_value_t = 1e6)]
    rmax: f64,

    /// Number of process variability generations
    #[arg(long, default_value_t = 0)]
    variability: usize,

    /// Prefix of the process variability files
    #[arg(long, default_value = "RESISTANCES/processvariability")]
    variability_prefix: String,

    /// Standard deviation of the variability, relative to the resistance range
    #[arg(long, default_value_t = 0.03)]
    sigma_ratio: f64,

    /// Seed for the process variability
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

impl ResistancesArgs {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        let weights = read_rows_file(&self.file)?;
        let map = ResistanceMap {
            rmin: self.rmin,
            rmax: self.rmax,
        };
        let (positive, negative) = resistance_files(&self.output);
        write_resistances(&weights, &map, &positive, &negative)?;
        if self.variability > 0 {
            let mut rng = SmallRng::seed_from_u64(self.seed);
            write_variability(
                &read_rows_file(&positive)?,
                &read_rows_file(&negative)?,
                &Variability::relative(&map, self.sigma_ratio),
                self.variability,
                &self.variability_prefix,
                &mut rng,
            )?;
        }
        Ok(())
    }
}

/// Command arguments for netlist generation
#[derive(Args)]
pub struct NetlistArgs {
    /// File containing the input voltages
    input_file: PathBuf,

    /// File containing the positive resistances
    resistor_file: PathBuf,

    /// File containing the negative resistances
    resistor_neg_file: PathBuf,

    /// Output netlist
    netlist: PathBuf,

    #[command(flatten)]
    crossbar: CrossbarArgs,
}

impl NetlistArgs {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        self.crossbar.crossbar().generate_file(
            &self.input_file,
            &self.resistor_file,
            &self.resistor_neg_file,
            &self.netlist,
        )
    }
}

/// Command arguments for batch netlist generation
#[derive(Args)]
pub struct BatchArgs {
    /// Prefix of the input vector files
    #[arg(long, default_value = "INPUTS/inputs")]
    inputs: String,

    /// Number of input vector files
    #[arg(long, default_value_t = 20)]
    nb_inputs: usize,

    /// Prefix of the resistance files
    #[arg(long, default_value = "RESISTANCES/resistances")]
    resistances: String,

    /// Prefix of the process variability files
    #[arg(long, default_value = "RESISTANCES/processvariability")]
    variability_prefix: String,

    /// Number of process variability generations
    #[arg(long, default_value_t = 20)]
    variability: usize,

    /// Output directory
    #[arg(long, default_value = "NETLISTS")]
    netlists: PathBuf,

    #[command(flatten)]
    crossbar: CrossbarArgs,
}

impl BatchArgs {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        let (positive, negative) = resistance_files(&self.resistances);
        let batch = Batch {
            crossbar: self.crossbar.crossbar(),
            inputs: self.inputs.clone(),
            nb_inputs: self.nb_inputs,
            positive,
            negative,
            variability: self.variability_prefix.clone(),
            nb_generations: self.variability,
            netlists: self.netlists.clone(),
        };
        batch.run()
    }
}

/// Command arguments for transposition
#[derive(Args)]
pub struct TransposeArgs {
    /// File to transpose
    file: PathBuf,

    /// Output file
    #[arg(short = 'o', long)]
    output: PathBuf,
}

impl TransposeArgs {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        let rows = Rows::read(&self.file)?;
        let t = rows.transpose()?;
        write_rows_file(&self.output, &t)?;
        info!(
            "Transposed {}x{} values to {}",
            rows.rows.len(),
            t.len(),
            self.output.display()
        );
        Ok(())
    }
}
