//! File-level steps of the crossbar flow
//!
//! Files are named after a common prefix:
//! * selected input vectors in `<prefix>_<i>.csv`;
//! * resistances in `<prefix>.csv` and `<prefix>_neg.csv`;
//! * process variability generations in `<prefix><j>.csv` and `<prefix>_neg_<j>.csv`;
//! * netlists in `<netlists>/netlist_no_PV<i>` and `<netlists>/PV/netlist_input_<i>res_<j>`.

use std::fs;
use std::path::{Path, PathBuf};

use kdam::{tqdm, BarExt};
use rand::Rng;
use tracing::info;

use crate::crossbar::{Crossbar, Dac, InputSelection, ResistanceMap, Variability};
use crate::io::write_rows_file;
use crate::Result;

/// File holding the i-th selected input vector
pub fn input_file(prefix: &str, i: usize) -> PathBuf {
    PathBuf::from(format!("{}_{}.csv", prefix, i))
}

/// Positive and negative resistance files, without variability
pub fn resistance_files(prefix: &str) -> (PathBuf, PathBuf) {
    (
        PathBuf::from(format!("{}.csv", prefix)),
        PathBuf::from(format!("{}_neg.csv", prefix)),
    )
}

/// Positive and negative resistance files of the j-th variability generation
pub fn variability_files(prefix: &str, j: usize) -> (PathBuf, PathBuf) {
    (
        PathBuf::from(format!("{}{}.csv", prefix, j)),
        PathBuf::from(format!("{}_neg_{}.csv", prefix, j)),
    )
}

/// Select input vectors, convert them to voltages and write one file per vector
///
/// Returns the number of files written.
pub fn write_inputs(
    rows: &[Vec<f64>],
    selection: &InputSelection,
    dac: &Dac,
    prefix: &str,
) -> Result<usize> {
    dac.check()?;
    let selected = selection.select(rows);
    for (i, row) in selected.iter().enumerate() {
        write_rows_file(&input_file(prefix, i), &[dac.convert_row(row)])?;
    }
    info!("Wrote {} input vectors", selected.len());
    Ok(selected.len())
}

/// Convert weights to the resistance files of the positive and negative crossbars
pub fn write_resistances(
    weights: &[Vec<f64>],
    map: &ResistanceMap,
    positive: &Path,
    negative: &Path,
) -> Result<()> {
    let (pos, neg) = map.split(weights);
    write_rows_file(positive, &pos)?;
    write_rows_file(negative, &neg)?;
    info!(
        "Wrote resistances to {} and {}",
        positive.display(),
        negative.display()
    );
    Ok(())
}

/// Write several noisy copies of the resistance files
pub fn write_variability<R: Rng>(
    positive: &[Vec<f64>],
    negative: &[Vec<f64>],
    variability: &Variability,
    generations: usize,
    prefix: &str,
    rng: &mut R,
) -> Result<()> {
    let mut progress = tqdm!(total = generations);
    progress.set_description("Generations");
    for j in 0..generations {
        let (pos_file, neg_file) = variability_files(prefix, j);
        write_rows_file(&pos_file, &variability.apply(positive, rng))?;
        write_rows_file(&neg_file, &variability.apply(negative, rng))?;
        progress.update(1)?;
    }
    progress.write(format!(
        "Wrote {} process variability generations with sigma={}",
        generations, variability.sigma
    ))?;
    Ok(())
}

/// A single netlist to generate
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    /// Input vector file
    pub inputs: PathBuf,
    /// Resistances of the positive crossbar
    pub positive: PathBuf,
    /// Resistances of the negative crossbar
    pub negative: PathBuf,
    /// Netlist to write
    pub output: PathBuf,
}

/// Generation of the netlists for all inputs, with and without process variability
#[derive(Clone, Debug)]
pub struct Batch {
    /// Crossbar shape
    pub crossbar: Crossbar,
    /// Prefix of the input vector files
    pub inputs: String,
    /// Number of input vector files
    pub nb_inputs: usize,
    /// Resistances of the positive crossbar, without variability
    pub positive: PathBuf,
    /// Resistances of the negative crossbar, without variability
    pub negative: PathBuf,
    /// Prefix of the process variability files
    pub variability: String,
    /// Number of process variability generations
    pub nb_generations: usize,
    /// Output directory
    pub netlists: PathBuf,
}

impl Batch {
    /// Directory for netlists with process variability
    fn variability_dir(&self) -> PathBuf {
        self.netlists.join("PV")
    }

    /// List the netlists to generate: first without variability, then for each
    /// input and generation
    pub fn jobs(&self) -> Vec<Job> {
        let mut ret = Vec::new();
        for i in 0..self.nb_inputs {
            ret.push(Job {
                inputs: input_file(&self.inputs, i),
                positive: self.positive.clone(),
                negative: self.negative.clone(),
                output: self.netlists.join(format!("netlist_no_PV{}", i)),
            });
        }
        for i in 0..self.nb_inputs {
            for j in 0..self.nb_generations {
                let (positive, negative) = variability_files(&self.variability, j);
                ret.push(Job {
                    inputs: input_file(&self.inputs, i),
                    positive,
                    negative,
                    output: self
                        .variability_dir()
                        .join(format!("netlist_input_{}res_{}", i, j)),
                });
            }
        }
        ret
    }

    /// Generate all netlists, creating the output directories
    pub fn run(&self) -> Result<()> {
        if self.nb_generations > 0 {
            fs::create_dir_all(self.variability_dir())?;
        } else {
            fs::create_dir_all(&self.netlists)?;
        }
        let jobs = self.jobs();
        let mut progress = tqdm!(total = jobs.len());
        progress.set_description("Netlists");
        for job in &jobs {
            self.crossbar
                .generate_file(&job.inputs, &job.positive, &job.negative, &job.output)?;
            progress.update(1)?;
        }
        progress.write(format!(
            "Generated {} netlists in {}",
            jobs.len(),
            self.netlists.display()
        ))?;
        Ok(())
    }
}
