//! Randomized experiment over all strategies.
//!
//! Every (algorithm, replicate) cell becomes one run; the runs are shuffled
//! with a seeded generator so slow drift on the machine does not line up with
//! any one algorithm. Each run is a single timed repetition appended to the
//! shared results file as soon as it finishes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::algorithm::{Algorithm, Tuning};
use crate::error::{Error, Result};
use crate::harness::{DEFAULT_N, LANGUAGE, default_input_paths, emit, load_inputs, time_once};
use crate::matrix::Matrix;
use crate::results::{ResultRow, append_results};
use crate::stats::Summary;

pub const DEFAULT_EXPERIMENT_CSV: &str = "results_experiment.csv";
pub const DEFAULT_EXPERIMENT_SEED: u64 = 42;
pub const DEFAULT_REPS_PER_CELL: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledRun {
    /// 1-based position in the shuffled schedule.
    pub run_id: usize,
    pub algorithm: Algorithm,
    /// 1-based replicate within the algorithm's cell.
    pub replicate: usize,
}

/// All `algorithms x reps_per_cell` runs in a seeded random order.
pub fn build_schedule(
    algorithms: &[Algorithm],
    reps_per_cell: usize,
    seed: u64,
) -> Vec<ScheduledRun> {
    let mut cells = Vec::with_capacity(algorithms.len() * reps_per_cell);
    for &algorithm in algorithms {
        for replicate in 1..=reps_per_cell {
            cells.push((algorithm, replicate));
        }
    }

    cells.shuffle(&mut StdRng::seed_from_u64(seed));

    cells
        .into_iter()
        .enumerate()
        .map(|(idx, (algorithm, replicate))| ScheduledRun {
            run_id: idx + 1,
            algorithm,
            replicate,
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct ExperimentConfig {
    pub algorithms: Vec<Algorithm>,
    pub reps_per_cell: usize,
    pub seed: u64,
    pub n: usize,
    pub a_path: PathBuf,
    pub b_path: PathBuf,
    pub csv_path: PathBuf,
    pub tuning: Tuning,
    pub language: String,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        let (a_path, b_path) = default_input_paths(DEFAULT_N);
        Self {
            algorithms: Algorithm::ALL.to_vec(),
            reps_per_cell: DEFAULT_REPS_PER_CELL,
            seed: DEFAULT_EXPERIMENT_SEED,
            n: DEFAULT_N,
            a_path,
            b_path,
            csv_path: PathBuf::from(DEFAULT_EXPERIMENT_CSV),
            tuning: Tuning::default(),
            language: LANGUAGE.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExperimentReport {
    pub schedule: Vec<ScheduledRun>,
    /// One row per run, in execution order.
    pub rows: Vec<ResultRow>,
    /// Per-algorithm summaries in `config.algorithms` order.
    pub summaries: Vec<(Algorithm, Summary)>,
}

pub fn run_experiment(config: &ExperimentConfig, out: &mut dyn Write) -> Result<ExperimentReport> {
    if config.n == 0 {
        return Err(Error::Config("matrix dimension must be at least 1".into()));
    }
    config.tuning.validate()?;
    ensure_parent_dir(&config.csv_path)?;

    let schedule = build_schedule(&config.algorithms, config.reps_per_cell, config.seed);
    emit(
        out,
        format_args!("Experiment schedule created with {} runs.", schedule.len()),
    )?;
    emit(
        out,
        format_args!("Results will be appended to: {}", config.csv_path.display()),
    )?;
    emit(out, format_args!("Random seed: {}\n", config.seed))?;
    debug!(runs = schedule.len(), seed = config.seed, "built schedule");

    let (a, b) = load_inputs(&config.a_path, &config.b_path, config.n)?;
    let mut c = Matrix::zeros(config.n);

    let mut rows = Vec::with_capacity(schedule.len());
    for run in &schedule {
        emit(
            out,
            format_args!(
                "=== Global run {:03} | language={} | algorithm={} | replicate={} ===",
                run.run_id, config.language, run.algorithm, run.replicate
            ),
        )?;
        let t = time_once(run.algorithm, &a, &b, &mut c, config.tuning);
        emit(out, format_args!("Rep 1: {t:.6} s"))?;

        let row = ResultRow::new(config.language.as_str(), run.algorithm.name(), config.n, 1, t);
        append_results(&config.csv_path, std::slice::from_ref(&row))?;
        rows.push(row);
    }

    let summaries: Vec<(Algorithm, Summary)> = config
        .algorithms
        .iter()
        .map(|&algorithm| {
            let times: Vec<f64> = rows
                .iter()
                .filter(|row| row.algorithm == algorithm.name())
                .map(|row| row.time_s)
                .collect();
            (algorithm, Summary::from_samples(&times))
        })
        .collect();

    emit(out, format_args!("\nAll runs completed."))?;
    for (algorithm, summary) in &summaries {
        emit(out, format_args!("\n{algorithm}:"))?;
        for line in summary.report_lines() {
            emit(out, format_args!("{line}"))?;
        }
    }

    info!(runs = rows.len(), "experiment finished");
    Ok(ExperimentReport {
        schedule,
        rows,
        summaries,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{scratch_dir, write_inputs};

    #[test]
    fn schedule_covers_every_cell_once() {
        let schedule = build_schedule(&Algorithm::ALL, 4, 42);
        assert_eq!(schedule.len(), 12);

        let ids: Vec<usize> = schedule.iter().map(|run| run.run_id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());

        for algorithm in Algorithm::ALL {
            let mut replicates: Vec<usize> = schedule
                .iter()
                .filter(|run| run.algorithm == algorithm)
                .map(|run| run.replicate)
                .collect();
            replicates.sort_unstable();
            assert_eq!(replicates, vec![1, 2, 3, 4], "{algorithm}");
        }
    }

    #[test]
    fn schedule_is_reproducible() {
        assert_eq!(
            build_schedule(&Algorithm::ALL, 10, 42),
            build_schedule(&Algorithm::ALL, 10, 42)
        );
        assert_ne!(
            build_schedule(&Algorithm::ALL, 10, 42),
            build_schedule(&Algorithm::ALL, 10, 43)
        );
    }

    #[test]
    fn empty_schedule() {
        assert!(build_schedule(&Algorithm::ALL, 0, 1).is_empty());
        assert!(build_schedule(&[], 5, 1).is_empty());
    }

    #[test]
    fn runs_append_one_row_each() {
        let dir = scratch_dir("experiment");
        let (a_path, b_path) = write_inputs(&dir, 8);
        let config = ExperimentConfig {
            reps_per_cell: 2,
            n: 8,
            a_path,
            b_path,
            csv_path: dir.join("nested").join("results.csv"),
            tuning: Tuning {
                block_size: 3,
                leaf_size: 2,
            },
            ..ExperimentConfig::default()
        };

        let mut console: Vec<u8> = Vec::new();
        let report = run_experiment(&config, &mut console).unwrap();

        assert_eq!(report.rows.len(), 6);
        assert!(report.rows.iter().all(|row| row.rep == 1 && row.n == 8));
        for (row, run) in report.rows.iter().zip(&report.schedule) {
            assert_eq!(row.algorithm, run.algorithm.name());
        }
        assert_eq!(report.summaries.len(), 3);
        assert!(report.summaries.iter().all(|(_, s)| !s.mean.is_nan()));

        let text = fs::read_to_string(&config.csv_path).unwrap();
        assert_eq!(text.lines().count(), 7);

        let console = String::from_utf8(console).unwrap();
        assert!(console.contains("Experiment schedule created with 6 runs."));
        assert!(console.contains("=== Global run 006 | language=Rust"));
        assert!(console.contains("All runs completed."));
    }
}
