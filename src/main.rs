//! N-Queens Solution Counter
//!
//! Counts the solutions of the N-queens puzzle for one board size. Canonical
//! preplacements of the outer ring are generated first, then completed in
//! parallel; the per-class counts are weighted by orbit size and summed.

use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use queens::preplace::{PreplaceVisitor, Ring};
use queens::reference::known_solutions;
use queens::{runtime, solver};
use queens::{BitBoard, BoardSize, CompactBoard, Preplacements, Preplacer, SymmetryClass};

/// Counts the solutions of the N-queens puzzle.
#[derive(Parser)]
#[command(name = "queens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Size of the board [5..32].
    #[arg(short = 'N', long = "boardsize")]
    boardsize: u8,

    /// Worker threads for counting (default: environment hints, then all cores).
    #[arg(short, long)]
    threads: Option<usize>,

    /// Stop after generating the preplacements.
    #[arg(long)]
    preplace_only: bool,

    /// Hide progress bars.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let size = BoardSize::new(cli.boardsize)?;

    let preplacer = Preplacer::new(size);
    let preplacements = run_preplace(&preplacer, cli.quiet)?;
    if cli.preplace_only {
        return Ok(());
    }

    let threads = runtime::configure_thread_pool(cli.threads)?;
    eprintln!("[threads] rayon pool = {} threads (from {})", threads.count, threads.source);
    let total = run_solver(size, &preplacements, cli.quiet)?;
    check_reference(size, total)
}

/// Creates a progress bar, hidden when `quiet`.
fn progress_bar(len: u64, quiet: bool, unit: &str) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template(&format!("[{{elapsed_precise}}] {{bar:40}} {{pos}}/{{len}} {unit}"))?
            .progress_chars("=>-"),
    );
    Ok(bar)
}

/// Collects preplacements while advancing a bar per west pair.
struct WestProgress<'a> {
    bar: ProgressBar,
    preplacements: &'a mut Preplacements,
}

impl PreplaceVisitor for WestProgress<'_> {
    fn west(&mut self, index: usize, _bound: usize) {
        self.bar.set_position(index as u64);
    }

    fn accept(&mut self, ring: Ring, class: SymmetryClass, board: &BitBoard) {
        self.preplacements.accept(ring, class, board);
    }
}

/// Generates the preplacements and prints their statistics.
fn run_preplace(preplacer: &Preplacer, quiet: bool) -> Result<Preplacements> {
    println!("Running with boardsize: {}", preplacer.size());
    let pairs = preplacer.pairs();
    let bound = pairs.west_bound();
    let (a, b) = pairs.get(bound);
    println!("First side bound: ({a}, {b}) at pair {bound} of {}", pairs.len());

    let start = Instant::now();
    let mut preplacements = Preplacements::default();
    let bar = progress_bar(bound as u64 + 1, quiet, "west pairs")?;
    preplacer.visit(&mut WestProgress {
        bar: bar.clone(),
        preplacements: &mut preplacements,
    });
    bar.finish_and_clear();
    let elapsed = start.elapsed().as_secs_f64();

    println!("Preplaced boards:");
    for (class, boards) in preplacements.iter() {
        println!("{:<6}: {}", class.name(), boards.len());
    }
    println!("------");
    println!("TOTAL : {}", preplacements.len());
    println!(
        "Memory: {} bytes",
        preplacements.len() * std::mem::size_of::<CompactBoard>()
    );
    println!("Time  : {elapsed:.3} seconds");
    println!();

    Ok(preplacements)
}

/// Counts the completions of all preplacements and prints the weighted
/// solution counts.
fn run_solver(size: BoardSize, preplacements: &Preplacements, quiet: bool) -> Result<u128> {
    let start = Instant::now();
    let bar = progress_bar(preplacements.len() as u64, quiet, "boards")?;
    let tally = solver::count_preplacements(preplacements, size, || bar.inc(1));
    bar.finish_and_clear();
    let elapsed = start.elapsed().as_secs_f64();

    let total = tally.total();
    println!("Solutions:");
    for class in SymmetryClass::ALL {
        println!("{:<6}: {}", class.name(), tally.weighted(class));
    }
    println!("------");
    println!("TOTAL : {total}");
    println!(
        "Time  : {elapsed:.3} seconds, Solutions/s {:.3}",
        total as f64 / elapsed.max(f64::EPSILON)
    );

    Ok(total)
}

/// Compares `total` with the known solution count, if there is one.
fn check_reference(size: BoardSize, total: u128) -> Result<()> {
    match known_solutions(size.get()) {
        Some(expected) if u128::from(expected) == total => {
            println!("PASS");
            Ok(())
        }
        Some(expected) => {
            println!("FAIL");
            bail!("expected {expected} solutions for n={size}, counted {total}");
        }
        None => {
            println!("No reference count for n={size}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_requires_boardsize() {
        assert!(Cli::try_parse_from(["queens"]).is_err());
        let cli = Cli::try_parse_from(["queens", "-N", "8", "-t", "2"]).unwrap();
        assert_eq!(cli.boardsize, 8);
        assert_eq!(cli.threads, Some(2));
        assert!(!cli.preplace_only);
    }

    #[test]
    fn test_small_boardsize_is_rejected() {
        let cli = Cli::try_parse_from(["queens", "--boardsize", "3"]).unwrap();
        assert!(BoardSize::new(cli.boardsize).is_err());
    }

    #[test]
    fn test_reference_check() {
        let size = BoardSize::new(8).unwrap();
        assert!(check_reference(size, 92).is_ok());
        assert!(check_reference(size, 91).is_err());
        assert!(check_reference(BoardSize::new(30).unwrap(), 1).is_ok());
    }
}
