//! Address-translation trainer CLI.
//!
//! This binary is the presentation layer over the exercise engine. It performs:
//! 1. **Generate:** print one exercise's TLB and page tables, optionally with
//!    the answer key or a JSON dump.
//! 2. **Quiz:** an interactive loop that renders the tables, prompts for every
//!    quiz field, grades the submission, and reports a session summary.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

use vmtrain_core::{
    DisplayBase, Exercise, ExerciseKind, Field, GeneratorConfig, SessionStats, Submission,
    XorShift64, is_correct, is_submission_correct,
};

#[derive(Parser, Debug)]
#[command(
    name = "vmtrain",
    author,
    version,
    about = "Virtual-memory address-translation trainer",
    long_about = "Generate randomized TLB/page-table exercises and grade your answers.\n\nExamples:\n  vmtrain gen --answers\n  vmtrain gen --kind page-fault --base binary --json\n  vmtrain quiz --rounds 5 --seed 42"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one exercise and print its tables.
    Gen {
        #[command(flatten)]
        opts: ExerciseOpts,

        /// Also print the answer key.
        #[arg(long)]
        answers: bool,

        /// Dump the full exercise (geometry, tables, key) as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Interactive quiz: answer every field, get graded.
    Quiz {
        #[command(flatten)]
        opts: ExerciseOpts,

        /// Number of exercises in the session.
        #[arg(long, default_value_t = 1)]
        rounds: u32,
    },
}

/// Options shared by both subcommands.
#[derive(Args, Debug)]
struct ExerciseOpts {
    /// Scenario to build; `random` picks one per exercise.
    #[arg(long, value_enum, default_value = "random")]
    kind: KindArg,

    /// Display base for quiz values.
    #[arg(long, value_enum, default_value = "hex")]
    base: BaseArg,

    /// RNG seed for reproducible exercises.
    #[arg(long)]
    seed: Option<u64>,

    /// Generator configuration JSON (draw ranges); defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    TlbHit,
    PageHit,
    PageFault,
    Random,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BaseArg {
    Binary,
    Decimal,
    Hex,
}

impl From<BaseArg> for DisplayBase {
    fn from(arg: BaseArg) -> Self {
        match arg {
            BaseArg::Binary => Self::Binary,
            BaseArg::Decimal => Self::Decimal,
            BaseArg::Hex => Self::Hexadecimal,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Gen {
            opts,
            answers,
            json,
        } => cmd_gen(&opts, answers, json),
        Commands::Quiz { opts, rounds } => cmd_quiz(&opts, rounds),
    }
}

/// Loads the generator configuration, or defaults when no file is given.
fn load_config(path: Option<&PathBuf>) -> GeneratorConfig {
    let Some(path) = path else {
        return GeneratorConfig::default();
    };
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {}: {}", path.display(), e);
        process::exit(1);
    });
    GeneratorConfig::from_json(&json).unwrap_or_else(|e| {
        eprintln!("Error in config {}: {}", path.display(), e);
        process::exit(1);
    })
}

/// Builds the RNG, seeded when requested.
fn make_rng(seed: Option<u64>) -> XorShift64 {
    seed.map_or_else(
        || {
            // No reproducibility requested: fold the clock into the seed.
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0, |d| u64::from(d.subsec_nanos()) ^ d.as_secs());
            XorShift64::seeded(nanos)
        },
        XorShift64::seeded,
    )
}

/// Resolves the kind argument, drawing one at random when asked.
fn resolve_kind(arg: KindArg, rng: &mut XorShift64) -> ExerciseKind {
    match arg {
        KindArg::TlbHit => ExerciseKind::TlbHit,
        KindArg::PageHit => ExerciseKind::PageHit,
        KindArg::PageFault => ExerciseKind::PageFault,
        KindArg::Random => ExerciseKind::random(rng),
    }
}

fn generate(opts: &ExerciseOpts, rng: &mut XorShift64) -> Exercise {
    let config = load_config(opts.config.as_ref());
    let kind = resolve_kind(opts.kind, rng);
    Exercise::generate(kind, opts.base.into(), &config, rng).unwrap_or_else(|e| {
        eprintln!("Error generating exercise: {e}");
        process::exit(1);
    })
}

fn cmd_gen(opts: &ExerciseOpts, answers: bool, json: bool) {
    let mut rng = make_rng(opts.seed);
    let exercise = generate(opts, &mut rng);

    if json {
        match serde_json::to_string_pretty(&exercise) {
            Ok(dump) => println!("{dump}"),
            Err(e) => {
                eprintln!("Error serializing exercise: {e}");
                process::exit(1);
            }
        }
        return;
    }

    render_exercise(&exercise);
    if answers {
        println!();
        println!("Answer key:");
        for field in Field::ALL {
            let value = exercise.key.field(field);
            if !value.is_empty() {
                println!("  {:<18} {}", format!("{field}:"), value);
            }
        }
    }
}

fn cmd_quiz(opts: &ExerciseOpts, rounds: u32) {
    let mut rng = make_rng(opts.seed);
    let mut stats = SessionStats::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    for round in 1..=rounds {
        let exercise = generate(opts, &mut rng);
        stats.record_generated(exercise.kind);

        println!();
        println!("=== Exercise {round}/{rounds} ===");
        render_exercise(&exercise);
        println!();
        println!("Answer each field. Leave PPN/Physical address blank to skip them.");

        let submission = collect_submission(&mut lines);
        let missed: Vec<Field> = Field::ALL
            .iter()
            .copied()
            .filter(|&f| {
                let skipped = f.is_optional() && !submission.touched(f);
                !skipped && !is_correct(f, submission.value(f), &exercise.key)
            })
            .collect();
        let correct = is_submission_correct(&submission, &exercise.key);
        stats.record_graded(correct, &missed);

        println!();
        if correct {
            println!("Correct!");
        } else {
            println!("Not quite:");
            for field in missed {
                println!(
                    "  {:<18} expected `{}`, got `{}`",
                    format!("{field}:"),
                    exercise.key.field(field),
                    submission.value(field)
                );
            }
        }
    }

    println!();
    stats.print();
}

/// Prompts for every non-reserved quiz field.
///
/// Blank input on an optional field leaves it untouched (skipped); blank
/// input on a mandatory field is recorded as an empty answer.
fn collect_submission(lines: &mut impl Iterator<Item = io::Result<String>>) -> Submission {
    let mut submission = Submission::new();
    for field in Field::ALL {
        // The reserved field stays untouched; grading skips it.
        if field == Field::PageHit {
            continue;
        }
        let answer = prompt(&format!("  {field}"), lines);
        if answer.is_empty() && field.is_optional() {
            continue;
        }
        submission.enter(field, answer);
    }
    submission
}

fn prompt(label: &str, lines: &mut impl Iterator<Item = io::Result<String>>) -> String {
    print!("{label}: ");
    if io::stdout().flush().is_err() {
        process::exit(1);
    }
    match lines.next() {
        Some(Ok(line)) => line.trim().to_owned(),
        _ => {
            eprintln!("\nInput closed; aborting.");
            process::exit(1);
        }
    }
}

/// Renders the exercise header and both tables, values in the chosen base
/// with its prefix.
fn render_exercise(exercise: &Exercise) {
    let base = exercise.base;
    let config = &exercise.config;
    let show = |value: u64| format!("{}{}", base.prefix(), base.render(value));

    println!(
        "Virtual address: {}  ({} bits; page size {}, {} TLB sets x {} ways)",
        show(exercise.vaddr.val()),
        config.va_width(),
        config.page_size(),
        config.tlb_sets(),
        config.tlb_ways(),
    );

    println!();
    println!("TLB");
    print!("{:>4}", "Set");
    for _ in 0..config.tlb_ways() {
        print!("  {:>6} {:>6} {:>5}", "Tag", "PPN", "Valid");
    }
    println!();
    for set in 0..exercise.tlb.sets() {
        print!("{set:>4}");
        for entry in exercise.tlb.row(set) {
            print!(
                "  {:>6} {:>6} {:>5}",
                show(entry.tag),
                show(entry.ppn),
                u8::from(entry.valid)
            );
        }
        println!();
    }

    println!();
    println!("Page table");
    for _ in 0..config.page_table_cols() {
        print!("  {:>6} {:>6} {:>5}", "VPN", "PPN", "Valid");
    }
    println!();
    for row in 0..exercise.page_table.rows() {
        for entry in exercise.page_table.row(row) {
            print!(
                "  {:>6} {:>6} {:>5}",
                show(entry.vpn),
                show(entry.ppn),
                u8::from(entry.valid)
            );
        }
        println!();
    }
}
