use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tsharp_lang::{compile, Evaluator, Limits, RunFailure, RunResult, Severity};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a T# script")]
struct Cli {
    /// Script file to run
    script: PathBuf,

    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Dump the parsed program before running it
    #[arg(long)]
    ast: bool,

    /// Step budget (statements plus loop-condition checks)
    #[arg(long, default_value_t = Limits::default().max_steps)]
    max_steps: u64,

    /// Maximum nesting of user-function calls
    #[arg(long, default_value_t = Limits::default().max_call_depth)]
    max_depth: usize,

    /// Log interpreter activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let source = std::fs::read_to_string(&cli.script)
        .with_context(|| format!("reading {}", cli.script.display()))?;
    log::info!("loaded {} ({} bytes)", cli.script.display(), source.len());

    let limits = Limits { max_steps: cli.max_steps, max_call_depth: cli.max_depth };
    match execute(&source, limits, cli.ast) {
        Ok(result) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&failure_json(&failure))?);
            } else {
                print_failure(&failure);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn execute(source: &str, limits: Limits, dump_ast: bool) -> Result<RunResult, RunFailure> {
    let program = compile(source)?;
    if dump_ast {
        eprintln!("{program:#?}");
    }
    Evaluator::with_limits(limits).run(&program)
}

// ─── Text report ──────────────────────────────────────────────────────────────

fn print_lines(lines: &[tsharp_lang::OutputLine]) {
    for line in lines {
        match line.severity {
            Severity::Info  => println!("{}", line.text),
            Severity::Error => eprintln!("{}", line.text),
            other           => println!("[{other}] {}", line.text),
        }
    }
}

fn print_series(series: &[tsharp_lang::PointSeries]) {
    for (i, s) in series.iter().enumerate() {
        let params: Vec<String> = s.params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        println!("series {}: {} ({} points; {})", i + 1, s.label, s.points.len(), params.join(", "));
    }
}

fn print_result(result: &RunResult) {
    print_lines(&result.output);
    print_series(&result.series);

    if result.objects.is_empty() { return; }
    println!("objects:");
    for o in &result.objects {
        let [x, y, z] = o.position;
        let [rx, ry, rz] = o.rotation;
        println!(
            "  #{:<4} {:<10} pos ({x}, {y}, {z})  rot ({rx}, {ry}, {rz})  {}",
            o.id, o.kind, if o.alive { "alive" } else { "destroyed" }
        );
    }
}

fn print_failure(failure: &RunFailure) {
    print_lines(&failure.output);
    print_series(&failure.series);
}

fn failure_json(failure: &RunFailure) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "kind": failure.error.name(),
            "line": failure.error.line,
            "message": failure.error.message(),
        },
        "output": failure.output,
        "series": failure.series,
    })
}
