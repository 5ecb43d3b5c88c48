use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use hen_app::{
    AppError, AppResult, SolveResponse, default_streamset_name, flatten_solution_report,
    format_heat, load_streamset, save_streamset,
};
use hen_payload::build_payload_si;
use hen_project::schema::{IntervalsConfig, Streamset, ThermalKind};
use hen_project::{IssueLevel, new_stream, validate_all};

#[derive(Parser)]
#[command(name = "hen-cli")]
#[command(about = "HEN streams - stream data entry and solver payloads for heat-exchanger networks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a streamset with one default hot and one default cold stream
    New {
        /// Output path (.json, .yaml or .yml)
        path: PathBuf,
        /// Streamset name (defaults to a timestamped name)
        #[arg(long)]
        name: Option<String>,
    },
    /// List the streams in a streamset
    Streams {
        /// Path to the streamset file
        path: PathBuf,
    },
    /// Validate streams and interval configuration
    Validate {
        /// Path to the streamset file
        path: PathBuf,
        /// Fail on warnings as well as errors
        #[arg(long)]
        warnings_as_errors: bool,
    },
    /// Write the SI payload sent to the solver
    Payload {
        /// Path to the streamset file
        path: PathBuf,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a saved solve response as result tables
    Report {
        /// Path to a solve response JSON file
        response_path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::New { path, name } => cmd_new(&path, name),
        Commands::Streams { path } => cmd_streams(&path),
        Commands::Validate {
            path,
            warnings_as_errors,
        } => cmd_validate(&path, warnings_as_errors),
        Commands::Payload {
            path,
            pretty,
            output,
        } => cmd_payload(&path, pretty, output.as_deref()),
        Commands::Report { response_path } => cmd_report(&response_path),
    }
}

fn cmd_new(path: &Path, name: Option<String>) -> AppResult<()> {
    let name = name.unwrap_or_else(default_streamset_name);
    let streams = vec![
        new_stream(1, ThermalKind::Hot),
        new_stream(1, ThermalKind::Cold),
    ];
    let streamset = Streamset::new(name, streams, IntervalsConfig::default());
    save_streamset(path, &streamset)?;
    println!("✓ Created {} ({})", path.display(), streamset.name);
    Ok(())
}

fn cmd_streams(path: &Path) -> AppResult<()> {
    let streamset = load_streamset(path)?;
    if streamset.streams.is_empty() {
        println!("No streams in streamset");
        return Ok(());
    }
    println!("Streams in {}:", streamset.name);
    for s in &streamset.streams {
        println!(
            "  {:<12} {:<5} {}",
            s.name,
            s.thermal.as_str(),
            s.kind.as_str()
        );
    }
    Ok(())
}

fn cmd_validate(path: &Path, warnings_as_errors: bool) -> AppResult<()> {
    println!("Validating streamset: {}", path.display());
    let streamset = load_streamset(path)?;
    let issues = validate_all(&streamset.streams, Some(&streamset.intervals_config));

    for issue in &issues {
        let owner = streamset
            .streams
            .iter()
            .find(|s| s.id == issue.stream_id)
            .map_or("intervals", |s| s.name.as_str());
        let level = match issue.level {
            IssueLevel::Error => "error",
            IssueLevel::Warn => "warn",
        };
        match &issue.field {
            Some(field) => println!("  [{level}] {owner}.{field}: {}", issue.message),
            None => println!("  [{level}] {owner}: {}", issue.message),
        }
    }

    let failing = issues
        .iter()
        .filter(|i| warnings_as_errors || i.is_error())
        .count();
    if failing > 0 {
        return Err(AppError::Blocked { errors: failing });
    }
    println!("✓ Streamset is valid");
    Ok(())
}

fn cmd_payload(path: &Path, pretty: bool, output: Option<&Path>) -> AppResult<()> {
    let streamset = load_streamset(path)?;
    let config = Some(&streamset.intervals_config);

    let errors = validate_all(&streamset.streams, config)
        .iter()
        .filter(|i| i.is_error())
        .count();
    if errors > 0 {
        tracing::warn!(errors, "Payload refused: run `validate` for details");
        return Err(AppError::Blocked { errors });
    }

    let payload = build_payload_si(&streamset.streams, config);
    let json = if pretty {
        serde_json::to_string_pretty(&payload)
    } else {
        serde_json::to_string(&payload)
    }
    .map_err(|e| AppError::Project(format!("Failed to serialize payload: {e}")))?;

    match output {
        Some(out) => {
            std::fs::write(out, json)?;
            println!("✓ Wrote payload to {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_report(response_path: &Path) -> AppResult<()> {
    let content = std::fs::read_to_string(response_path)?;
    let response: SolveResponse = serde_json::from_str(&content)?;
    let response = response.ingest();

    match response.obj_value {
        Some(v) => println!("Objective: {v}"),
        None => println!("Objective: -"),
    }

    println!();
    print!("{:<12}", "");
    for cold in &response.cold_names {
        print!("{cold:>12}");
    }
    println!();
    for hot in &response.hot_names {
        print!("{hot:<12}");
        for cold in &response.cold_names {
            let q = response.edge(hot, cold).map_or(0.0, |e| e.q_total);
            print!("{:>12}", format_heat(q));
        }
        println!();
    }

    if let Some(report) = &response.solution_report {
        println!();
        println!("Solution report:");
        for row in flatten_solution_report(report) {
            let pad = "  ".repeat(usize::from(row.indent));
            println!("{pad}{:<32}{}", row.key, row.value);
        }
    }

    if let Some(econ) = &response.economic_report {
        println!();
        println!("Economic report:");
        print!("{:<16}", "");
        for label in &econ.column_labels {
            print!("{label:>14}");
        }
        println!();
        for (label, row) in econ.row_labels.iter().zip(&econ.data) {
            print!("{label:<16}");
            for cell in row {
                print!("{cell:>14}");
            }
            println!();
        }
    }
    Ok(())
}
