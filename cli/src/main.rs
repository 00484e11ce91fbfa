mod error_formatter;
mod formatter;
mod interactive;
mod server;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use formatter::Formatter;
use mamdani::{load_knowledge, parse_inputs, DomainPolicy, Engine, MamdaniError, ResourceLimits};
use std::fs;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mamdani")]
#[command(about = "Fuzzy inference that scores what is hard to measure.")]
#[command(
    long_about = "Mamdani scores a composite condition from crisp indicators using fuzzy rules.\nThe CLI evaluates inputs against a JSON knowledge file, shows what the knowledge contains, or serves evaluations over HTTP."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct KnowledgeArgs {
    /// JSON knowledge file with variables, rules and categories
    #[arg(
        short = 'k',
        long = "knowledge",
        env = "MAMDANI_KNOWLEDGE",
        default_value = "knowledge/economy.json"
    )]
    knowledge: PathBuf,
    /// Fail on inputs outside their variable's universe instead of clamping them
    #[arg(long)]
    reject_out_of_range: bool,
    /// How far outside the universe an input may lie before it is rejected
    #[arg(long, default_value_t = 0.0, requires = "reject_out_of_range")]
    tolerance: f64,
}

impl KnowledgeArgs {
    fn policy(&self) -> DomainPolicy {
        if self.reject_out_of_range {
            DomainPolicy::Reject {
                tolerance: self.tolerance,
            }
        } else {
            DomainPolicy::Clamp
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate crisp inputs and display the score (try: inflation=4.5)
    ///
    /// Loads the knowledge file, fuzzifies every input, fires the rules and
    /// prints the defuzzified score with its category.
    Run {
        /// Crisp inputs (format: name=value)
        ///
        /// Examples: inflation=4.5 unemployment=6 hdi=0.72
        #[arg(value_name = "NAME=VALUE")]
        inputs: Vec<String>,
        #[command(flatten)]
        knowledge: KnowledgeArgs,
        /// Output the score and category only (for piping to other tools)
        #[arg(short = 'r', long, conflicts_with = "json")]
        raw: bool,
        /// Output the full evaluation trace as JSON
        #[arg(long)]
        json: bool,
        /// Prompt for every input that was not given on the command line
        #[arg(short = 'i', long)]
        interactive: bool,
        /// Score to report when no rule fires, instead of failing
        #[arg(long, value_name = "SCORE")]
        fallback: Option<f64>,
    },
    /// Show the variables, rules and categories of a knowledge file
    Show {
        #[command(flatten)]
        knowledge: KnowledgeArgs,
    },
    /// Start HTTP REST API server (default: localhost:3000)
    ///
    /// Serves evaluations of one knowledge file over HTTP.
    /// API: POST /evaluate with {"inputs": {name: value}}
    Server {
        #[command(flatten)]
        knowledge: KnowledgeArgs,
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port number to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run {
            inputs,
            knowledge,
            raw,
            json,
            interactive,
            fallback,
        } => {
            init_logging("mamdani=warn");
            run_command(knowledge, inputs, *raw, *json, *interactive, *fallback)
        }
        Commands::Show { knowledge } => {
            init_logging("mamdani=warn");
            show_command(knowledge)
        }
        Commands::Server {
            knowledge,
            host,
            port,
        } => {
            init_logging("mamdani=info,tower_http=info");
            server_command(knowledge, host, *port)
        }
    };

    if let Err(e) = result {
        // Render engine errors with source context, otherwise use default
        if let Some(mamdani_err) = e.downcast_ref::<MamdaniError>() {
            eprintln!("{}", error_formatter::format_error(mamdani_err));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn init_logging(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_command(
    args: &KnowledgeArgs,
    inputs: &[String],
    raw: bool,
    json: bool,
    interactive: bool,
    fallback: Option<f64>,
) -> Result<()> {
    let engine = load_engine(args)?;

    if inputs.is_empty() && !interactive {
        let names: Vec<&str> = engine
            .input_variables()
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        anyhow::bail!(
            "No inputs given\n\nUsage: mamdani run NAME=VALUE... [OPTIONS]\n\nInputs for {}:\n  {}\n\nOr prompt for each one:\n  mamdani run --interactive",
            engine.source_id(),
            names.join(", ")
        );
    }

    let refs: Vec<&str> = inputs.iter().map(|s| s.as_str()).collect();
    let mut values = parse_inputs(&refs)?;
    if interactive {
        interactive::prompt_missing_inputs(&engine, &mut values)?;
    }

    let formatter = Formatter::default();
    let response = match (engine.evaluate_detailed(&values), fallback) {
        (Ok(response), _) => response,
        (Err(MamdaniError::NoRuleFired), Some(score)) => {
            warn!(score, "no rule fired, reporting the fallback score");
            let output = &engine.output_variable().name;
            let category = engine.categorize(score);
            if json {
                println!("{}", formatter.format_fallback_json(output, score, category)?);
            } else {
                print!("{}", formatter.format_fallback(output, score, category, raw));
            }
            return Ok(());
        }
        (Err(e), _) => return Err(e.into()),
    };

    if json {
        println!("{}", formatter.format_json(&response)?);
    } else {
        print!("{}", formatter.format_response(&response, raw));
    }

    Ok(())
}

fn show_command(args: &KnowledgeArgs) -> Result<()> {
    let engine = load_engine(args)?;
    let formatter = Formatter::default();
    print!("{}", formatter.format_knowledge(&engine));
    Ok(())
}

fn server_command(args: &KnowledgeArgs, host: &str, port: u16) -> Result<()> {
    #[cfg(feature = "server")]
    {
        use tokio::runtime::Runtime;
        let engine = load_engine(args)?;
        let rt = Runtime::new()?;
        rt.block_on(async {
            println!(
                "Starting HTTP server for {} ({} inputs, {} rules)",
                engine.source_id(),
                engine.input_variables().len(),
                engine.rules().len()
            );
            server::http::start_server(engine, host, port).await
        })?;
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (args, host, port);
        eprintln!("Error: Server feature not enabled");
        eprintln!("Recompile with: cargo build --features server");
        std::process::exit(1);
    }

    Ok(())
}

/// Read, validate and build the engine for a knowledge file
fn load_engine(args: &KnowledgeArgs) -> Result<Engine> {
    let path = &args.knowledge;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read knowledge file {}", path.display()))?;
    let source_id = path.to_string_lossy().to_string();

    let limits = ResourceLimits::default();
    let knowledge = load_knowledge(&content, &source_id, &limits)?;
    Ok(Engine::with_options(knowledge, args.policy(), limits)?)
}
