use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zcalc::ai::{ChatSession, GeminiSolver, MathSolver};
use zcalc::app::{self, Session};
use zcalc::calculator::{Calculator, parse_keys};
use zcalc::config::Config;
use zcalc::ui::{Theme, render_display, render_markdown};

#[derive(Parser)]
#[command(name = "zcalc", version, about = "A keypad calculator with an AI math assistant")]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Model used by the AI assistant
    #[arg(long, global = true)]
    model: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a key sequence and print the display
    Eval {
        /// Keys, e.g. `5 + 5 + 2 =`
        #[arg(required = true, allow_hyphen_values = true)]
        keys: Vec<String>,

        /// Print the display and history as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ask the AI assistant a single question
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        config.ai.model = model;
    }

    let theme = Theme::detect();

    match cli.command {
        None => {
            let solver = GeminiSolver::from_settings(&config.ai)
                .map(|solver| Arc::new(solver) as Arc<dyn MathSolver>);
            app::run(Session::new(ChatSession::new(solver), theme))
        }
        Some(Commands::Eval { keys, json }) => eval(&keys.join(" "), json, &theme),
        Some(Commands::Ask { question }) => ask(&config, &question.join(" "), &theme),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "zcalc=debug" } else { "zcalc=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn eval(keys: &str, json: bool, theme: &Theme) -> anyhow::Result<()> {
    let inputs = parse_keys(keys)?;
    let mut calc = Calculator::new();
    calc.apply_all(inputs);

    if json {
        let state = calc.state();
        let output = serde_json::json!({
            "display": calc.display_text(),
            "expression": calc.expression_text(),
            "current_operand": state.current_operand(),
            "stored_operand": state.stored_operand(),
            "pending_operator": state.pending_operator().map(|op| op.symbol()),
            "result": state.last_result(),
            "history": calc.history().iter().collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", render_display(&calc, theme));
    }

    Ok(())
}

fn ask(config: &Config, question: &str, theme: &Theme) -> anyhow::Result<()> {
    let question = question.trim();
    if question.is_empty() {
        bail!("empty question");
    }

    let solver = GeminiSolver::from_settings(&config.ai)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let answer = runtime.block_on(solver.solve(question.to_string()))?;
    println!("{}", render_markdown(&answer, theme));
    Ok(())
}
