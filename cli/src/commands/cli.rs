use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "conductor", about = "Run task plans with dependency tracking")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// TOML plan file with [[tasks]] and/or [[phases]] entries.
    #[arg(long)]
    pub plan: String,

    /// Session id; a fresh one is generated when omitted.
    #[arg(long)]
    pub session_id: Option<String>,

    /// Simulated per-attempt work duration.
    #[arg(long, default_value_t = 200)]
    pub work_delay_ms: u64,

    /// Where to write the session export JSON (overrides config).
    #[arg(long)]
    pub output: Option<String>,

    /// Suppress the progress bar.
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Print the final report as JSON to stdout.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ClassifyArgs {
    /// Free-text task description to classify.
    pub description: String,

    /// Print the full matched rule as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a plan file to completion.
    Run(RunArgs),
    /// Label a task description via the ranked-rule table.
    Classify(ClassifyArgs),
}
