use anyhow::Result;
use clap::{Parser, Subcommand};
use mealweek::cli::plan::{self, PlanContext};
use mealweek::config::Config;

/// mealweek - household meal planning
#[derive(Parser)]
#[command(name = "mealweek")]
#[command(about = "Weekly meal plans, day-before prep schedules, shopping input", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Member whose plan is operated on (overrides config)
    #[arg(long, global = true)]
    member: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the plan for one day
    Today {
        /// Date (YYYY-MM-DD); defaults to the current date
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the week's plan
    Week {
        /// Week start date (a Sunday, YYYY-MM-DD); defaults to this week
        #[arg(long)]
        start: Option<String>,
    },
    /// Show the week's day-before prep schedule
    Prep {
        /// Week start date (a Sunday, YYYY-MM-DD); defaults to this week
        #[arg(long)]
        start: Option<String>,
    },
    /// List the week's planned items as shopping-list input
    Shopping {
        /// Week start date (a Sunday, YYYY-MM-DD); defaults to this week
        #[arg(long)]
        start: Option<String>,
    },
    /// Import a pasted weekly plan
    Import {
        /// Week start date (a Sunday, YYYY-MM-DD) the pasted day names map onto
        #[arg(long)]
        start: Option<String>,

        /// Input file; '-' reads from stdin
        #[arg(default_value = "-")]
        input: String,
    },
    /// Toggle a prep item's completion flag
    TogglePrep {
        /// Prep date (YYYY-MM-DD)
        date: String,

        /// Prep item name as shown by `prep`
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealweek::observability::init_observability(&config.observability.log_level)?;

    let member_id = cli.member.unwrap_or_else(|| config.member.id.clone());
    tracing::debug!(%member_id, data_dir = %config.data.dir, "mealweek starting");
    let ctx = PlanContext::new(&config, &member_id)?;

    match cli.command {
        Commands::Today { date } => plan::today(&ctx, date)?,
        Commands::Week { start } => plan::week(&ctx, start)?,
        Commands::Prep { start } => plan::prep(&ctx, start)?,
        Commands::Shopping { start } => plan::shopping(&ctx, start)?,
        Commands::Import { start, input } => plan::import(&ctx, start, &input)?,
        Commands::TogglePrep { date, name } => plan::toggle_prep(&ctx, &date, &name)?,
    }

    Ok(())
}
