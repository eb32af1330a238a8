use clap::{Parser, Subcommand, builder::styling};
use digia_sync::{
    cli::{bundle_project, pull_project, push_project, unpack_document},
    config::TreeOptions,
    layout::CollisionPolicy,
};
use eyre::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Digia Sync: keep a Digia project as a reviewable tree of YAML files
#[derive(Parser)]
#[command(name = "digia-sync", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source BASE_URL and DIGIA_TOKEN from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Root of the project tree
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a project from the backend and write it as YAML files
    Pull {
        /// Project to fetch
        project_id: String,

        /// Branch to fetch (backend default when omitted)
        branch_id: Option<String>,

        /// What to do when two records map to the same file
        #[arg(long, value_enum, default_value_t = CollisionPolicy::Overwrite)]
        on_collision: CollisionPolicy,
    },

    /// Collect the YAML files and push them to the backend
    Push {
        /// Branch name recorded with the update
        branch_name: String,
    },

    /// Write a saved backend response as YAML files, without network access
    Unpack {
        /// JSON file holding the response envelope or the bare project document
        document: PathBuf,

        /// What to do when two records map to the same file
        #[arg(long, value_enum, default_value_t = CollisionPolicy::Overwrite)]
        on_collision: CollisionPolicy,
    },

    /// Collect the YAML files into a push payload file instead of sending it
    Bundle {
        /// Payload file to write
        #[arg(default_value = "payload.json")]
        output: PathBuf,

        /// Branch name recorded in the payload
        #[arg(short, long, default_value = "main")]
        branch: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match dotenvy::from_filename(&cli.env) {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => log::debug!("No dotenv file at {}", cli.env),
        Err(e) => return Err(e.into()),
    }

    match cli.command {
        Commands::Pull {
            project_id,
            branch_id,
            on_collision,
        } => {
            log::info!(
                "Pulling project {} into {}",
                project_id.cyan(),
                cli.dir.display().bright_black()
            );
            let options = TreeOptions::new(&cli.dir).with_collision_policy(on_collision);
            pull_project(&options, &project_id, branch_id).await?;
        }
        Commands::Push { branch_name } => {
            log::info!(
                "Pushing {} to branch {}",
                cli.dir.display().bright_black(),
                branch_name.cyan()
            );
            push_project(&cli.dir, &branch_name).await?;
        }
        Commands::Unpack {
            document,
            on_collision,
        } => {
            let options = TreeOptions::new(&cli.dir).with_collision_policy(on_collision);
            unpack_document(&options, &document)?;
        }
        Commands::Bundle { output, branch } => {
            bundle_project(&cli.dir, &output, &branch)?;
        }
    }

    Ok(())
}
