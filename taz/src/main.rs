use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use taz::commands::{history::HistoryCommand, submit::SubmitCommand, theme::ThemeCommand};
use taz_utils::taz_version;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    let config = taz_config::load().context("Failed to load config")?;
    tracing::debug!(storage = %config.storage.path.display(), "Config loaded");

    match cli.command {
        Command::Submit { command } => command.invoke(config).await?,
        Command::History { command } => {
            command
                .unwrap_or(HistoryCommand::Show)
                .invoke(config)
                .await?
        }
        Command::Theme { command } => {
            command
                .unwrap_or(ThemeCommand::Show)
                .invoke(config)
                .await?
        }
        Command::CheckConfig { verbose } => {
            verbose.then(|| println!("{config:#?}"));
        }
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version = taz_version())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send a message through the contact form
    #[command(aliases(["send", "s"]))]
    Submit {
        #[command(flatten)]
        command: SubmitCommand,
    },
    /// Inspect or clear the history of sent messages
    #[command(aliases(["h"]))]
    History {
        #[command(subcommand)]
        command: Option<HistoryCommand>,
    },
    /// Show or change the color theme
    #[command(aliases(["t"]))]
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommand>,
    },
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .init();
}
