use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mood_journal::modules::card::{CardLog, TerminalRenderer};
use mood_journal::modules::session::{ConsoleNotifier, TerminalEvents};
use mood_journal::modules::session::terminal::HELP;
use mood_journal::{JournalConfig, MoodTag, SessionController};

#[derive(Parser)]
#[command(name = "mood-journal")]
#[command(about = "Write down how you feel and get a gentle reply")]
struct Cli {
    #[arg(long, default_value = mood_journal::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive journal session
    Run {
        #[arg(long, default_value = "開心")]
        tag: String,
    },
    /// Record a single entry and exit
    Submit {
        #[arg(long)]
        tag: String,
        text: String,
    },
    /// Print every stored card, newest first
    Log,
    /// List the mood tags
    Tags,
}

fn init_logging() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    // stdout carries the cards, so logs go to stderr
    if std::env::var("MOOD_JOURNAL_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    let mut config = JournalConfig::load_or_default(&cli.config)?;
    config.apply_env_overrides();
    tracing::debug!(?config, "configuration loaded");

    let command = cli.command.unwrap_or(Commands::Run { tag: "開心".to_string() });

    if let Commands::Tags = command {
        for tag in MoodTag::ALL.iter() {
            println!("{}", tag);
        }
        return Ok(());
    }

    if let Commands::Log = command {
        let cards = CardLog::new();
        let mut controller =
            SessionController::from_config(&config, Box::new(cards.clone()), Box::new(ConsoleNotifier))?;
        if controller.start()? == 0 {
            println!("還沒有任何心情紀錄。");
        }
        cards.print_to(&mut std::io::stdout())?;
        return Ok(());
    }

    let mut controller = SessionController::from_config(
        &config,
        Box::new(TerminalRenderer::stdout()),
        Box::new(ConsoleNotifier),
    )?;

    match command {
        Commands::Run { tag } => {
            controller.start()?;
            println!("{}", HELP);
            let mut events = TerminalEvents::with_stdout(tokio::io::stdin(), MoodTag::parse(&tag));
            let handled = controller.run(&mut events).await;
            tracing::info!(handled, "session closed");
        }
        Commands::Submit { tag, text } => {
            if controller.submit(text.trim(), MoodTag::parse(&tag)).await?.is_none() {
                println!("沒有記錄任何內容。");
            }
        }
        Commands::Log | Commands::Tags => {}
    }

    Ok(())
}
