use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing::info;

use intervox::session::NO_ANSWER_PLACEHOLDER;
use intervox::{
    AnswerRequest, AnswerService, ApiClient, CaptureSession, Config, ConsoleUi, MicBackend,
};

#[derive(Parser)]
#[command(name = "intervox", about = "Voice interview assistant client", version)]
struct Cli {
    /// Config file base name (extension optional)
    #[arg(long, default_value = "config/intervox")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a spoken question and fetch the transcript and answer
    Listen {
        /// Input-language hint, e.g. "en" ("auto" = detect)
        #[arg(long)]
        language: Option<String>,

        /// Answer language ("same" = match the input)
        #[arg(long)]
        output_language: Option<String>,
    },
    /// Type a question and fetch an answer
    Ask {
        question: String,

        #[arg(long, default_value = "")]
        job_role: String,

        #[arg(long, default_value = "")]
        background: String,
    },
    /// Rewrite an existing answer
    Regen { text: String },
    /// List capture devices
    Devices,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    match cli.command {
        Command::Listen {
            language,
            output_language,
        } => listen(cfg, language, output_language).await,
        Command::Ask {
            question,
            job_role,
            background,
        } => {
            let service = ApiClient::new(&cfg.service.base_url);
            let response = service
                .answer(&AnswerRequest {
                    question,
                    job_role,
                    background,
                })
                .await?;
            println!(
                "{}",
                response.answer.as_deref().unwrap_or(NO_ANSWER_PLACEHOLDER)
            );
            Ok(())
        }
        Command::Regen { text } => {
            let service = ApiClient::new(&cfg.service.base_url);
            let response = service.regenerate(&text).await?;
            println!(
                "{}",
                response.answer.as_deref().unwrap_or(NO_ANSWER_PLACEHOLDER)
            );
            Ok(())
        }
        Command::Devices => {
            for name in MicBackend::list_devices()? {
                println!("{name}");
            }
            Ok(())
        }
    }
}

async fn listen(
    cfg: Config,
    language: Option<String>,
    output_language: Option<String>,
) -> Result<()> {
    let mut options = cfg.session_options();
    if let Some(language) = language {
        options.language = language;
    }
    if let Some(output_language) = output_language {
        options.output_language = output_language;
    }

    info!("Connecting to {}", cfg.service.base_url);

    let backend = MicBackend::new(cfg.audio.device.clone());
    let service = Arc::new(ApiClient::new(&cfg.service.base_url));
    let ui = Arc::new(ConsoleUi);
    let mut session = CaptureSession::new(Box::new(backend), service, ui, options);

    println!("Press Enter to start recording, Enter again to stop, q to quit.");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "q" {
            break;
        }
        if session.is_listening() {
            session.stop().await?;
        } else {
            session.start().await?;
        }
    }

    // Finish an in-flight capture before exiting.
    if session.is_listening() {
        session.stop().await?;
    }

    Ok(())
}
