use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::*;
use medxpert_core::{
    ChatClient, ChatSurface, ChatTrigger, Completion, Config, Language, PENDING_INDICATOR,
};
use tracing::{info, warn};

mod app;
mod details;
mod handler;
mod logging;
mod tui;
mod ui;

use app::App;
use details::format_extra;
use tui::EventHandler;

#[derive(Parser)]
#[command(name = "medxpert")]
#[command(about = "Terminal client for the MedXpert health assistant")]
struct Cli {
    /// Chat server URL (overrides the config file and MEDXPERT_SERVER_URL)
    #[arg(short, long, global = true)]
    server: Option<String>,
    /// Answer language: en, hi, ta, te, kn, ml
    #[arg(short, long, global = true)]
    lang: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question and print the answer
    Ask {
        /// Your question
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// List the quick questions
    Chips,
    /// List supported answer languages
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::new(), Some(e)),
    };

    // The TUI owns the terminal, so it logs to files; everything else to stderr
    let _log_guard = match cli.command {
        None => Some(logging::init_file(&Config::get_config_dir()?)?),
        Some(_) => {
            logging::init_stderr()?;
            None
        }
    };
    if let Some(e) = &config_error {
        warn!(error = %format!("{:#}", e), "using default settings, config file not loaded");
    }

    let language = match cli.lang.as_deref() {
        Some(code) => Language::from_str(code).ok_or_else(|| {
            let codes: Vec<&str> = Language::all().iter().map(|l| l.as_str()).collect();
            anyhow!("Unknown language '{}'. Supported: {}", code, codes.join(", "))
        })?,
        None => config.language(),
    };

    let server_url = cli
        .server
        .clone()
        .unwrap_or_else(|| config.resolved_server_url());
    let client = match config.timeout() {
        Some(timeout) => ChatClient::with_timeout(&server_url, timeout)?,
        None => ChatClient::new(&server_url),
    };

    match cli.command {
        None => run_tui(&config, client, language).await,
        Some(Commands::Ask { question }) => ask(&client, &question.join(" "), language).await,
        Some(Commands::Chips) => {
            list_chips(&config);
            Ok(())
        }
        Some(Commands::Languages) => {
            list_languages(language);
            Ok(())
        }
    }
}

async fn run_tui(config: &Config, client: ChatClient, language: Language) -> Result<()> {
    info!(server = %client.base_url(), lang = language.as_str(), "starting");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();
    let mut app = App::new(config, client, language, events.sender());

    let result = run_loop(&mut terminal, &mut app, &mut events).await;
    tui::restore()?;
    result
}

async fn run_loop(terminal: &mut tui::Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event)?,
            None => break,
        }
    }
    Ok(())
}

/// Stdout rendering of the chat: the pending indicator goes to stderr so
/// only the answer lands on stdout
struct PrintSurface {
    question: String,
    language: Language,
    display: String,
}

impl ChatSurface for PrintSurface {
    fn prompt(&self) -> String {
        self.question.clone()
    }

    fn language(&self) -> String {
        self.language.as_str().to_string()
    }

    fn show(&mut self, text: &str) {
        if text == PENDING_INDICATOR {
            eprintln!("{}", text.dimmed());
        }
        self.display = text.to_string();
    }

    fn set_prompt(&mut self, text: &str) {
        self.question = text.to_string();
    }
}

async fn ask(client: &ChatClient, question: &str, language: Language) -> Result<()> {
    let mut surface = PrintSurface {
        question: question.to_string(),
        language,
        display: String::new(),
    };
    let mut trigger = ChatTrigger::new();

    match trigger.send(&mut surface, client).await {
        None => Err(anyhow!("Nothing to ask: the question is empty")),
        Some(Completion::Answered(response)) => {
            if let Some(kind) = &response.kind {
                println!("{}", format!("[{}]", kind.as_str()).dimmed());
            }
            println!("{}", surface.display);

            let details = response
                .payload
                .extra
                .as_ref()
                .map(format_extra)
                .unwrap_or_default();
            if !details.is_empty() {
                println!("\n{}", "Details:".bold().blue());
                for line in details {
                    println!("  • {}", line);
                }
            }
            Ok(())
        }
        Some(Completion::Failed(err)) => {
            eprintln!(
                "Make sure the MedXpert server is running at {}",
                client.base_url().bold()
            );
            Err(err.into())
        }
        // Only one request is ever issued here
        Some(Completion::Stale) => Ok(()),
    }
}

fn list_chips(config: &Config) {
    println!("\n{}", "💬 Quick questions".bold().blue());
    println!("{}", "=".repeat(30).dimmed());

    for (i, chip) in config.chips().iter().enumerate() {
        let key = if i < 9 { format!("F{}", i + 1) } else { "  ".to_string() };
        println!("  {} {} - {}", key.bold().yellow(), chip.label.green(), chip.text);
    }
}

fn list_languages(current: Language) {
    println!("\n{}", "🌐 Answer languages".bold().blue());
    println!("{}", "=".repeat(30).dimmed());

    for lang in Language::all() {
        let marker = if lang == current { "*" } else { " " };
        println!("{} {} {}", marker.green(), lang.as_str().bold(), lang.display_name());
    }
}
