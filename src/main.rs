use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use jhove_tui::app::App;
use jhove_tui::config::{self, Config, Overrides};
use jhove_tui::events::handle_events;
use jhove_tui::hash::HashEngine;
use jhove_tui::logging::{self, LogTarget};
use jhove_tui::report::render_text;
use jhove_tui::{ui, FileDescriptor, IntakePipeline, ValidationClient, ValidationModule};

#[derive(Parser, Debug)]
#[command(
    name = "jhove-tui",
    version,
    about = "Validate files against a remote JHOVE service",
    long_about = "Submit a file to a JHOVE validation service and view the normalized report.\n\
                  Without --file an interactive terminal UI starts; drag a file onto the\n\
                  terminal or pick one from the browser."
)]
struct Cli {
    /// Validate this file and print the report instead of starting the TUI
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Validation module (case-sensitive, e.g. PDF-hul)
    #[arg(short, long, value_name = "MODULE")]
    module: Option<ValidationModule>,

    /// Service base URL (overrides API_BASE_URL and the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the whole outcome as JSON (with --file)
    #[arg(long, requires = "file")]
    json: bool,

    /// List available validation modules and exit
    #[arg(long)]
    list_modules: bool,

    /// Directory the file picker starts in
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.list_modules {
        for module in ValidationModule::ALL {
            let marker = if module == ValidationModule::default() { " (default)" } else { "" };
            println!("{}{}", module, marker);
        }
        return;
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(2);
        }
    };

    let result = match cli.file.as_deref() {
        Some(path) => run_headless(&cli, &config, path).await,
        None => run_tui(&cli, &config).await,
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, jhove_tui::InputError> {
    let file_config = config::load_file_config(cli.config.as_deref())?;
    let overrides = Overrides {
        base_url: cli.base_url.clone(),
        module: cli.module,
        ..Overrides::default()
    }
    .with_env();
    Config::resolve(overrides, file_config)
}

fn build_pipeline(config: &Config) -> Result<IntakePipeline> {
    let client = ValidationClient::new(&config.base_url, config.request_timeout)?;
    log::info!("Validation endpoint: {}", client.endpoint());
    Ok(IntakePipeline::new(HashEngine::new()?, Arc::new(client)))
}

async fn run_headless(cli: &Cli, config: &Config, path: &Path) -> Result<i32> {
    logging::init(cli.verbose, LogTarget::Stderr)?;

    let pipeline = build_pipeline(config)?;
    let file = FileDescriptor::from_path(path)?;

    match pipeline.process(&file, config.default_module).await {
        Ok(outcome) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", render_text(Some(&outcome), io::stdout().is_terminal()));
            }
            Ok(0)
        }
        Err(fault) => {
            log::error!("Error processing file: {}", fault);
            eprintln!("{}", fault);
            Ok(1)
        }
    }
}

async fn run_tui(cli: &Cli, config: &Config) -> Result<i32> {
    logging::init(cli.verbose, LogTarget::File(&config.log_file))?;
    log::info!("Starting jhove-tui {}", env!("CARGO_PKG_VERSION"));

    let pipeline = build_pipeline(config)?;
    let start_dir = cli
        .dir
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let mut app = App::new(config, pipeline, start_dir);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("UI loop failed: {:?}", err);
        eprintln!("Error: {:?}", err);
        return Ok(1);
    }
    Ok(0)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        handle_events(app).await?;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
