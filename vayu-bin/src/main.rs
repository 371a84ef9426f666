use crossterm::event;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        execute,
        style::{Color, ResetColor, SetBackgroundColor},
        terminal::{
            Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
            enable_raw_mode,
        },
    },
};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::env;
use std::fs::File;
use std::io;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use vayu_framework::{AppDesc, PlainHighlighter, SyntectHighlighter, loader};

fn print_usage() {
    println!("Usage: vayu [OPTIONS] <logfile>");
    println!();
    println!("Options:");
    println!("  --filter, -f <regex>    Start with a filter applied");
    println!("  --theme, -t <name>      Highlight theme for the detail pane");
    println!("  --no-highlight          Show the detail pane without colors");
    println!("  --log-file <path>       Write debug logs to a file");
    println!("  --help, -h              Print this help message");
}

#[derive(Debug, Default, PartialEq)]
struct UsageOptions {
    help: bool,
    path: Option<String>,
    filter: Option<String>,
    theme: Option<String>,
    no_highlight: bool,
    log_file: Option<String>,
}

impl UsageOptions {
    fn from_args(args: &[String]) -> Result<Self, io::Error> {
        let mut options = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" => options.help = true,
                "--no-highlight" => options.no_highlight = true,
                "--filter" | "-f" => options.filter = Some(Self::value_for(arg, iter.next())?),
                "--theme" | "-t" => options.theme = Some(Self::value_for(arg, iter.next())?),
                "--log-file" => options.log_file = Some(Self::value_for(arg, iter.next())?),
                other if other.starts_with('-') => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("Unknown option: {}", other),
                    ));
                }
                other => {
                    if options.path.is_some() {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidInput,
                            "Only one log file is allowed",
                        ));
                    }
                    options.path = Some(other.to_string());
                }
            }
        }

        Ok(options)
    }

    fn value_for(option: &str, value: Option<&String>) -> Result<String, io::Error> {
        value.cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Missing value for {}", option),
            )
        })
    }

    fn app_desc(&self) -> AppDesc {
        let mut desc = AppDesc::new();
        desc.initial_filter = self.filter.clone();
        if let Some(theme) = &self.theme {
            desc.highlight_theme = theme.clone();
        }
        if self.no_highlight {
            desc.highlighter = Arc::new(PlainHighlighter);
        }
        desc
    }
}

fn init_logging(path: &str) -> io::Result<()> {
    let file = File::create(path)?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), file)
        .map_err(|e| io::Error::other(e.to_string()))
}

fn main() -> io::Result<()> {
    // Collect args excluding the binary name
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match UsageOptions::from_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            process::exit(1);
        }
    };

    if options.help {
        print_usage();
        return Ok(());
    }

    let Some(path) = options.path.as_deref() else {
        print_usage();
        process::exit(1);
    };

    if let Some(log_path) = options.log_file.as_deref() {
        if let Err(e) = init_logging(log_path) {
            eprintln!("Error opening log file {}: {}", log_path, e);
            process::exit(1);
        }
    }

    if let Some(theme) = options.theme.as_deref() {
        if !SyntectHighlighter::theme_names().iter().any(|name| name == theme) {
            eprintln!("Unknown theme: {}", theme);
            eprintln!(
                "Available themes: {}",
                SyntectHighlighter::theme_names().join(", ")
            );
            process::exit(1);
        }
    }

    println!("Loading logs from {}...", path);
    let loaded = match loader::load_file(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading logs: {:#}", e);
            process::exit(1);
        }
    };
    println!("Loaded {} log lines. Starting TUI...", loaded.lines.len());
    log::info!("Loaded {} lines from {}", loaded.lines.len(), path);

    let desc = options.app_desc();

    // Ensure we restore the terminal on panic
    if let Err(e) = vayu_framework::install_panic_hooks(|| {
        let _ = restore_terminal();
    }) {
        eprintln!("{}", e);
        process::exit(1);
    }

    let mut terminal = setup_terminal()?;

    let app_result = vayu_framework::start_with_desc(&mut terminal, loaded, desc);

    // Always restore terminal before printing or exiting
    restore_terminal()?;

    if let Err(err) = app_result {
        eprintln!("Error running program: {:?}", err);
        process::exit(1);
    }

    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    // enter the alternate screen to not mess with the user's shell history
    execute!(stdout, EnterAlternateScreen)?;
    execute!(
        stdout,
        SetBackgroundColor(Color::Reset),
        Clear(ClearType::All)
    )?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();

    let _ = execute!(stdout, ResetColor);
    let _ = execute!(stdout, LeaveAlternateScreen);

    // Drain pending events so they don't leak to the shell
    while event::poll(Duration::from_millis(0)).unwrap_or(false) {
        let _ = event::read();
    }

    let _ = disable_raw_mode();

    Ok(())
}
