use std::env;
use std::io::{self, IsTerminal};
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use venule::core::config::{Config, ConfigPaths};
use venule::error::ShellError;
use venule::flags::Flags;
use venule::highlight::SyntaxHighlighter;
use venule::process::signal::install_interrupt_handler;
use venule::shell::Shell;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(flags: &Flags) -> Result<(), ShellError> {
    let config = Config::load(&ConfigPaths::new(flags.get_value("config")))?;
    config.apply();
    if let Some(source) = config.source() {
        info!(path = %source.display(), vars = config.vars().len(), "loaded rc file");
    }

    let quiet = flags.is_set("quiet");
    install_interrupt_handler(quiet)?;

    let stdin = io::stdin();
    let mut shell = Shell::host().inherit_stdin(true);
    if !quiet && stdin.is_terminal() {
        shell = shell.with_prompt(SyntaxHighlighter::new());
    }

    shell.run(stdin.lock(), io::stdout().lock())
}

fn main() {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = flags.parse(&args) {
        eprintln!("{}", SyntaxHighlighter::new().highlight_error(&e.to_string()));
        process::exit(2);
    }

    if flags.is_set("help") {
        flags.print_help();
        return;
    }

    if flags.is_set("version") {
        println!("venule {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    init_logging(flags.is_set("debug"));

    if let Err(e) = run(&flags) {
        eprintln!("{}", SyntaxHighlighter::new().highlight_error(&e.to_string()));
        process::exit(1);
    }
}
