use std::{
    fs::read_to_string,
    io,
    path::PathBuf,
    process::exit,
    rc::Rc,
};

use clap::Parser as ClapParser;
use colored::Colorize;
use log::{debug, error, info};

use sprig::{
    errors::diagnostics::Diagnostics, lexer::lexer::tokenize, parser::parser::parse,
    resolve_source_path, run_source, SOURCE_EXTENSION,
};

#[derive(ClapParser)]
#[command(
    name = "sprig",
    about = "Sprig: a small interpreted scripting language",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    /// Path to the source file; `.sp` is appended when it has no extension
    file: PathBuf,

    /// Dump tokens and the syntax tree before running
    #[arg(short, long)]
    debug: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let Some(path) = resolve_source_path(&cli.file) else {
        eprintln!(
            "{} expected a `.{}` file, got {}",
            "error:".red().bold(),
            SOURCE_EXTENSION,
            cli.file.display()
        );
        exit(1);
    };

    let source = match read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            error!("failed to read {}: {}", path.display(), err);
            eprintln!("{} could not read {}: {}", "error:".red().bold(), path.display(), err);
            exit(1);
        }
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    info!("running {}", path.display());

    if cli.debug {
        dump_debug(&source, &file_name);
    }

    let mut diagnostics = Diagnostics::new(&file_name, &source);
    let stdout = io::stdout();
    let mut output = stdout.lock();
    let mut input = io::stdin().lock();

    if let Err(err) = run_source(&source, &mut diagnostics, &mut output, &mut input) {
        debug!("stopped with {}", err.get_error_name());
        eprint!("{}", diagnostics.render(&err));
        exit(1);
    }
}

/// Prints the token stream and the syntax tree. Errors are left for the run that follows.
fn dump_debug(source: &str, file_name: &str) {
    let tokens = match tokenize(source.to_string(), Some(file_name.to_string())) {
        Ok(tokens) => tokens,
        Err(_) => return,
    };

    for token in tokens.iter() {
        token.debug();
    }

    let (_, ast) = parse(tokens, Rc::new(file_name.to_string()));
    if let Ok(ast) = ast {
        print!("{}", ast.dump());
    }
}
