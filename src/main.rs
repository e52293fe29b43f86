use std::{env, fs::read_to_string, path::Path, process::ExitCode, time::Instant};

use takeql::{display_error, lexer::lexer::Lexer, parser::parser::parse};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: takeql <query-file>");
        return ExitCode::from(2);
    }

    let file_path = &args[1];
    let file_name = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.clone());

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(err) => {
            error!(path = %file_path, "failed to read query file: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let parsed = parse(Lexer::new(source.clone(), Some(file_name)));

    match parsed {
        Ok(root) => {
            info!("Parsed in {:?}", start.elapsed());
            println!("{:#?}", root);
            ExitCode::SUCCESS
        }
        Err(err) => {
            display_error(&err, &source);
            ExitCode::FAILURE
        }
    }
}
