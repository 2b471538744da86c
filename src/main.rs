use std::{fs, io};

use clap::Parser;
use picopy::run_program;

/// picopy is a tiny, dynamically typed, indentation-structured scripting
/// language with classes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells picopy to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let stdout = io::stdout();
    if let Err(e) = run_program(&script, &mut stdout.lock()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
