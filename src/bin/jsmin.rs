use std::io::{self, Read, Write};
use std::process::exit;

use structopt::StructOpt;

use rewrite_js::minify;

#[derive(StructOpt)]
#[structopt(
    name = "jsmin",
    about = "JavaScript minifier: folds constants, prunes dead branches, shortens names"
)]
struct Cli {
    /// Pattern replacements applied before reduction, as
    /// `needle1:replacement1,needle2:replacement2`. For example,
    /// `__DEV__:0` substitutes the literal 0 for every `__DEV__`.
    replacements: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    let args = Cli::from_args();
    let mut input = Vec::new();
    if let Err(err) = io::stdin().read_to_end(&mut input) {
        eprintln!("read error: {}", err);
        exit(1);
    };
    let mut output = io::stdout();
    match minify(
        input,
        args.replacements.as_deref().unwrap_or(""),
        &mut output,
    ) {
        Ok(()) => {
            let _ = output.flush();
        }
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };
}
