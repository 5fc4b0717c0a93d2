use std::io::{self, Read};
use std::process::exit;

use structopt::StructOpt;

use rewrite_js::dump::dump;
use rewrite_js::{parse, ParseOptions};

#[derive(StructOpt)]
#[structopt(
    name = "jsast",
    about = "Reads JavaScript from stdin and prints its syntax tree as nested arrays"
)]
struct Cli {}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    let _ = Cli::from_args();
    let mut input = Vec::new();
    if let Err(err) = io::stdin().read_to_end(&mut input) {
        eprintln!("read error: {}", err);
        exit(1);
    };
    match parse(input, ParseOptions::default()) {
        Ok(root) => {
            print!("{}", dump(&root));
        }
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };
}
