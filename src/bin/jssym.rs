use std::io::{self, Read};
use std::process::exit;

use structopt::StructOpt;

use rewrite_js::symbols::find_symbols;
use rewrite_js::{parse, ParseOptions};

#[derive(StructOpt)]
#[structopt(
    name = "jssym",
    about = "Extracts library symbols (installs, behaviors, uses) from JavaScript on stdin"
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
    let root = match parse(input, ParseOptions::default()) {
        Ok(root) => root,
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };
    let index = find_symbols(&root);
    for (name, lineno) in index.installs.iter() {
        println!("+{}:{}", name, lineno);
    }
    for (name, lineno) in index.behaviors.iter() {
        println!("*{}:{}", name, lineno);
    }
    for (name, lineno) in index.uses.iter() {
        println!("?{}:{}", name, lineno);
    }
}
