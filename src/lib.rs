use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};

use crate::lex::Lexer;
use crate::parse::parser::Parser;
use crate::parse::toplevel::parse_top_level;
use crate::reduce::CodeReduction;
use crate::rename::{PropertyRenaming, VariableRenaming};

pub mod ast;
pub mod dump;
pub mod error;
pub mod lex;
pub mod parse;
pub mod reduce;
pub mod rename;
pub mod render;
pub mod source;
pub mod symbols;
pub mod token;
mod util;
pub mod walk;

pub use crate::ast::{Node, NodeKind};
pub use crate::error::{SyntaxError, SyntaxResult};
pub use crate::parse::ParseOptions;
pub use crate::render::{render, RenderOptions};

#[derive(Debug)]
pub enum MinifyError {
    Syntax(SyntaxError),
    IO(io::Error),
}

impl Display for MinifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MinifyError::Syntax(err) => write!(f, "{}", err),
            MinifyError::IO(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl Error for MinifyError {}

/// Parses a byte buffer of JavaScript into its syntax tree.
pub fn parse(source: Vec<u8>, options: ParseOptions) -> SyntaxResult<Node> {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer, options);
    parse_top_level(&mut parser)
}

pub fn parse_str(source: &str, options: ParseOptions) -> SyntaxResult<Node> {
    parse(source.as_bytes().to_vec(), options)
}

/// Minifies UTF-8 JavaScript source: pattern replacement and reduction, then
/// variable renaming, then property renaming, rendered compactly.
///
/// # Arguments
///
/// * `source` - The source code to minify.
/// * `replacements` - `needle:replacement,…` pairs substituted before
///   reduction; empty for none.
/// * `output` - Destination for the minified JavaScript.
pub fn minify<T: Write>(
    source: Vec<u8>,
    replacements: &str,
    output: &mut T,
) -> Result<(), MinifyError> {
    let root = parse(source, ParseOptions::default()).map_err(MinifyError::Syntax)?;
    let mut root = CodeReduction::new(replacements).process(root);
    let mut variable_renaming = VariableRenaming::new();
    variable_renaming.process(&mut root);
    let root = PropertyRenaming::new().process(root);
    output
        .write_all(render(&root, RenderOptions::compact()).as_bytes())
        .map_err(MinifyError::IO)?;
    Ok(())
}
