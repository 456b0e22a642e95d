mod common;
mod repl;

use std::fs;
use std::process;

use clap::Parser as ClapParser;
use owo_colors::OwoColorize;
use pifuck_interpreter::Interpreter;
use pifuck_lexer::lex;
use pifuck_parser::Parser;

use common::render_error;

#[derive(ClapParser, Debug)]
#[command(name = "pifuck", about = "Run pifuck programs, or start a REPL when no file is given")]
struct Cli {
    /// Program to run; must end in `.pifuck`
    file: Option<String>,

    /// Print the token stream instead of running
    #[arg(long)]
    tokens: bool,

    /// Print the parsed program instead of running
    #[arg(long)]
    ast: bool,
}

fn main() {
    let cli = Cli::parse();

    let path = match cli.file {
        Some(p) => p,
        None => {
            repl::start_repl();
            return;
        }
    };
    if !path.ends_with(".pifuck") {
        println!("Usage: pifuck file.pifuck");
        return;
    }

    let src = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "{}: {}",
                "error".red().bold(),
                format!("Failed to read {}: {}", path, e).red()
            );
            process::exit(1);
        }
    };

    let tokens = lex(&src);
    if cli.tokens {
        for tk in &tokens {
            println!("{} '{}' {}:{}", tk.kind, tk.text, tk.line, tk.col);
        }
        return;
    }

    let program = match Parser::new(tokens).parse_program() {
        Ok(p) => p,
        Err(e) => {
            render_error(&src, &e);
            process::exit(1);
        }
    };
    if cli.ast {
        println!("{:#?}", program);
        return;
    }

    let mut interp = Interpreter::new();
    if let Err(e) = interp.run(&program) {
        render_error(&src, &e);
        process::exit(1);
    }
}
