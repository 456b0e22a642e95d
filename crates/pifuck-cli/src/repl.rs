use std::io::{self, Write};

use owo_colors::OwoColorize;
use pifuck_interpreter::{Env, Interpreter};
use pifuck_lexer::lex;
use pifuck_parser::Parser;
use pifuck_syntax::token::TokenKind;

use crate::common::render_error;

pub fn start_repl() {
    println!("{}", "pifuck REPL. Type :help for help, :quit to exit.".bold().green());

    let mut interpreter = Interpreter::new();
    let mut env = Env::new();

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() { "π> ".cyan().to_string() } else { ".. ".cyan().to_string() };
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        let n = match io::stdin().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => {
                println!("<input error>");
                break;
            }
        };
        if n == 0 {
            println!("\nGoodbye.");
            break;
        }
        let trimmed = line.trim_end();

        if buffer.is_empty() && trimmed.starts_with(':') {
            match trimmed {
                ":quit" | ":q" => {
                    println!("Goodbye.");
                    break;
                }
                ":help" => {
                    print_help();
                    continue;
                }
                ":vars" => {
                    print_vars(&env);
                    continue;
                }
                ":funcs" => {
                    print_funcs(&env);
                    continue;
                }
                ":reset" => {
                    env.clear();
                    println!("{}", "State reset.".yellow());
                    continue;
                }
                _ => {
                    println!("{}", "Unknown command. Type :help.".red());
                    continue;
                }
            }
        }

        buffer.push_str(&line);
        if !is_complete(&buffer) {
            continue;
        }

        match Parser::new(lex(&buffer)).parse_program() {
            Ok(program) => {
                if let Err(e) = interpreter.run_with_env(&program, &mut env) {
                    render_error(&buffer, &e);
                }
            }
            Err(e) => render_error(&buffer, &e),
        }
        buffer.clear();
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  {}   {}", ":help".yellow(), "Show this help");
    println!("  {}   {}", ":quit".yellow(), "Exit the REPL (also :q)");
    println!("  {}   {}", ":vars".yellow(), "List variables");
    println!("  {}  {}", ":funcs".yellow(), "List defined functions");
    println!("  {}  {}", ":reset".yellow(), "Forget all variables and functions");
    println!("Blocks stay open until every if, for, foreach and function is closed by 3.14159265.");
}

fn print_vars(env: &Env) {
    let vars = env.vars_snapshot();
    if vars.is_empty() {
        println!("{}", "<no vars>".dimmed());
        return;
    }
    for (k, v) in vars {
        println!("{} = {}", k.yellow(), v.to_string().bright_blue());
    }
}

fn print_funcs(env: &Env) {
    let names = env.function_names();
    if names.is_empty() {
        println!("{}", "<no functions>".dimmed());
        return;
    }
    for n in names {
        println!("{}", n.yellow());
    }
}

/// Input is complete once every block opener has a matching END_BLOCK.
fn is_complete(input: &str) -> bool {
    let mut depth = 0i32;
    for tk in lex(input) {
        if tk.kind.opens_block() {
            depth += 1;
        } else if tk.kind == TokenKind::EndBlock {
            depth -= 1;
        }
    }
    depth <= 0
}
