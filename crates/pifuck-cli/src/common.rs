use owo_colors::OwoColorize;
use pifuck_syntax::error::Error;

/// Print an error to stderr, pointing at the offending word when the error
/// carries a position.
pub fn render_error(source: &str, err: &Error) {
    eprintln!("{}: {}", err.kind.label().red().bold(), err.msg.red());
    if let (Some(line), Some(col)) = (err.line, err.col) {
        eprintln!("  --> line {}, column {}", line, col);
        if let Some(src_line) = source.lines().nth(line.saturating_sub(1)) {
            let line_num_str = format!("{:3} | ", line);
            eprintln!("     |");
            eprintln!("{}{}", line_num_str.bright_black(), src_line);

            let mut marker = String::new();
            marker.push_str(&" ".repeat(line_num_str.len()));
            if col > 1 {
                marker.push_str(&" ".repeat(col - 1));
            }
            marker.push('^');
            eprintln!("{}{}", marker.red(), " error here".red());
            eprintln!("     |");
        }
    }
    provide_error_suggestions(&err.msg);
}

pub fn provide_error_suggestions(err_msg: &str) {
    if err_msg.starts_with("Unexpected token") {
        eprintln!("{}", "Help: Every word must be a π-keyword, `--`, `**` or a +value+.".yellow());
        if err_msg.contains(" 3.") {
            eprintln!("    {}", "Keywords are prefixes of 3.14159265358979, check the digits".bright_black());
        } else {
            eprintln!("    {}", "Wrap literals and names in plus signs: +hello+ +42+".bright_black());
        }
    } else if err_msg.starts_with("Expecting new line") {
        eprintln!("{}", "Help: Every statement ends with the line-end keyword `3.`".yellow());
    } else if err_msg.contains("Expected end of block") {
        eprintln!("{}", "Help: Close every if, for, foreach and function with `3.14159265 3.`".yellow());
    } else if err_msg.contains("should be declared before usage") {
        eprintln!("{}", "Help: Define the function with `** +name+ 3.` before calling it.".yellow());
    } else if err_msg.contains("is used before declaration") {
        eprintln!("{}", "Help: Declare the variable first: 3.1 +name+ 3.1 +value+ 3.".yellow());
    } else if err_msg.starts_with("Invalid operation") {
        eprintln!("{}", "Help: Operators only work on compatible values:".yellow());
        eprintln!("    {}", "• Decimals: all arithmetic and comparisons".bright_black());
        eprintln!("    {}", "• Strings: concatenation and (in)equality".bright_black());
        eprintln!("    {}", "• Booleans: (in)equality only, null: nothing".bright_black());
    } else if err_msg.starts_with("Non-terminating decimal expansion") {
        eprintln!("{}", "Help: Division must have an exact decimal result (1/4 works, 1/3 does not).".yellow());
    } else if err_msg.starts_with("Division") {
        eprintln!("{}", "Help: You cannot divide by zero.".yellow());
    } else if err_msg.contains("Failed to read file") {
        eprintln!("{}", "Help: Include paths are relative to the working directory.".yellow());
    }
}
