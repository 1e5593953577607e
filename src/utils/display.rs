use colored::*;

/// Startup banner for the binary: a title and a few detail lines.
pub fn banner(title: &str, lines: &[String]) {
    println!("\n{}", title.bright_cyan().bold());
    println!("{}", "=".repeat(title.len()).bright_cyan());
    for line in lines {
        println!("{}", line.blue());
    }
    println!();
}

pub fn print_success(text: &str) {
    println!("{}", text.green());
}
