//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(avatar: &str, endpoint: &str) {
    println!();
    println!("  {} {}", avatar, style("MedBot").cyan().bold());
    println!("  {}", style("Medical assistant").dim());
    println!();
    println!("  {}  {}", style("Backend:").bold(), style(endpoint).dim());
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
