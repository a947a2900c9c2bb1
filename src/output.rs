use colored::Colorize;

pub fn print_banner() {
    println!("{}", "tidywin - Windows Cleanup Tool v0.2.0".bold().cyan());
    println!();
}

pub fn print_scan_header() {
    println!("{}", "=== Configured targets ===".bold().white());
}

pub fn print_target_row(description: &str, path: &str, size: &str) {
    println!("  {:<28} {}  {}", description, path.dimmed(), size.yellow());
}

pub fn print_separator() {
    println!("  {}", "─".repeat(45).dimmed());
}

pub fn print_grand_total(total: &str) {
    println!(
        "  {:<28} {}",
        "Total reclaimable:".bold(),
        total.green().bold()
    );
    println!();
}

pub fn print_info(msg: &str) {
    println!("{} {}", "Info:".cyan().bold(), msg);
}

pub fn print_no_confirm_warning() {
    println!(
        "{}",
        "No --confirm flag provided. Running as dry-run scan."
            .yellow()
            .bold()
    );
    println!();
}

pub fn print_clean_complete() {
    println!("{}", "Cleanup complete.".green().bold());
}
