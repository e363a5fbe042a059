// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "Recurscope v{} - Recurrence rule descriptions and edit scope classification",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] describe <rule.toml>", binary_name);
    println!("    {} [OPTIONS] preview <rule.toml> [--count <n>]", binary_name);
    println!("    {} [OPTIONS] validate <rule.toml>", binary_name);
    println!("    {} [OPTIONS] next <rule.toml> <YYYY-MM-DD>", binary_name);
    println!("    {} [OPTIONS] options <YYYY-MM-DD>", binary_name);
    println!("    {} [OPTIONS] classify <edit.toml>", binary_name);
    println!("    {} [OPTIONS] delete", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config.");
    println!("    -v, --verbose         Log debug output to stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS:");
    println!("    describe    Print the human-readable summary of a rule");
    println!("    preview     Print the first occurrence dates of a rule");
    println!("    validate    Check a rule for malformed fields");
    println!("    next        Print the first occurrence after a date");
    println!("    options     Print the monthly anchoring choices for a start date (JSON)");
    println!("    classify    Decide the scope of an edit to a recurring event (JSON)");
    println!("    delete      Print the scope decision for deleting an occurrence (JSON)");
    println!();
    println!("RULE FILE:");
    println!("    recurrenceStartDate = \"2024-07-18\"");
    println!("    frequency = \"MONTHLY\"");
    println!("    interval = 1");
    println!("    weekDays = [\"THURSDAY\"]");
    println!("    weekDayOccurenceInMonth = 3      # 1-4, or -1 for last");
    println!("    count = 10                       # or recurrenceEndDate = \"2025-01-01\"");
    println!();
    println!("EDIT FILE:");
    println!("    [previousRule]                   # omit if the event was not recurring");
    println!("    [previousOccurrence]             # startDate / endDate, quoted RFC 3339");
    println!("    [proposedRule]");
    println!("    [proposedOccurrence]");
}
