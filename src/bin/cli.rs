use anyhow::{Context, Result};
use recurscope::cli::print_help;
use recurscope::config::Config;
use recurscope::context::StandardContext;
use chrono::NaiveDate;
use recurscope::model::{
    EditRequest, RecurrenceEngine, RecurrenceRuleState, RuleDisplay, deletion_decision,
    ensure_valid, monthly_options, validate,
};
use serde::de::DeserializeOwned;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::env;
use std::fs;
use std::path::PathBuf;

fn read_toml<T: DeserializeOwned>(path: &str) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path))?;
    toml::from_str(&contents).with_context(|| format!("Failed to parse '{}'", path))
}

// Occurrences scanned by `next` before giving up on an unbounded series.
const NEXT_HORIZON: usize = 10_000;

fn read_rule(path: &str) -> Result<RecurrenceRuleState> {
    let rule: RecurrenceRuleState = read_toml(path)?;
    ensure_valid(&rule).with_context(|| format!("Rule in '{}' cannot be used", path))?;
    Ok(rule)
}

fn parse_date(arg: Option<&String>) -> Result<NaiveDate> {
    let raw = arg.ok_or_else(|| anyhow::anyhow!("Expected a date (YYYY-MM-DD)"))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw))
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h" || a == "help") {
        print_help("recurscope");
        return Ok(());
    }

    // Global options may appear anywhere; strip them before reading the command.
    let mut root: Option<PathBuf> = None;
    if let Some(idx) = args.iter().position(|a| a == "--root" || a == "-r") {
        if idx + 1 >= args.len() {
            anyhow::bail!("--root requires a path");
        }
        root = Some(PathBuf::from(args.remove(idx + 1)));
        args.remove(idx);
    }
    let verbose = if let Some(idx) = args.iter().position(|a| a == "--verbose" || a == "-v") {
        args.remove(idx);
        true
    } else {
        false
    };

    let ctx = StandardContext::new(root);
    let config = Config::load_or_default(&ctx)?;

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        config.level_filter()
    };
    // A logger that fails to initialize is not worth aborting the command for.
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let command = args.first().map(String::as_str).unwrap_or_default();
    let file = args.get(1).map(String::as_str);
    let file_arg =
        || file.ok_or_else(|| anyhow::anyhow!("'{}' requires a file argument", command));

    match command {
        "describe" => {
            let rule = read_rule(file_arg()?)?;
            println!("{}", rule.describe_with(&config.date_format));
        }
        "preview" => {
            let rule = read_rule(file_arg()?)?;
            let count = match args.iter().position(|a| a == "--count") {
                Some(idx) => args
                    .get(idx + 1)
                    .ok_or_else(|| anyhow::anyhow!("--count requires a number"))?
                    .parse::<usize>()
                    .context("--count must be a positive number")?,
                None => config.preview_count,
            };
            println!("{}", rule.describe_with(&config.date_format));
            for date in RecurrenceEngine::preview(&rule, count)? {
                println!("  {}", date.format("%a %Y-%m-%d"));
            }
        }
        "validate" => {
            let rule: RecurrenceRuleState = read_toml(file_arg()?)?;
            match validate(&rule) {
                Ok(()) => println!("OK"),
                Err(violations) => {
                    for v in &violations {
                        eprintln!("error: {}", v);
                    }
                    std::process::exit(1);
                }
            }
        }
        "next" => {
            let rule = read_rule(file_arg()?)?;
            let after = parse_date(args.get(2))?;
            match RecurrenceEngine::next_after(&rule, after, NEXT_HORIZON)? {
                Some(date) => println!("{}", date.format("%a %Y-%m-%d")),
                None => println!("No occurrence after {}", after),
            }
        }
        "options" => {
            let date = parse_date(args.get(1))?;
            println!("{}", serde_json::to_string_pretty(&monthly_options(date))?);
        }
        "classify" => {
            let request: EditRequest = read_toml(file_arg()?)?;
            let plan = request.plan();
            let scope = plan.decision.default_scope;
            let output = serde_json::json!({
                "changes": plan.changes,
                "decision": plan.decision,
                "anchorDate": plan.anchor_date(scope),
                "rule": plan.rule_for_scope(scope)?,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "delete" => {
            println!("{}", serde_json::to_string_pretty(&deletion_decision())?);
        }
        other => {
            eprintln!("Unknown command '{}'", other);
            print_help("recurscope");
            std::process::exit(2);
        }
    }

    Ok(())
}
