use clap::{Arg, Command};
use log::LevelFilter;
use lure_check::catalog::{self, ReferenceEmail, ReferenceLink};
use lure_check::{AnalysisResult, RiskLevel, RuleEngine, RuleSetConfig};
use std::process;

fn main() {
    let matches = Command::new("lure-check")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic URL risk checker for phishing-awareness training")
        .long_about("lure-check inspects a URL with a fixed set of illustrative heuristics:\n\
                    protocol, raw IP hosts, alarm-word prefixes, brand typosquatting,\n\
                    suspicious TLDs, shorteners, domain structure, urgency keywords\n\
                    and known phishing URL shapes. It is a teaching aid, not a\n\
                    security-grade detector.")
        .arg(
            Arg::new("url")
                .value_name("URL")
                .help("One or more URLs to analyze")
                .num_args(0..)
                .action(clap::ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Rule configuration file (YAML); built-in rules are used when omitted")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Write the default rule configuration to FILE")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the rule configuration (all patterns compile) and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print results as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-examples")
                .long("list-examples")
                .help("List the practice links and emails")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("example")
                .long("example")
                .value_name("ID")
                .help("Show a practice link with its reference indicators and analysis")
                .value_parser(clap::value_parser!(u32))
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("email")
                .long("email")
                .value_name("ID")
                .help("Show a practice email and analyze every link in it")
                .value_parser(clap::value_parser!(u32))
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging of every rule that fires")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config = match load_config(matches.get_one::<String>("config")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(1);
        }
    };

    let engine = match RuleEngine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("❌ Configuration validation failed:");
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        println!("🔍 Testing configuration...");
        println!("Enabled rules: {}", engine.rule_names().len());
        for (i, name) in engine.rule_names().iter().enumerate() {
            println!("  Rule {}: {}", i + 1, name);
        }
        println!("All regex patterns compiled successfully.");
        return;
    }

    let json = matches.get_flag("json");

    if matches.get_flag("list-examples") {
        list_examples(json);
        return;
    }

    if let Some(id) = matches.get_one::<u32>("example") {
        match catalog::find_link(*id) {
            Some(link) => show_link_example(&engine, &link, json),
            None => {
                eprintln!("❌ No practice link with id {id}");
                process::exit(1);
            }
        }
        return;
    }

    if let Some(id) = matches.get_one::<u32>("email") {
        match catalog::find_email(*id) {
            Some(email) => show_email_example(&engine, &email, json),
            None => {
                eprintln!("❌ No practice email with id {id}");
                process::exit(1);
            }
        }
        return;
    }

    let urls: Vec<&String> = matches
        .get_many::<String>("url")
        .map(|values| values.collect())
        .unwrap_or_default();

    if urls.is_empty() {
        eprintln!("Please enter a URL to analyze (see --help)");
        process::exit(2);
    }

    analyze_urls(&engine, &urls, json);
}

fn load_config(path: Option<&String>) -> anyhow::Result<RuleSetConfig> {
    match path {
        Some(path) => RuleSetConfig::load_from_file(path),
        None => {
            log::debug!("No rule configuration given, using built-in rules");
            Ok(RuleSetConfig::default())
        }
    }
}

fn generate_default_config(path: &str) {
    match RuleSetConfig::default().write_to_file(path) {
        Ok(()) => {
            println!("Default rule configuration written to: {path}");
            println!("Edit the tables or per-rule settings to suit your training material.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e:#}");
            process::exit(1);
        }
    }
}

fn analyze_urls(engine: &RuleEngine, urls: &[&String], json: bool) {
    let results: Vec<AnalysisResult> = urls.iter().map(|url| engine.analyze(url)).collect();

    if json {
        print_json(&results);
        return;
    }

    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_result(result);
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("❌ Failed to serialize output: {e}");
            process::exit(1);
        }
    }
}

fn risk_badge(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Low => "✅",
        RiskLevel::Medium => "⚠️ ",
        RiskLevel::High => "🚨",
    }
}

fn print_result(result: &AnalysisResult) {
    println!("🔗 URL: {}", result.url);
    println!("{} {} Risk", risk_badge(result.risk), result.risk);
    println!("   Verdict: {}", result.verdict);

    if !result.issues.is_empty() {
        println!("   Issues Found ({}):", result.issues.len());
        for issue in &result.issues {
            println!("     ✗ {issue}");
        }
    }

    if !result.positives.is_empty() {
        println!("   Positive Indicators ({}):", result.positives.len());
        for positive in &result.positives {
            println!("     ✓ {positive}");
        }
    }
}

fn list_examples(json: bool) {
    let links = catalog::reference_links();
    let emails = catalog::reference_emails();

    if json {
        print_json(&serde_json::json!({ "links": links, "emails": emails }));
        return;
    }

    println!("📋 Practice Links");
    println!("═══════════════════════════════════════");
    for link in &links {
        println!(
            "  [{}] {:<44} {:<10} {}",
            link.id, link.display_url, link.category, link.description
        );
    }
    println!();
    println!("📧 Practice Emails");
    println!("═══════════════════════════════════════");
    for email in &emails {
        println!(
            "  [{}] {:<10} {} (from: {})",
            email.id, email.category, email.subject, email.sender
        );
    }
}

fn show_link_example(engine: &RuleEngine, link: &ReferenceLink, json: bool) {
    let result = link.analyze(engine);

    if json {
        print_json(&serde_json::json!({ "example": link, "analysis": result }));
        return;
    }

    println!("🔎 Example {}: {}", link.id, link.description);
    println!("   Displayed as: {}", link.display_url);
    println!("   Category: {} (reference verdict: {})", link.category, link.risk_label);
    println!("   Reference indicators:");
    for indicator in &link.indicators {
        println!("     • {indicator}");
    }
    if let Some(legitimate) = &link.legitimate_version {
        println!("   Legitimate alternative: {legitimate}");
    }
    println!();
    print_result(&result);
}

fn show_email_example(engine: &RuleEngine, email: &ReferenceEmail, json: bool) {
    let results: Vec<AnalysisResult> = email
        .embedded_links()
        .iter()
        .map(|link| engine.analyze(link))
        .collect();

    if json {
        print_json(&serde_json::json!({ "example": email, "links": results }));
        return;
    }

    println!("📧 Email {} ({})", email.id, email.category);
    println!("   From: {}", email.sender);
    println!("   Subject: {}", email.subject);
    println!();
    for line in email.content.lines() {
        println!("   | {line}");
    }
    println!();

    let (label, indicators) = if email.negative_indicators.is_empty() {
        ("Positive indicators", &email.positive_indicators)
    } else {
        ("Red flags", &email.negative_indicators)
    };
    println!("   {label}:");
    for indicator in indicators {
        println!("     • {indicator}");
    }
    println!();

    if results.is_empty() {
        println!("   No links found in this email");
        return;
    }

    for result in &results {
        print_result(result);
        println!();
    }
}
