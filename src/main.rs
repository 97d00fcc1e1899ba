//! six-degrees CLI: word graph paths, semantic scoring and structural audit.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use six_degrees::analysis::{
    AuditReport, Evaluation, PairScore, PathProbe, PathScore, PathScorer, Verdict, audit,
    evaluate, probe, score_pairs,
};
use six_degrees::config::AnalysisConfig;
use six_degrees::graph::analytics::connectivity;
use six_degrees::graph::{PathFinder, WordGraph, classify};

/// Pairs evaluated when none are given.
const DEFAULT_PAIRS: [(&str, &str); 5] = [
    ("Cat", "Political"),
    ("Tool", "Theory"),
    ("Fish", "Furniture"),
    ("Horse", "Economic"),
    ("Vehicle", "Belief"),
];

#[derive(Parser)]
#[command(
    name = "six-degrees",
    version,
    about = "Word knowledge graph: paths, semantic scoring and audit"
)]
struct Cli {
    /// Master word document (JSON).
    #[arg(long, global = true, default_value = "data/processed/unified_master.json")]
    data: PathBuf,

    /// Analysis configuration (TOML). Built-in tables when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Only log warnings and errors.
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the shortest path between two words.
    Path { start: String, end: String },

    /// Classify the relation between two adjacent words.
    Classify { from: String, to: String },

    /// Score a given word path.
    Score {
        /// Words of the path, in order.
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },

    /// Find a path and explain every step.
    Probe { start: String, end: String },

    /// Find, score and summarize paths for many word pairs.
    Evaluate {
        /// Pairs written as START:END.
        pairs: Vec<String>,

        /// File with one START:END pair per line (`#` starts a comment).
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Audit the whole graph for gaps and structural defects.
    Audit {
        /// Maximum words listed per finding in text output.
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Print the effective configuration as TOML.
    Config,

    /// Show graph statistics, or one word's record.
    Info { word: Option<String> },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    let finder = match config.search.max_visited {
        Some(max) => PathFinder::new().with_max_visited(max),
        None => PathFinder::new(),
    };

    let load_graph = || WordGraph::load(&cli.data);

    match cli.command {
        Commands::Config => print!("{}", config.to_toml()?),

        Commands::Path { start, end } => {
            let graph = load_graph()?;
            let path = finder.shortest_path(&graph, &start, &end);
            if cli.json {
                return print_json(&path);
            }
            match path {
                Some(p) => {
                    println!("{}", p.join(" → "));
                    println!("  {} steps", p.len().saturating_sub(1));
                }
                None => println!("No path found between {start} and {end}"),
            }
        }

        Commands::Classify { from, to } => {
            let graph = load_graph()?;
            let connection = classify(&graph, &from, &to);
            if cli.json {
                return print_json(&connection);
            }
            println!("{from} → {to}: {}", connection.relation);
            println!("  {}", connection.describe());
            println!("  semantic distance: {}", connection.semantic_distance);
        }

        Commands::Score { words } => {
            let graph = load_graph()?;
            let score = PathScorer::new(&graph, &config).score_path(&words);
            if cli.json {
                return print_json(&score);
            }
            print_score(&score, &config);
        }

        Commands::Probe { start, end } => {
            let graph = load_graph()?;
            let result = probe(&graph, &finder, &config.heuristics, &start, &end);
            if cli.json {
                return print_json(&result);
            }
            print_probe(&result);
        }

        Commands::Evaluate { pairs, file } => {
            let graph = load_graph()?;
            let mut parsed = Vec::new();
            if let Some(file) = &file {
                parsed.extend(read_pairs(file)?);
            }
            for pair in &pairs {
                parsed.push(parse_pair(pair)?);
            }
            if parsed.is_empty() {
                parsed = DEFAULT_PAIRS
                    .iter()
                    .map(|(a, b)| (a.to_string(), b.to_string()))
                    .collect();
            }

            let results = score_pairs(&graph, &finder, &config, &parsed);
            let found: Vec<PathScore> = results.iter().filter_map(|r| r.score.clone()).collect();
            let summary = evaluate(&found, &config.scoring);

            if cli.json {
                #[derive(Serialize)]
                struct EvaluateOutput<'a> {
                    results: &'a [PairScore],
                    summary: &'a Evaluation,
                }
                return print_json(&EvaluateOutput {
                    results: &results,
                    summary: &summary,
                });
            }

            for (i, result) in results.iter().enumerate() {
                println!("\nPath {}: {} → {}", i + 1, result.start, result.end);
                println!("{}", "-".repeat(40));
                match &result.score {
                    Some(score) => print_score(score, &config),
                    None => println!("No path found between these words"),
                }
            }

            println!("\n{}", "=".repeat(60));
            println!("Evaluation summary");
            println!("  paths scored:  {}", summary.total_paths);
            println!("  valid:         {}", summary.valid_paths);
            println!("  acceptable:    {}", summary.acceptable_paths);
            println!("  flagged:       {}", summary.flagged_paths);
            println!("  average score: {:.1}", summary.average_score);
            let unconnected = results.len() - summary.total_paths;
            if unconnected > 0 {
                println!("  no path:       {unconnected}");
            }
            if !summary.common_issues.is_empty() {
                println!("  common issues:");
                for issue in &summary.common_issues {
                    println!("    • {issue}");
                }
            }
        }

        Commands::Audit { limit } => {
            let graph = load_graph()?;
            let report = audit(&graph, &config.heuristics);
            if cli.json {
                return print_json(&report);
            }
            print_audit(&report, limit);
        }

        Commands::Info { word } => {
            let graph = load_graph()?;
            print_info(&graph, word.as_deref(), &cli.data, &config, cli.json)?;
        }
    }

    Ok(())
}

fn print_info(
    graph: &WordGraph,
    word: Option<&str>,
    data: &Path,
    config: &AnalysisConfig,
    json: bool,
) -> Result<()> {
    match word {
        Some(word) => {
            let Some(entry) = graph.get(word) else {
                miette::bail!("unknown word: {word}");
            };
            if json {
                return print_json(entry);
            }
            println!("Word: \"{}\"", entry.id);
            println!("  parent:        {}", entry.parent.as_deref().unwrap_or("-"));
            println!("  type:          {}", entry.kind.as_deref().unwrap_or("-"));
            println!("  children:      {}", entry.children.join(", "));
            println!("  traits:        {}", entry.traits.join(", "));
            println!("  acquaintances: {}", entry.acquaintances.join(", "));
            for (stage, done) in &entry.stages {
                println!("  {stage}: {done}");
            }
        }
        None => {
            let conn = connectivity(graph, &config.heuristics.universal_connector);
            let roots = graph.entries().filter(|e| e.is_root()).count();
            if json {
                #[derive(Serialize)]
                struct InfoOutput {
                    words: usize,
                    roots: usize,
                    components: usize,
                    isolated: usize,
                    detached_from_connector: usize,
                }
                return print_json(&InfoOutput {
                    words: graph.len(),
                    roots,
                    components: conn.components.len(),
                    isolated: conn.isolated.len(),
                    detached_from_connector: conn.detached_from_connector.len(),
                });
            }
            println!("Word graph: {}", data.display());
            println!("  words:      {}", graph.len());
            println!("  roots:      {roots}");
            println!("  components: {}", conn.components.len());
            println!("  isolated:   {}", conn.isolated.len());
            println!(
                "  not connected to '{}': {}",
                config.heuristics.universal_connector,
                conn.detached_from_connector.len()
            );
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

fn parse_pair(text: &str) -> Result<(String, String)> {
    match text.split_once(':') {
        Some((a, b)) if !a.trim().is_empty() && !b.trim().is_empty() => {
            Ok((a.trim().to_string(), b.trim().to_string()))
        }
        _ => miette::bail!("expected a pair written as START:END, got {text:?}"),
    }
}

fn read_pairs(path: &Path) -> Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path).into_diagnostic()?;
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_pair)
        .collect()
}

fn print_score(score: &PathScore, config: &AnalysisConfig) {
    println!("Path: {}", score.path.join(" → "));
    let verdict = score.verdict(&config.scoring);
    let mark = match verdict {
        Verdict::Valid => "✓",
        Verdict::Acceptable => "⚠",
        Verdict::Flagged => "✗",
    };
    println!("Semantic score: {}/{} {mark} {verdict}", score.score, config.scoring.initial_score);

    for (i, step) in score.steps.iter().enumerate() {
        let note = if step.logical { "" } else { "  [illogical]" };
        println!(
            "  Step {}: {} → {} ({}, distance {}){note}",
            i + 1,
            step.from,
            step.to,
            step.relation,
            step.semantic_distance
        );
    }
    if !score.strengths.is_empty() {
        println!("Strengths:");
        for s in &score.strengths {
            println!("  ✓ {s}");
        }
    }
    if !score.issues.is_empty() {
        println!("Issues:");
        for issue in &score.issues {
            println!("  ⚠ {issue}");
        }
    }
}

fn print_probe(result: &PathProbe) {
    let Some(path) = &result.path else {
        println!("No path found between {} and {}", result.start, result.end);
        for issue in &result.issues {
            println!("  • {issue}");
        }
        return;
    };
    println!("Path found: {}", path.join(" → "));
    println!("Path length: {} words", path.len());
    println!("\nStep-by-step analysis:");
    for step in &result.steps {
        println!("  Step {}: {} → {}", step.step, step.from, step.to);
        println!("    Relationship: {}", step.description);
    }
    println!("\nSemantic evaluation:");
    if result.issues.is_empty() {
        println!("  • No semantic issues detected");
    }
    for issue in &result.issues {
        println!("  • {issue}");
    }
}

fn print_list(title: &str, words: &[String], limit: usize) {
    if words.is_empty() {
        return;
    }
    println!("  {title} ({}):", words.len());
    let shown: Vec<&str> = words.iter().take(limit).map(String::as_str).collect();
    let more = words.len().saturating_sub(limit);
    if more > 0 {
        println!("    {} ... and {more} more", shown.join(", "));
    } else {
        println!("    {}", shown.join(", "));
    }
}

fn print_audit(report: &AuditReport, limit: usize) {
    println!("Structural audit: {} words", report.total_words);

    println!("\nCategories:");
    let mut counts: Vec<(&String, &usize)> = report.category_counts.iter().collect();
    counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (category, count) in counts.iter().take(limit) {
        println!("  {category}: {count}");
    }

    println!("\nCompleteness:");
    let leaves: Vec<String> = report
        .suspicious_leaves
        .iter()
        .map(|l| match &l.parent {
            Some(p) => format!("{} ({p})", l.word),
            None => l.word.clone(),
        })
        .collect();
    print_list("leaves expected to have children", &leaves, limit);
    println!("  words without traits: {}", report.trait_empty_count());
    for (category, words) in report.trait_empty.iter().take(limit) {
        print_list(&format!("under {category}"), words, limit);
    }
    println!("  words without acquaintances: {}", report.acquaintance_empty_count());
    for gap in &report.major_category_gaps {
        print_list(&format!("{} subtypes without children", gap.category), &gap.words, limit);
    }
    for gap in &report.unprocessed_subtypes {
        print_list(&format!("{} subtypes not logged", gap.category), &gap.words, limit);
    }

    println!("\nProcessing:");
    let p = &report.processing;
    println!("  fully processed:     {}", p.fully_processed);
    println!("  partially processed: {}", p.partially_processed);
    println!("  unprocessed:         {}", p.unprocessed);
    println!("  orphan adopted:      {}", p.orphan_adopted);
    println!("  incomplete entries:  {}", report.incomplete_stage_entries.len());
    for pattern in report.incomplete_patterns.iter().take(limit) {
        print_list(
            &format!("missing {}", pattern.missing.join(", ")),
            &pattern.words,
            limit,
        );
    }
    println!("  stage patterns:");
    for pattern in report.stage_patterns.iter().take(limit) {
        let label = pattern.label();
        let label = if label.is_empty() { "(no stages)".to_string() } else { label };
        println!("    {} words: {label}", pattern.words.len());
    }

    println!("\nDepth:");
    for (depth, words) in &report.depth_by_level {
        println!("  level {depth}: {} words", words.len());
    }
    print_list("cyclic ancestry", &report.cyclic_ancestry, limit);

    println!("\nConnectivity:");
    let c = &report.connectivity;
    println!("  components: {}", c.components.len());
    print_list("isolated", &c.isolated, limit);
    print_list("not connected to the universal connector", &c.detached_from_connector, limit);

    println!("\nIntegrity:");
    if report.is_consistent() {
        println!("  ✓ no violations");
    } else {
        println!("  {} violations", report.integrity_violations.len());
        for v in report.integrity_violations.iter().take(limit) {
            println!("  ✗ {}", v.describe());
        }
        let more = report.integrity_violations.len().saturating_sub(limit);
        if more > 0 {
            println!("  ... and {more} more");
        }
    }
}
