//! # faqroute: FAQ vs. product intent router
//!
//! Loads a shop FAQ knowledge base and catalog categories once, then decides
//! for each utterance whether to answer from the FAQ or hand off to product
//! search.
//!
//! Usage:
//!   faqroute classify "Wie lange ist die Lieferzeit?"
//!   faqroute batch < utterances.txt           # one outcome per line
//!   faqroute --json batch < utterances.txt    # JSON lines
//!   faqroute check                            # validate knowledge base + catalog
//!   faqroute init                             # write a default config.toml

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use faqroute_core::FaqRouteConfig;
use faqroute_intent::{ClassificationOutcome, IntentClassifier};
use faqroute_knowledge::{CategoryIndex, KnowledgeBase};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "faqroute",
    version,
    about = "📖 faqroute: route shop questions to FAQ answers or product search"
)]
struct Cli {
    /// Config file (default: ~/.faqroute/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// FAQ knowledge base JSON (overrides config)
    #[arg(long, global = true)]
    kb: Option<PathBuf>,

    /// Product catalog JSON used for category detection (overrides config)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Minimum hit-density score for an FAQ match (overrides config)
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Print outcomes as JSON lines
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one utterance
    Classify {
        /// Utterance (multiple words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Classify utterances from stdin, one per line
    Batch,
    /// Load and validate the knowledge base and catalog
    Check,
    /// Write a config file with defaults (flags are applied on top)
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(cli: &Cli) {
    let filter = if cli.verbose {
        "faqroute=debug,faqroute_intent=debug,faqroute_knowledge=debug,faqroute_core=debug"
    } else {
        "faqroute=info,faqroute_knowledge=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Command-line flags win over the config file.
fn apply_overrides(config: &mut FaqRouteConfig, cli: &Cli) -> Result<()> {
    if let Some(kb) = &cli.kb {
        config.knowledge_base = kb.to_string_lossy().into_owned();
    }
    if let Some(catalog) = &cli.catalog {
        config.catalog = catalog.to_string_lossy().into_owned();
    }
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    config.validate()?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<FaqRouteConfig> {
    let mut config = match &cli.config {
        Some(path) => FaqRouteConfig::load_from(path)?,
        None => FaqRouteConfig::load()?,
    };
    apply_overrides(&mut config, cli)?;
    Ok(config)
}

fn load_categories(config: &FaqRouteConfig, explicit: bool) -> Result<CategoryIndex> {
    let Some(path) = config.catalog_path() else {
        return Ok(CategoryIndex::new());
    };
    if !explicit && !path.exists() {
        tracing::warn!(
            "⚠️ No catalog at {}, recommendation requests are not gated by category",
            path.display()
        );
        return Ok(CategoryIndex::new());
    }
    Ok(CategoryIndex::load(&path)?)
}

fn print_outcome(
    out: &mut impl Write,
    text: &str,
    outcome: &ClassificationOutcome,
    kb: &KnowledgeBase,
    json: bool,
) -> Result<()> {
    if json {
        let line = serde_json::json!({
            "text": text,
            "result": outcome,
            "answer": outcome.answer(kb),
        });
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
        return Ok(());
    }

    match outcome {
        ClassificationOutcome::FaqMatch { topic_id, score } => {
            writeln!(out, "✅ FAQ: {topic_id} (score {score:.3})")?;
            if let Some(answer) = outcome.answer(kb).filter(|a| !a.is_empty()) {
                writeln!(out, "   {answer}")?;
            }
        }
        ClassificationOutcome::NoMatch => writeln!(out, "🛍️ No FAQ match, hand off to product search")?,
    }
    Ok(())
}

/// Classify every non-blank line of `input`.
///
/// Lines are decoded lossily: bytes that are not UTF-8 become U+FFFD and the
/// line is still classified.
fn run_batch(classifier: &IntentClassifier, mut input: impl BufRead, out: &mut impl Write, json: bool) -> Result<()> {
    let mut buf = Vec::new();
    let mut total = 0usize;
    let mut matched = 0usize;
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).context("Failed to read input")? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }
        let outcome = classifier.classify(line);
        total += 1;
        if outcome.is_faq_match() {
            matched += 1;
        }
        if json {
            print_outcome(out, line, &outcome, classifier.knowledge_base(), true)?;
        } else {
            writeln!(out, "{outcome}\t{line}")?;
        }
    }
    tracing::info!("Classified {total} utterances, {matched} routed to FAQ");
    Ok(())
}

fn run_check(classifier: &IntentClassifier, config: &FaqRouteConfig, out: &mut impl Write) -> Result<()> {
    let kb = classifier.knowledge_base();
    writeln!(out, "📚 Knowledge base: {}", config.knowledge_base_path().display())?;
    writeln!(out, "   {} topics (v{}, language {})", kb.len(), kb.version(), kb.language())?;
    for topic in kb.topics() {
        let marker = if topic.keywords().is_empty() { "⚠️" } else { "  " };
        writeln!(out, "   {marker} {:<20} {} keywords", topic.id(), topic.keywords().len())?;
    }

    let categories = classifier.categories();
    let mut names: Vec<_> = categories.iter().collect();
    names.sort_unstable();
    writeln!(out, "🏷️ Catalog categories: {}", categories.len())?;
    if !names.is_empty() {
        writeln!(out, "   {}", names.join(", "))?;
    }

    let rules = classifier.gate().rules();
    writeln!(
        out,
        "🧰 Rules: {} currency markers, {} budget words, {} recommendation phrases, {} strong FAQ signals",
        rules.currency_markers.len(),
        rules.budget_words.len(),
        rules.recommendation_phrases.len(),
        rules.strong_faq_signals.len()
    )?;
    writeln!(out, "🎯 Threshold: {:.3}", classifier.threshold())?;
    Ok(())
}

fn run_init(cli: &Cli, force: bool) -> Result<PathBuf> {
    let path = cli.config.clone().unwrap_or_else(FaqRouteConfig::default_path);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let mut config = FaqRouteConfig::default();
    apply_overrides(&mut config, cli)?;
    config
        .save_to(&path)
        .with_context(|| format!("Cannot write config {}", path.display()))?;
    Ok(path)
}

fn load_classifier(cli: &Cli) -> Result<(FaqRouteConfig, IntentClassifier)> {
    let config = load_config(cli)?;
    let kb_path = config.knowledge_base_path();
    let kb = KnowledgeBase::load(&kb_path)
        .with_context(|| format!("Cannot load knowledge base {}", kb_path.display()))?;
    let categories = load_categories(&config, cli.catalog.is_some())?;
    let classifier = IntentClassifier::from_config(&config, Arc::new(kb), Arc::new(categories))?;
    Ok((config, classifier))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut stdout = std::io::stdout().lock();
    match &cli.command {
        Command::Classify { text } => {
            let (_, classifier) = load_classifier(&cli)?;
            let text = text.join(" ");
            let outcome = classifier.classify(&text);
            print_outcome(&mut stdout, &text, &outcome, classifier.knowledge_base(), cli.json)?;
        }
        Command::Batch => {
            let (_, classifier) = load_classifier(&cli)?;
            run_batch(&classifier, std::io::stdin().lock(), &mut stdout, cli.json)?;
        }
        Command::Check => {
            let (config, classifier) = load_classifier(&cli)?;
            run_check(&classifier, &config, &mut stdout)?;
        }
        Command::Init { force } => {
            let path = run_init(&cli, *force)?;
            writeln!(stdout, "📝 Config written to {}", path.display())?;
        }
    }

    Ok(())
}
