use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pressquote::{
    AttributionConfig, EnclosedQuotePolicy, HumanReport, Lexicon, analyze_sentences,
    extract_statements, group_statements, parse_articles_file, parse_document_file,
    transform_article, write_transformed,
};
use pressquote::io::{load_config, load_vocabulary};

#[derive(Parser)]
#[command(name = "pressquote")]
#[command(author, version, about = "Attributed statement extraction from press releases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Attribution settings shared by every command
#[derive(clap::Args)]
struct EngineArgs {
    /// JSON file with an attribution configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reporting-verb list, one lemma per line
    #[arg(long)]
    verbs: Option<PathBuf>,

    /// How sentences holding both an opening and a closing quote affect grouping
    #[arg(long, value_enum)]
    enclosed_quote_policy: Option<EnclosedQuotePolicy>,

    /// Max tokens between the cue and the quote in `Smith said, "..."`
    #[arg(long)]
    start_attributed_max_gap: Option<usize>,

    /// Max tokens between the quote and the cue in `"...," said Smith`
    #[arg(long)]
    tag_first_max_gap: Option<usize>,

    /// Max tokens between the quote and the person in `"...," Smith said`
    #[arg(long)]
    person_first_max_gap: Option<usize>,

    /// Max tokens between the cue and the sentence end in `"...," Smith said`
    #[arg(long)]
    person_first_cue_tail_gap: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract attributed statements from a batch of annotated articles
    Extract {
        /// Input articles file (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file, or a directory for a timestamped file
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for a human-readable statement listing (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Only process the first N articles
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        #[command(flatten)]
        engine: EngineArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show per-sentence detection and attribution for one annotated document
    Analyze {
        /// Input annotated document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            output,
            human_readable,
            limit,
            engine,
            verbose,
        } => {
            setup_logging(verbose);
            let lexicon = build_lexicon(&engine)?;
            extract_articles(&input, &output, human_readable.as_deref(), limit, &lexicon)
        }
        Commands::Analyze {
            input,
            engine,
            verbose,
        } => {
            setup_logging(verbose);
            let lexicon = build_lexicon(&engine)?;
            analyze_document(&input, &lexicon)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = FmtSubscriber::builder().with_max_level(level);
    let installed = match EnvFilter::try_from_default_env() {
        Ok(filter) => tracing::subscriber::set_global_default(builder.with_env_filter(filter).finish()),
        Err(_) => tracing::subscriber::set_global_default(builder.finish()),
    };
    installed.ok();
}

fn build_lexicon(args: &EngineArgs) -> Result<Lexicon> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AttributionConfig::default(),
    };

    if let Some(path) = &args.verbs {
        config.reporting_verbs = load_vocabulary(path)?;
        info!(
            "Loaded {} reporting verbs from {:?}",
            config.reporting_verbs.len(),
            path
        );
    }
    if let Some(policy) = args.enclosed_quote_policy {
        config.enclosed_quote_policy = policy;
    }
    if let Some(gap) = args.start_attributed_max_gap {
        config.start_attributed_max_gap = gap;
    }
    if let Some(gap) = args.tag_first_max_gap {
        config.tag_first_max_gap = gap;
    }
    if let Some(gap) = args.person_first_max_gap {
        config.person_first_max_gap = gap;
    }
    if let Some(gap) = args.person_first_cue_tail_gap {
        config.person_first_cue_tail_gap = gap;
    }

    Lexicon::new(config).context("Invalid attribution configuration")
}

fn extract_articles(
    input: &Path,
    output: &Path,
    human_readable: Option<&Path>,
    limit: Option<usize>,
    lexicon: &Lexicon,
) -> Result<()> {
    info!("Loading articles from {:?}", input);
    let articles = parse_articles_file(input).context("Failed to parse input articles")?;
    let total = articles.len();
    let take = limit.unwrap_or(total);
    info!("Loaded {} articles, processing {}", total, take.min(total));

    let mut transformed = Vec::with_capacity(take.min(total));
    for (index, article) in articles.iter().take(take).enumerate() {
        if let Err(err) = article.annotation.validate() {
            warn!("Skipping article {} ({:?}): {}", index, article.title, err);
            continue;
        }
        transformed.push(transform_article(article, lexicon));
    }

    let written = write_transformed(&transformed, output)?;
    info!("Output written to {:?}", written);

    if let Some(path) = human_readable {
        HumanReport::new(&transformed).write_file(path)?;
        info!("Human-readable output written to {:?}", path);
    }

    let statements: usize = transformed.iter().map(|a| a.statements.len()).sum();
    info!(
        "Complete: {} statements from {} articles ({} skipped)",
        statements,
        transformed.len(),
        take.min(total) - transformed.len()
    );

    Ok(())
}

fn analyze_document(input: &Path, lexicon: &Lexicon) -> Result<()> {
    info!("Analyzing document from {:?}", input);
    let doc = parse_document_file(input).context("Failed to parse input document")?;
    let analyses = analyze_sentences(&doc, lexicon);

    println!("Document Analysis");
    println!("=================");
    println!("Characters: {}", doc.text.len());
    println!("Tokens: {}", doc.tokens.len());
    println!("Sentences: {}", doc.sentence_count());
    println!("Entities: {}", doc.entities.len());
    println!();

    println!("Sentences");
    println!("---------");
    for (sentence, analysis) in doc.sentences().zip(&analyses) {
        let markers = &analysis.markers;
        println!("[{}] {:?}", sentence.index, sentence.text().trim());
        println!(
            "    quotes: start={} mid={} end={}",
            markers.quotes.start.len(),
            markers.quotes.mid.len(),
            markers.quotes.end.len()
        );
        let cues: Vec<&str> = markers.cues.iter().map(|m| m.text.as_str()).collect();
        let persons: Vec<&str> = markers.persons.iter().map(|m| m.text.as_str()).collect();
        println!("    cues: {:?}", cues);
        println!("    persons: {:?}", persons);
        match analysis.speaker() {
            Some(speaker) => println!(
                "    attributed to {:?}, redactions {:?}",
                speaker,
                analysis.redactions(&doc)
            ),
            None => println!("    not attributed"),
        }
    }
    println!();

    let groups = group_statements(&doc, &analyses, lexicon.config().enclosed_quote_policy);
    let statements = extract_statements(&doc, lexicon);

    println!("Statements");
    println!("----------");
    for (group, statement) in groups.iter().zip(&statements) {
        let indices: Vec<usize> = group.sentence_indices().collect();
        println!(
            "{} (sentences {:?}): {}",
            statement.attributed, indices, statement.text
        );
    }
    if statements.is_empty() {
        println!("(none)");
    }

    Ok(())
}
