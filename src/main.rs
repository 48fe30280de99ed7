mod matching;
mod models;
mod resume;
mod store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use matching::Vocabulary;
use models::{PostingRecord, RankedRow};
use std::collections::HashSet;
use std::path::PathBuf;
use store::Store;

#[derive(Parser)]
#[command(name = "scout")]
#[command(about = "Job search automation - ingest scraped postings and rank them against your skills")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge a batch of scraped postings into the dataset
    Ingest {
        /// JSON file containing an array of scraped posting records
        batch: PathBuf,

        /// Dataset path (defaults to the platform data directory)
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Show what would change without writing the dataset
        #[arg(long)]
        dry_run: bool,
    },

    /// Rank the dataset by keyword match against a skill vocabulary
    Rank {
        /// Dataset path (defaults to the platform data directory)
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Inline skill keywords (comma-separated); overrides --resume
        #[arg(short, long, value_delimiter = ',')]
        keywords: Vec<String>,

        /// Resume text file to extract the vocabulary from
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Write the full annotated ranking to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of postings to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Extract skill keywords from a resume text file
    Skills {
        /// Resume text file
        file: PathBuf,

        /// Heading that opens the skills section
        #[arg(long, default_value = resume::DEFAULT_START_MARKER)]
        from: String,

        /// Heading that closes the skills section
        #[arg(long, default_value = resume::DEFAULT_END_MARKER)]
        to: String,
    },

    /// Show the current dataset
    List {
        /// Dataset path (defaults to the platform data directory)
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },
}

fn open_store(dataset: Option<PathBuf>) -> Store {
    match dataset {
        Some(path) => Store::new(path),
        None => Store::open_default(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            batch,
            dataset,
            dry_run,
        } => {
            let store = open_store(dataset);

            let raw = std::fs::read_to_string(&batch)
                .with_context(|| format!("Failed to read batch file: {}", batch.display()))?;
            let incoming: Vec<PostingRecord> = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse batch file: {}", batch.display()))?;

            let existing = store.load()?;
            let existing_keys: HashSet<String> = existing
                .iter()
                .filter_map(|r| r.dedup_key().map(str::to_string))
                .collect();
            let updated = incoming
                .iter()
                .filter_map(PostingRecord::dedup_key)
                .collect::<HashSet<_>>()
                .into_iter()
                .filter(|k| existing_keys.contains(*k))
                .count();

            let before = existing.len();
            let read = incoming.len();
            let merged = store::merge(existing, incoming);
            let added = merged.len().saturating_sub(before);

            println!("Batch records read: {}", read);
            println!("  New postings:     {}", added);
            println!("  Updated postings: {}", updated);
            println!("  Dataset total:    {}", merged.len());

            if dry_run {
                println!("\n(Dry run - dataset not written)");
            } else {
                store.save(&merged)?;
                println!("Dataset saved to {}", store.path().display());
            }
        }

        Commands::Rank {
            dataset,
            keywords,
            resume,
            output,
            limit,
        } => {
            let store = open_store(dataset);
            if !store.path().exists() {
                anyhow::bail!(
                    "No dataset at {}. Run 'scout ingest' first.",
                    store.path().display()
                );
            }
            let postings = store.load()?;

            let vocabulary = if !keywords.is_empty() {
                Vocabulary::new(keywords)
            } else if let Some(resume_path) = resume {
                let text = std::fs::read_to_string(&resume_path).with_context(|| {
                    format!("Failed to read resume file: {}", resume_path.display())
                })?;
                Vocabulary::new(resume::extract_skills_default(&text)?)
            } else {
                Vocabulary::default_skills()
            };

            println!(
                "Ranking {} posting(s) against {} keyword(s)...",
                postings.len(),
                vocabulary.len()
            );
            let ranked = matching::rank(postings, &vocabulary);

            if ranked.is_empty() {
                println!("No postings to rank.");
            } else {
                println!(
                    "{:<5} {:>7} {:<30} {:<20} {:<30}",
                    "RANK", "SCORE", "TITLE", "COMPANY", "MATCHED"
                );
                println!("{}", "-".repeat(96));
                for (i, r) in ranked.iter().take(limit).enumerate() {
                    println!(
                        "{:<5} {:>7.2} {:<30} {:<20} {:<30}",
                        i + 1,
                        r.match_score,
                        truncate(&r.record.title, 28),
                        truncate(&r.record.company, 18),
                        truncate(&r.matched_keywords.join(", "), 28)
                    );
                }
            }

            if let Some(out_path) = output {
                let mut writer = csv::Writer::from_path(&out_path)
                    .with_context(|| format!("Failed to write ranking to {}", out_path.display()))?;
                for r in &ranked {
                    writer.serialize(RankedRow::from(r))?;
                }
                writer.flush()?;
                println!("\nRanked postings exported to {}", out_path.display());
            }
        }

        Commands::Skills { file, from, to } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read resume file: {}", file.display()))?;
            let skills = resume::extract_skills(&text, &from, &to)?;

            if skills.is_empty() {
                println!("No skills found.");
            } else {
                for skill in &skills {
                    println!("{}", skill);
                }
                println!("\nTotal keywords extracted: {}", skills.len());
            }
        }

        Commands::List { dataset } => {
            let store = open_store(dataset);
            let postings = store.load()?;
            if postings.is_empty() {
                println!("No postings found.");
            } else {
                println!(
                    "{:<30} {:<20} {:<15} {:<30}",
                    "TITLE", "COMPANY", "SOURCE", "LINK"
                );
                println!("{}", "-".repeat(97));
                for p in &postings {
                    println!(
                        "{:<30} {:<20} {:<15} {:<30}",
                        truncate(&p.title, 28),
                        truncate(&p.company, 18),
                        truncate(&p.source, 13),
                        truncate(&p.link, 28)
                    );
                }
                println!(
                    "\n{} posting(s) in {}",
                    postings.len(),
                    store.path().display()
                );
            }
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    // Back the cut up to a char boundary so multibyte text can't panic
    let mut cut = max.saturating_sub(3);
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}
