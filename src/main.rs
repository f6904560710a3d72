mod annotate;
mod error;
mod generate;
mod grammar;
mod output;
mod rules;
mod sexpr;
mod structs;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::process::ExitCode;

use crate::annotate::CoreNlpClient;
use crate::error::BabbleError;
use crate::structs::Cli;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(sentences) if sentences.is_empty() => {
            eprintln!("Error: no sentences could be generated.");
            ExitCode::FAILURE
        }
        Ok(sentences) => {
            for sentence in sentences {
                println!("{}", sentence);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Vec<String>, BabbleError> {
    let sentences = read_sentence_corpus(&cli.corpus)?;
    let word_forms = read_lexicon_corpus(&cli.lexicon)?;
    log::info!(
        "read {} sentences and {} word forms",
        sentences.len(),
        word_forms.len()
    );

    let parser = CoreNlpClient::new(&cli.server);
    let corpus_rules = rules::aggregate(&sentences, &parser)?;
    let lexicon_rules = rules::aggregate(&word_forms, &parser)?;
    log::info!(
        "harvested {} phrase tags and {} lexical tags from the corpus",
        corpus_rules.phrase.len(),
        corpus_rules.lexical.len()
    );

    let grammar_text = output::assemble_grammar(
        &corpus_rules.phrase,
        &lexicon_rules.lexical,
        &corpus_rules.lexical,
    );
    log::debug!("assembled grammar definition:\n{}", grammar_text);
    let compiled = match grammar::compile_grammar(&grammar_text) {
        Ok(compiled) => compiled,
        Err(e) => {
            log::error!("rejected grammar definition:\n{}", grammar_text);
            return Err(e);
        }
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(generate::generate_many(
        &compiled,
        cli.count,
        &mut rng,
        cli.max_depth,
    ))
}

// --- Corpus Reading ---

/// Reads the phrase-structure corpus: one raw sentence per line, lowercased,
/// blank lines skipped.
pub fn read_sentence_corpus(path: &Path) -> Result<Vec<String>, BabbleError> {
    let reader = open_corpus(path)?;
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            items.push(trimmed.to_lowercase());
        }
    }
    Ok(items)
}

/// Reads the lexicon corpus: each line groups comma-separated surface-form
/// alternatives, and every form becomes its own annotation item.
pub fn read_lexicon_corpus(path: &Path) -> Result<Vec<String>, BabbleError> {
    let reader = open_corpus(path)?;
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line?;
        for form in line.split(',') {
            let form = form.trim();
            if !form.is_empty() {
                items.push(form.to_lowercase());
            }
        }
    }
    Ok(items)
}

fn open_corpus(path: &Path) -> Result<BufReader<File>, BabbleError> {
    if !path.exists() {
        return Err(BabbleError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("corpus file '{}' not found", path.display()),
        )));
    }
    Ok(BufReader::new(File::open(path)?))
}
