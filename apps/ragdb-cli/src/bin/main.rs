use std::env;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};

use ragdb_core::chunker::{Chunker, ChunkingConfig};
use ragdb_core::config::{expand_path, Config};
use ragdb_core::corpus::CorpusProcessor;
use ragdb_core::error::Error;
use ragdb_core::types::DocumentChunk;
use ragdb_index::IndexBuilder;
use ragdb_query::Retriever;
use ragdb_store::FsSnapshotStore;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <ingest|query> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn docs_dir(config: &Config, args: &[String]) -> PathBuf {
    args.first().map(PathBuf::from).unwrap_or_else(|| {
        let dir: String = config.get("data.docs_dir").unwrap_or_else(|_| "data/docs".to_string());
        expand_path(dir)
    })
}

fn index_dir(config: &Config) -> PathBuf {
    let dir: String = config.get("data.index_dir").unwrap_or_else(|_| "data/index".to_string());
    expand_path(dir)
}

fn ingest(config: &Config, args: &[String]) -> anyhow::Result<()> {
    let docs_dir = docs_dir(config, args);
    let index_dir = index_dir(config);
    let params = config.retrieval();
    println!("Ingesting from {}", docs_dir.display());

    let chunker = Chunker::new(ChunkingConfig::new(params.chunk_size, params.overlap)?);
    let processor = CorpusProcessor::new(chunker);
    let docs = processor.read_all(&docs_dir)?;
    if docs.is_empty() {
        return Err(Error::NoDocuments(docs_dir.display().to_string()).into());
    }

    let pb = ProgressBar::new(docs.len() as u64);
    pb.set_style(ProgressStyle::with_template(
        "{bar:40} {pos}/{len} {msg}",
    )?);
    let mut chunks: Vec<DocumentChunk> = Vec::new();
    for doc in &docs {
        pb.set_message(doc.path.clone());
        for (chunk_id, text) in chunker.chunk(&doc.text).into_iter().enumerate() {
            chunks.push(DocumentChunk { source: doc.path.clone(), chunk_id, text });
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let snapshot = IndexBuilder::new(params.max_vocab_size).build(&chunks);
    FsSnapshotStore::new(index_dir.clone()).save(&snapshot)?;

    println!("Ingest done.");
    println!("Index: {}", index_dir.display());
    println!("Documents: {}", docs.len());
    println!("Chunks: {}", chunks.len());
    println!("Vocabulary: {} terms", snapshot.vocabulary.len());
    Ok(())
}

fn parse_k(raw: &str) -> anyhow::Result<usize> {
    match raw.parse::<usize>() {
        Ok(k) if k >= 1 => Ok(k),
        _ => Err(anyhow::anyhow!("k must be a positive integer, got '{raw}'")),
    }
}

fn query(config: &Config, args: &[String]) -> anyhow::Result<()> {
    let Some(query_text) = args.first() else {
        eprintln!("Usage: ragdb query \"<query>\" [k]");
        std::process::exit(1);
    };
    if query_text.trim().is_empty() {
        println!("No query provided.");
        return Ok(());
    }
    let params = config.retrieval();
    let k = match args.get(1) {
        Some(raw) => parse_k(raw)?,
        None => params.k,
    };

    let retriever = Retriever::open(index_dir(config))?;
    let hits = retriever.retrieve(query_text, k, params.min_score);
    if hits.is_empty() {
        println!("Nothing relevant found.");
        return Ok(());
    }
    for (i, hit) in hits.iter().enumerate() {
        println!("[{}] {}#chunk{} (score={:.3})", i + 1, hit.source, hit.chunk_id, hit.score);
        println!("{}\n", hit.text);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "ingest" => ingest(&config, &args),
        "query" => query(&config, &args),
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_k;

    #[test]
    fn parse_k_accepts_positive_integers() {
        assert_eq!(parse_k("1").expect("one"), 1);
        assert_eq!(parse_k("25").expect("twenty five"), 25);
    }

    #[test]
    fn parse_k_rejects_zero_and_garbage() {
        assert!(parse_k("0").is_err());
        assert!(parse_k("-3").is_err());
        assert!(parse_k("four").is_err());
        assert!(parse_k("").is_err());
    }
}
