//! Interactive retrieval prompt: type a question, see the ranked
//! context chunks the index would hand to a generator. No LLM is
//! called; the rendered answer is a scaffold around the raw contexts.

use std::io::{self, BufRead, Write};

use ragdb_core::config::{expand_path, Config};
use ragdb_core::types::RankedChunk;
use ragdb_query::Retriever;

fn render_answer(query: &str, contexts: &[RankedChunk]) -> String {
    let ctx_text: Vec<String> = contexts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!("[{}] {}#chunk{} (score={:.3})\n{}", i + 1, c.source, c.chunk_id, c.score, c.text)
        })
        .collect();

    format!(
        "[minimal retrieval demo, no LLM involved]\n\
         Question: {query}\n\n\
         Retrieved context chunks (check the retrieval first):\n\
         {}\n\n\
         Next step would be handing these chunks to a generator as context.",
        ctx_text.join("\n\n")
    )
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load()?;
    let index_dir: String =
        config.get("data.index_dir").unwrap_or_else(|_| "data/index".to_string());
    let params = config.retrieval();
    let retriever = Retriever::open(expand_path(index_dir))?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("query> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let query = line?.trim().to_string();
        if query.is_empty() {
            println!("No query provided, exiting.");
            break;
        }

        let contexts = retriever.retrieve(&query, params.k, params.min_score);
        if contexts.is_empty() {
            println!("Nothing relevant found.");
            continue;
        }

        println!("\n{}", "=".repeat(80));
        println!("{}", render_answer(&query, &contexts));
        println!("{}\n", "=".repeat(80));
    }
    Ok(())
}
