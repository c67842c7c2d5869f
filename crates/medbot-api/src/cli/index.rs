//! `medbot index`: build the document index the backend answers from.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use medbot_infra::documents::chunker::DocumentChunker;
use medbot_infra::documents::indexer::{DocumentIndexer, IndexReport};
use medbot_infra::vector::embedder::FastEmbedder;
use medbot_infra::vector::{model_cache_dir, open_chunk_store, resolve_index_dir};
use medbot_types::config::RetrievalConfig;

pub async fn index_documents(
    dir: &Path,
    config: &RetrievalConfig,
    data_dir: &Path,
) -> anyhow::Result<()> {
    let chunker = DocumentChunker::try_from(config)?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Loading embedding model...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let embedder = FastEmbedder::new(model_cache_dir(data_dir))?;
    let store = open_chunk_store(config, data_dir).await?;
    let indexer = DocumentIndexer::new(&embedder, &store, chunker);

    spinner.set_message(format!("Indexing {}...", dir.display()));
    let report = indexer
        .index_dir(dir, |chunks| spinner.set_message(format!("Embedded {chunks} chunks")))
        .await;
    spinner.finish_and_clear();

    let report = report?;
    print_report(&report, config, data_dir);
    Ok(())
}

fn print_report(report: &IndexReport, config: &RetrievalConfig, data_dir: &Path) {
    println!(
        "  {} Indexed {} documents into {} chunks",
        console::style("✓").green(),
        report.documents,
        report.chunks
    );
    println!(
        "  {}",
        console::style(format!(
            "table {} at {}",
            config.table,
            resolve_index_dir(config, data_dir).display()
        ))
        .dim()
    );
    if !report.skipped.is_empty() {
        println!(
            "  {} skipped (only .txt and .md are indexed): {}",
            console::style("!").yellow(),
            report.skipped.join(", ")
        );
    }
}
