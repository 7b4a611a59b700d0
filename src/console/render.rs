//! Panel rendering for the terminal console.
//!
//! Stdout carries the panels; logs and alerts go to stderr so a piped
//! session stays readable.

use colored::Colorize;
use studio_client::{
    AppSnapshot, ChatMessage, ContextRecord, FileRecord, RetrievalEvalResult,
};

/// Console analog of a blocking alert dialog.
pub fn alert(detail: &str) {
    eprintln!("{} {}", "ALERT:".red().bold(), detail.red());
}

/// Session header, shown after a successful snapshot load.
pub fn title(snapshot: &AppSnapshot) {
    println!();
    println!("{}", snapshot.title().bold().underline());
}

pub fn pane(name: &str) {
    println!();
    println!("{}", format!("== {name} ==").cyan().bold());
}

pub fn field(label: &str, value: &str) {
    println!("  {} {}", format!("{label}:").dimmed(), value);
}

/// The knowledge-base and LLM panes common to both console modes.
pub fn overview(snapshot: &AppSnapshot) {
    pane("RAG Application");
    field("Application", &snapshot.app_name);
    field("Repo", &snapshot.repo_name);

    pane("Knowledge-base (for retrieval)");
    field("Embedding model", &snapshot.embed_model);
    field("Latest checkpoint", &snapshot.last_checkpoint);
    field("Files uploaded", &snapshot.files.len().to_string());

    pane("LLM (for generation)");
    field("Model name", &snapshot.llm_model);
}

/// One page of the file table plus its pagination label.
pub fn file_page(rows: &[FileRecord], label: &str) {
    pane("Files");
    println!("  {:<48} {}", "Filename".bold(), "Nodes".bold());
    for file in rows {
        println!("  {:<48} {}", file.file_name, file.node_count);
    }
    println!("  {}", label.dimmed());
}

/// Retrieved passages for the last answer.
pub fn contexts(records: &[ContextRecord]) {
    if records.is_empty() {
        return;
    }
    println!("{}", "Retrieved texts for last query:".bold());
    for record in records {
        println!(
            "  {}",
            format!("Score: {} -- File: {}", record.score, record.filename).yellow()
        );
        println!("  {}", record.context);
    }
}

/// The whole conversation, one labelled block per message.
pub fn conversation(messages: &[ChatMessage]) {
    pane("Chat");
    for message in messages {
        println!("  {}", message.role.to_string().green().bold());
        println!("  {}", message.content);
    }
}

/// Retrieval-evaluation rows: query, reference, first two retrieved texts,
/// and the three scores.
pub fn eval_table(results: &[RetrievalEvalResult]) {
    pane("Retrieval evaluation");
    if results.is_empty() {
        println!("  no results");
        return;
    }
    for result in results {
        println!("  {}", result.query.bold());
        if let Some(expected) = result.expected_texts.first() {
            field("expected", expected);
        }
        for (i, retrieved) in result.retrieved_texts.iter().take(2).enumerate() {
            field(&format!("retrieved {i}"), retrieved);
        }
        println!(
            "  {}",
            format!(
                "precision={} recall={} hit_rate={}",
                result.metrics.precision, result.metrics.recall, result.metrics.hit_rate
            )
            .dimmed()
        );
    }
}
