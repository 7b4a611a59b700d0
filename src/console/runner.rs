//! End-user console: read-only configuration, chat and single queries
//! against the deployed inference API, per-user chat history, and
//! adjustable inference parameters.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use colored::Colorize;
use console_state::{
    ChatHistoryList, Conversation, DEFAULT_MODEL_PARAMS, FileTable, HistorySelection,
    ModelParams, SpinnerBusy, display_label, user_id,
};
use studio_client::{ConsoleConfig, InferenceService, ModelParamsPatch};

use crate::console::{render, shell::ConsoleShell};

pub async fn run(cfg: ConsoleConfig) -> anyhow::Result<()> {
    let busy = Arc::new(SpinnerBusy::new());
    let mut shell = ConsoleShell::connect(&cfg, busy).await?;
    let inference = InferenceService::new(shell.studio.envelope().clone());
    let user_id = user_id::load_or_create(&cfg.user_id_file)?;

    let mut files = FileTable::new(shell.snapshot.files.clone());
    let mut params = DEFAULT_MODEL_PARAMS;
    let mut convo = Conversation::seeded();
    let mut history = ChatHistoryList::new();

    // Session-start history fetch; a failure just leaves the list empty.
    let initial = {
        let _busy = shell.busy_guard();
        inference.chat_history(&user_id).await
    };
    if let Some(records) = shell.report(initial) {
        history.refresh(records);
    }

    render::overview(&shell.snapshot);
    show_prompts_readonly(&shell);
    print_help();
    prompt();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            prompt();
            continue;
        }
        let (cmd, rest) = split_command(input);

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,

            "show" => {
                render::overview(&shell.snapshot);
                show_prompts_readonly(&shell);
                let (rows, label) = files.page_view();
                render::file_page(rows, &label);
            }
            "reload" => {
                if shell.reload().await {
                    files.replace(shell.snapshot.files.clone());
                }
            }
            "files" | "next" | "prev" => {
                match cmd {
                    "next" => files.next_page(),
                    "prev" => files.prev_page(),
                    _ => {}
                }
                let (rows, label) = files.page_view();
                render::file_page(rows, &label);
            }

            "ask" if !rest.is_empty() => {
                let Some(patch) = encode_params(&params) else {
                    prompt();
                    continue;
                };
                let result = {
                    let _busy = shell.busy_guard();
                    inference.complete_primary(rest, &patch).await
                };
                if let Some(generation) = shell.report(result) {
                    println!("{}", "Last response:".bold());
                    println!("{}", generation.completion);
                    render::contexts(&generation.contexts);
                }
            }

            "chat" if !rest.is_empty() => {
                let Some(patch) = encode_params(&params) else {
                    prompt();
                    continue;
                };
                let outgoing = convo.with_user_turn(rest);
                let result = {
                    let _busy = shell.busy_guard();
                    inference
                        .chat_primary(&outgoing, &patch, Some(user_id.as_str()))
                        .await
                };
                if let Some(generation) = shell.report(result) {
                    convo.push_turn(rest, &generation.completion);
                    render::conversation(convo.messages());
                    render::contexts(&generation.contexts);

                    // The server re-derives the authoritative history; the
                    // just-updated conversation comes back first.
                    let refreshed = {
                        let _busy = shell.busy_guard();
                        inference.chat_history(&user_id).await
                    };
                    if let Some(records) = shell.report(refreshed) {
                        history.refresh_select_newest(records);
                    }
                }
            }

            "history" => show_history(&history),
            "resume" => match rest.parse::<usize>() {
                Ok(index) => {
                    history.select(HistorySelection::Record(index), &mut convo);
                    render::conversation(convo.messages());
                }
                Err(_) => println!("usage: resume <index>"),
            },
            "new-chat" => {
                history.select(HistorySelection::NewChat, &mut convo);
                println!("started a new chat");
            }

            "params" => show_params(&params),
            "params-reset" => {
                params = DEFAULT_MODEL_PARAMS;
                println!("inference settings returned to defaults");
            }
            "set" => {
                set_param(&mut params, rest);
                show_params(&params);
            }

            _ => println!("unrecognized command; `help` lists everything"),
        }
        prompt();
    }
    Ok(())
}

fn prompt() {
    print!("{} ", "runner>".bold());
    let _ = io::stdout().flush();
}

fn split_command(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (input, ""),
    }
}

/// Validates and minimally encodes the current parameters; on violations the
/// issues are alerted (one per line) and nothing is sent.
fn encode_params(params: &ModelParams) -> Option<ModelParamsPatch> {
    match params.encode_for_transport() {
        Ok(patch) => Some(patch),
        Err(e) => {
            render::alert(&e.to_string());
            None
        }
    }
}

fn show_params(params: &ModelParams) {
    render::pane("Inference settings");
    render::field("Temperature", &params.temperature.to_string());
    render::field("Presence penalty", &params.presence_penalty.to_string());
    render::field("Frequency penalty", &params.frequency_penalty.to_string());
    render::field("Max tokens", &params.max_tokens.to_string());
    for issue in params.find_issues() {
        println!("  {}", issue.red());
    }
}

fn set_param(params: &mut ModelParams, rest: &str) {
    let Some((field, value)) = rest.split_once(char::is_whitespace) else {
        println!("usage: set <temperature|presence|frequency|max_tokens> <value>");
        return;
    };
    let value = value.trim();
    match field {
        "temperature" => parse_into(value, &mut params.temperature),
        "presence" | "presence_penalty" => parse_into(value, &mut params.presence_penalty),
        "frequency" | "frequency_penalty" => parse_into(value, &mut params.frequency_penalty),
        "max_tokens" => parse_into(value, &mut params.max_tokens),
        other => println!("unknown setting {other:?}"),
    }
}

fn parse_into<T: std::str::FromStr>(value: &str, slot: &mut T) {
    match value.parse::<T>() {
        Ok(parsed) => *slot = parsed,
        Err(_) => println!("could not parse {value:?}"),
    }
}

fn show_prompts_readonly(shell: &ConsoleShell) {
    render::pane("Query prompts");
    render::field("Question answering", &shell.snapshot.query_prompts.text_qa_template);
    render::field("Refine template", &shell.snapshot.query_prompts.refine_template);
    render::pane("Chat prompts");
    render::field("Complete next chat", &shell.snapshot.chat_prompts.context_prompt);
    render::field(
        "Build a question based on history & context",
        &shell.snapshot.chat_prompts.condense_prompt,
    );
}

fn show_history(history: &ChatHistoryList) {
    render::pane("Chat history");
    println!("  {:<4} {}", "new".bold(), "begin a new chat");
    for (index, record) in history.records().iter().enumerate() {
        let marker = if history.selected() == Some(index) { "*" } else { " " };
        println!("  {marker}{index:<3} {}", display_label(record));
    }
}

fn print_help() {
    render::pane("Commands");
    for (cmd, what) in [
        ("show", "render the configuration panels"),
        ("ask <prompt>", "single query (no history)"),
        ("chat <message>", "send the next chat turn"),
        ("history", "list saved conversations"),
        ("resume <index>", "continue a saved conversation"),
        ("new-chat", "begin a new chat"),
        ("params / set <field> <value>", "inspect or change inference settings"),
        ("params-reset", "return to default settings"),
        ("files / next / prev", "browse the knowledge-base files"),
        ("quit", "leave the console"),
    ] {
        println!("  {:<30} {}", cmd.bold(), what);
    }
}
