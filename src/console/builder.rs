//! Operator console: edit the application, feed the knowledge base, try the
//! pipeline, and run retrieval evaluation.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use colored::Colorize;
use console_state::{
    Conversation, FileTable, SettingsDraft, SpinnerBusy,
    prompt_defaults::{
        CHAT_CONDENSE_TEMPLATE, CHAT_CONTEXT_TEMPLATE, QUERY_QA_TEMPLATE, QUERY_REFINE_TEMPLATE,
    },
};
use studio_client::{
    AppSnapshot, ChatPrompts, ConsoleConfig, QueryPrompts,
    services::studio_service::{
        UPDATE_APP_NAME_PATH, UPDATE_CHAT_PROMPTS_PATH, UPDATE_EMBEDDING_MODEL_PATH,
        UPDATE_MODEL_PATH, UPDATE_QUERY_PROMPTS_PATH,
    },
    structs::requests::{UpdateAppName, UpdateEmbeddingModel, UpdateModel},
};

use crate::console::{render, shell::ConsoleShell};

/// Per-panel draft state, seeded from the snapshot and reconciled after
/// every reload (last-writer-wins, see `console_state::SettingsDraft`).
struct BuilderDrafts {
    model: SettingsDraft,
    embed: SettingsDraft,
    text_qa: SettingsDraft,
    refine: SettingsDraft,
    context: SettingsDraft,
    condense: SettingsDraft,
}

impl BuilderDrafts {
    fn seed(snapshot: &AppSnapshot) -> Self {
        Self {
            model: SettingsDraft::without_default(&snapshot.llm_model),
            embed: SettingsDraft::without_default(&snapshot.embed_model),
            text_qa: SettingsDraft::new(&snapshot.query_prompts.text_qa_template, QUERY_QA_TEMPLATE),
            refine: SettingsDraft::new(&snapshot.query_prompts.refine_template, QUERY_REFINE_TEMPLATE),
            context: SettingsDraft::new(&snapshot.chat_prompts.context_prompt, CHAT_CONTEXT_TEMPLATE),
            condense: SettingsDraft::new(
                &snapshot.chat_prompts.condense_prompt,
                CHAT_CONDENSE_TEMPLATE,
            ),
        }
    }

    fn reconcile(&mut self, snapshot: &AppSnapshot) {
        self.model.reconcile(&snapshot.llm_model);
        self.embed.reconcile(&snapshot.embed_model);
        self.text_qa.reconcile(&snapshot.query_prompts.text_qa_template);
        self.refine.reconcile(&snapshot.query_prompts.refine_template);
        self.context.reconcile(&snapshot.chat_prompts.context_prompt);
        self.condense.reconcile(&snapshot.chat_prompts.condense_prompt);
    }
}

pub async fn run(cfg: ConsoleConfig) -> anyhow::Result<()> {
    let busy = Arc::new(SpinnerBusy::new());
    let mut shell = ConsoleShell::connect(&cfg, busy).await?;

    let mut drafts = BuilderDrafts::seed(&shell.snapshot);
    let mut files = FileTable::new(shell.snapshot.files.clone());
    let mut convo = Conversation::seeded();

    render::overview(&shell.snapshot);
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
                let (rows, label) = files.page_view();
                render::file_page(rows, &label);
            }
            "reload" => {
                if shell.reload().await {
                    sync_after_reload(&shell.snapshot, &mut drafts, &mut files);
                }
            }

            "name" if !rest.is_empty() => {
                let committed = shell
                    .commit(UPDATE_APP_NAME_PATH, &UpdateAppName { app_name: rest.to_string() })
                    .await;
                if committed {
                    sync_after_reload(&shell.snapshot, &mut drafts, &mut files);
                    render::title(&shell.snapshot);
                }
            }
            "model" if !rest.is_empty() => {
                drafts.model.set_draft(rest);
                if !drafts.model.can_submit() {
                    println!("model unchanged");
                } else if shell
                    .commit(UPDATE_MODEL_PATH, &UpdateModel { model_name: rest.to_string() })
                    .await
                {
                    sync_after_reload(&shell.snapshot, &mut drafts, &mut files);
                }
            }
            "embed" if !rest.is_empty() => {
                drafts.embed.set_draft(rest);
                if !drafts.embed.can_submit() {
                    println!("embedding model unchanged");
                } else if shell
                    .commit(
                        UPDATE_EMBEDDING_MODEL_PATH,
                        &UpdateEmbeddingModel { embedding_model: rest.to_string() },
                    )
                    .await
                {
                    sync_after_reload(&shell.snapshot, &mut drafts, &mut files);
                }
            }

            "qa" if !rest.is_empty() => edit_prompt(&mut drafts.text_qa, "question answering", rest),
            "refine" if !rest.is_empty() => edit_prompt(&mut drafts.refine, "refine", rest),
            "ctx" if !rest.is_empty() => edit_prompt(&mut drafts.context, "chat context", rest),
            "condense" if !rest.is_empty() => edit_prompt(&mut drafts.condense, "chat condense", rest),
            "prompts" => show_prompts(&drafts),

            "reset-query" => {
                drafts.text_qa.reset_to_default();
                drafts.refine.reset_to_default();
                println!("query prompt drafts reset to defaults (submit-query to persist)");
            }
            "reset-chat" => {
                drafts.context.reset_to_default();
                drafts.condense.reset_to_default();
                println!("chat prompt drafts reset to defaults (submit-chat to persist)");
            }
            "submit-query" => {
                if !drafts.text_qa.can_submit() && !drafts.refine.can_submit() {
                    println!("query prompts unchanged; nothing to submit");
                } else {
                    let body = QueryPrompts {
                        text_qa_template: drafts.text_qa.draft().to_string(),
                        refine_template: drafts.refine.draft().to_string(),
                    };
                    if shell.commit(UPDATE_QUERY_PROMPTS_PATH, &body).await {
                        sync_after_reload(&shell.snapshot, &mut drafts, &mut files);
                    }
                }
            }
            "submit-chat" => {
                if !drafts.context.can_submit() && !drafts.condense.can_submit() {
                    println!("chat prompts unchanged; nothing to submit");
                } else {
                    let body = ChatPrompts {
                        context_prompt: drafts.context.draft().to_string(),
                        condense_prompt: drafts.condense.draft().to_string(),
                    };
                    if shell.commit(UPDATE_CHAT_PROMPTS_PATH, &body).await {
                        sync_after_reload(&shell.snapshot, &mut drafts, &mut files);
                    }
                }
            }

            "files" => {
                let (rows, label) = files.page_view();
                render::file_page(rows, &label);
            }
            "next" => {
                files.next_page();
                let (rows, label) = files.page_view();
                render::file_page(rows, &label);
            }
            "prev" => {
                files.prev_page();
                let (rows, label) = files.page_view();
                render::file_page(rows, &label);
            }
            "page" => {
                match rest.parse::<i64>() {
                    Ok(requested) => files.set_page(requested),
                    Err(_) => println!("usage: page <number>"),
                }
                let (rows, label) = files.page_view();
                render::file_page(rows, &label);
            }

            "upload" if !rest.is_empty() => {
                let paths: Vec<&str> = rest.split_whitespace().collect();
                let batch = {
                    let _busy = shell.busy_guard();
                    shell.studio.upload_files(&paths).await
                };
                if !batch.is_complete() {
                    render::alert(&batch.alert_text());
                }
                if batch.completed > 0 && shell.reload().await {
                    sync_after_reload(&shell.snapshot, &mut drafts, &mut files);
                }
            }

            "try" if !rest.is_empty() => {
                let result = {
                    let _busy = shell.busy_guard();
                    shell.studio.try_completion(rest).await
                };
                if let Some(generation) = shell.report(result) {
                    println!("{}", "Last response:".bold());
                    println!("{}", generation.completion);
                    render::contexts(&generation.contexts);
                }
            }
            "chat" if !rest.is_empty() => {
                let outgoing = convo.with_user_turn(rest);
                let result = {
                    let _busy = shell.busy_guard();
                    shell.studio.try_chat(&outgoing).await
                };
                if let Some(generation) = shell.report(result) {
                    convo.push_turn(rest, &generation.completion);
                    render::conversation(convo.messages());
                    render::contexts(&generation.contexts);
                }
            }
            "new-chat" => {
                convo.clear();
                println!("chat cleared");
            }

            "eval" => {
                let result = {
                    let _busy = shell.busy_guard();
                    shell.studio.run_retrieval_evaluation().await
                };
                if let Some(results) = shell.report(result) {
                    render::eval_table(&results);
                }
            }
            "logs" => {
                let num_lines = rest.parse::<u64>().unwrap_or(cfg.log_lines);
                let result = {
                    let _busy = shell.busy_guard();
                    shell.studio.fetch_logs(num_lines).await
                };
                if let Some(logs) = shell.report(result) {
                    render::pane("Server logs");
                    print!("{}", logs.display());
                }
            }

            _ => println!("unrecognized command; `help` lists everything"),
        }
        prompt();
    }
    Ok(())
}

fn prompt() {
    print!("{} ", "builder>".bold());
    let _ = io::stdout().flush();
}

fn split_command(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (input, ""),
    }
}

fn edit_prompt(draft: &mut SettingsDraft, label: &str, text: &str) {
    draft.set_draft(text);
    println!(
        "{label} draft updated (can submit: {}, can reset: {})",
        draft.can_submit(),
        draft.can_reset_to_default()
    );
}

fn show_prompts(drafts: &BuilderDrafts) {
    render::pane("Query prompts");
    print_draft("Question answering", &drafts.text_qa);
    print_draft("Use more context to refine", &drafts.refine);
    render::pane("Chat prompts");
    print_draft("Complete next chat", &drafts.context);
    print_draft("Build a question based on history & context", &drafts.condense);
}

fn print_draft(label: &str, draft: &SettingsDraft) {
    println!("  {}", label.bold());
    println!("  {}", draft.draft());
    println!(
        "  {}",
        format!(
            "can submit: {} | can reset to default: {}",
            draft.can_submit(),
            draft.can_reset_to_default()
        )
        .dimmed()
    );
}

fn sync_after_reload(snapshot: &AppSnapshot, drafts: &mut BuilderDrafts, files: &mut FileTable) {
    drafts.reconcile(snapshot);
    files.replace(snapshot.files.clone());
}

fn print_help() {
    render::pane("Commands");
    for (cmd, what) in [
        ("show", "render the configuration panels"),
        ("name <new name>", "rename the application"),
        ("model <name>", "change the generation model"),
        ("embed <name>", "change the embedding model"),
        ("qa|refine|ctx|condense <text>", "edit a prompt draft"),
        ("prompts", "show prompt drafts and their flags"),
        ("submit-query / submit-chat", "persist edited prompt drafts"),
        ("reset-query / reset-chat", "reset prompt drafts to defaults"),
        ("files / next / prev / page <n>", "browse the file table"),
        ("upload <path> [path...]", "upload knowledge-base files"),
        ("try <prompt>", "try a single query"),
        ("chat <message>", "try the next chat turn"),
        ("new-chat", "clear the try-out chat"),
        ("eval", "run retrieval auto-evaluation"),
        ("logs [n]", "tail the server log"),
        ("quit", "leave the console"),
    ] {
        println!("  {:<34} {}", cmd.bold(), what);
    }
}
