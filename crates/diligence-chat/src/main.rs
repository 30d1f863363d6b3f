//! A terminal front-end: asks diligence questions about the company in an
//! analysis record.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::time::Duration;

use diligence_chat::SessionBuilder;
use diligence_chat::core::{AnalysisRecord, Role};
use diligence_chat::render::render_blocks;
use diligence_chat_http_service::{
    HttpInterviewService, HttpServiceConfigBuilder,
};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Some(record_path) = env::args().nth(1) else {
        eprintln!("usage: diligence-chat <analysis-record.json>");
        return;
    };
    let Ok(base_url) = env::var("INTERVIEW_BASE_URL") else {
        eprintln!("INTERVIEW_BASE_URL environment variable is not set");
        return;
    };

    let record = match load_record(&record_path).await {
        Ok(record) => record,
        Err(err) => {
            eprintln!("cannot load {record_path}: {err}");
            return;
        }
    };

    let mut config = HttpServiceConfigBuilder::with_base_url(base_url);
    if let Ok(api_key) = env::var("INTERVIEW_API_KEY") {
        config = config.with_api_key(api_key);
    }
    if let Ok(path) = env::var("INTERVIEW_PATH") {
        config = config.with_path(path);
    }
    let service = HttpInterviewService::new(config.build());

    let (idle_tx, mut idle_rx) = mpsc::unbounded_channel();
    let session = SessionBuilder::with_interview_service(service)
        .on_idle(move || {
            idle_tx.send(()).ok();
        })
        .build(record);

    let identity = session.identity();
    println!("{}", identity.headline().bright_white().bold());
    println!("{}", identity.combined_label.dimmed());
    println!(
        "{} {}\n",
        "Request an intro call:".dimmed(),
        session.intro_mail().web_link.underline()
    );

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    let mut printed = 0;
    loop {
        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(progress_style.clone());
        progress_bar.set_message("🤔 Waiting for the interviewer...");
        loop {
            progress_bar.inc(1);
            select! {
                idle = idle_rx.recv() => {
                    if idle.is_none() {
                        return;
                    }
                    break;
                }
                _ = sleep(Duration::from_millis(100)) => {}
            }
        }
        // Finish the progress bar before printing anything else.
        progress_bar.finish_and_clear();

        let Some(state) = session.snapshot().await else {
            break;
        };
        for message in &state.history()[printed..] {
            if message.role == Role::Model {
                let blocks = session.format_reply(&message.content);
                let text =
                    render_blocks(&blocks, |s| s.bold().to_string());
                for line in text.lines() {
                    println!("{}{}", BAR_CHAR.bright_cyan(), line);
                }
                println!();
            }
        }
        printed = state.history().len();

        let line = loop {
            print!("> ");
            std::io::stdout().flush().ok();
            let Some(line) = read_line().await else {
                return;
            };
            if !line.trim().is_empty() {
                break line;
            }
        };
        session.send_message(line.trim());
        // The user message is already in the history.
        printed += 1;
    }
}

async fn load_record(path: &str) -> Result<AnalysisRecord, String> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| err.to_string())?;
    AnalysisRecord::from_json_str(&text).map_err(|err| err.to_string())
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
