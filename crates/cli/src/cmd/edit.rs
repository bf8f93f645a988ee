//! Interactive demonstration workspace
//!
//! Reads lines from stdin as content edits and renders the autosave
//! lifecycle: the Saving.../Saved indicator and the throttled save
//! confirmations. Documents are never written back to disk; saves are
//! simulated end to end.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use editor::{Document, EditorSession, SaveSignal, SaveSignals, SaveStatus};
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

pub async fn run(file: Option<PathBuf>, title: Option<String>) -> Result<()> {
    let config = crate::system_config::load()?;
    let policy = config.policy();

    let document = match &file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let title = title.unwrap_or_else(|| title_from_path(path));
            Document::with_content(title, content)
        }
        None => Document::new(title.unwrap_or_else(|| "Untitled Document".to_string())),
    };

    println!("{}", document.title().bold());
    if !document.is_empty() {
        println!(
            "{}",
            format!("Seeded {} words from file.", document.word_count()).dimmed()
        );
    }
    println!(
        "{}",
        "Each line is appended as a paragraph. ':save' saves now, ':wc' counts words, Ctrl-D ends."
            .dimmed()
    );

    let (mut session, signals) = EditorSession::open(document, policy);
    let renderer = tokio::spawn(render_signals(signals));

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read from stdin")? {
                    Some(line) => handle_line(&mut session, &line),
                    None => break, // Ctrl-D
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!(
        "Closing editor session ({} words)",
        session.document().word_count()
    );
    session.close();
    renderer.abort();

    println!("{}", "Session closed.".dimmed());
    Ok(())
}

fn handle_line(session: &mut EditorSession, line: &str) {
    match line.trim() {
        ":save" => session.save_now(),
        ":wc" => println!(
            "{}",
            format!("{} words", session.document().word_count()).dimmed()
        ),
        "" => {}
        text => session.append_paragraph(text),
    }
}

/// Render status transitions and confirmations until the session closes.
async fn render_signals(mut signals: SaveSignals) {
    loop {
        tokio::select! {
            changed = signals.status.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = *signals.status.borrow_and_update();
                match status {
                    SaveStatus::Saving => println!("{}", "Saving...".yellow()),
                    SaveStatus::Idle => println!(
                        "{}",
                        format!("Saved {}", Local::now().format("%H:%M:%S")).dimmed()
                    ),
                }
            }
            event = signals.events.recv() => {
                match event {
                    Some(SaveSignal::AutoSaved) => {
                        println!("{}", "Document saved automatically".green());
                    }
                    Some(SaveSignal::ManualSaved) => {
                        println!("{}", "Document saved".green());
                    }
                    None => break,
                }
            }
        }
    }
}

fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("Untitled Document")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_path() {
        assert_eq!(title_from_path(Path::new("drafts/methods.md")), "methods");
        assert_eq!(title_from_path(Path::new("paper.txt")), "paper");
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_line_routes_commands() {
        let (mut session, mut signals) =
            EditorSession::open(Document::new("Paper"), editor::SavePolicy::default());

        handle_line(&mut session, "A paragraph of prose.");
        assert_eq!(session.document().word_count(), 4);

        handle_line(&mut session, ":save");
        assert_eq!(signals.events.try_recv(), Ok(SaveSignal::ManualSaved));

        // Blank lines are not edits
        handle_line(&mut session, "   ");
        assert_eq!(session.document().content(), "A paragraph of prose.");
    }
}
