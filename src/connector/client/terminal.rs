use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;

use crate::application::{ChatBackend, ChatSession, ViewState};
use crate::domain::{Message, PendingQuestion, Role};

/// Interactive terminal front end for a [`ChatSession`].
///
/// Renders the transcript incrementally and switches between the free-text
/// prompt and the clarification form exactly as the session state dictates.
pub struct TerminalChat {
    session: ChatSession,
    printed: usize,
}

impl TerminalChat {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            session: ChatSession::new(backend),
            printed: 0,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        println!("clarichat — type a message, or /quit to exit.\n");

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            match self.session.state().clone() {
                ViewState::Idle => {
                    print!("you> ");
                    io::stdout().flush()?;
                    let Some(line) = lines.next().transpose()? else {
                        break;
                    };
                    let line = line.trim().to_string();
                    if line == "/quit" || line == "/exit" {
                        break;
                    }
                    self.session.submit_message(&line).await;
                    self.render_progress();
                }
                ViewState::AwaitingClarification => {
                    println!("A few details are needed before answering:\n");
                    let ids: Vec<(u32, String, Option<String>)> = self
                        .session
                        .pending_questions()
                        .iter()
                        .map(|q| (q.id, q.question.clone(), q.category.clone()))
                        .collect();
                    for (id, question, category) in ids {
                        match category {
                            Some(category) => print!("  {question} [{category}]> "),
                            None => print!("  {question}> "),
                        }
                        io::stdout().flush()?;
                        let Some(line) = lines.next().transpose()? else {
                            return Ok(());
                        };
                        self.session.set_answer(id, line.trim());
                    }
                    self.session.submit_clarifications().await;
                    self.render_progress();
                }
                ViewState::Error(message) => {
                    println!("\n  ! {message}\n");
                    self.session.dismiss_error();
                }
                // Requests are awaited inline, so the loop never observes an
                // in-flight state.
                ViewState::AwaitingAnswer => unreachable!("no request is in flight here"),
            }
        }

        Ok(())
    }

    /// Print transcript entries added since the last render, plus the answers
    /// recap after a completed clarification round.
    fn render_progress(&mut self) {
        if self.session.state() == &ViewState::Idle && !self.session.answered_questions().is_empty()
        {
            render_answered(self.session.answered_questions());
        }

        let conversation = self.session.conversation();
        for message in &conversation[self.printed.min(conversation.len())..] {
            render_message(message);
        }
        self.printed = conversation.len();
    }
}

fn render_message(message: &Message) {
    match message.role {
        Role::Assistant => {
            println!("\nassistant:");
            for line in message.content.lines() {
                println!("  {line}");
            }
            println!();
        }
        // User input was just typed; echoing it back would duplicate it.
        Role::User | Role::System => {}
    }
}

fn render_answered(questions: &[PendingQuestion]) {
    println!("\nYour answers:");
    for q in questions {
        println!("  {} — {}", q.question, q.answer);
    }
}
