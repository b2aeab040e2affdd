// Terminal debate loop

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::config::{Difficulty, GameMode};
use crate::debate::{DebateService, SessionId};
use crate::errors::DebateError;

use super::commands::{format_help, format_result, format_scores, format_turn, Command};

pub struct Repl<'a> {
    service: &'a DebateService,
    editor: DefaultEditor,
}

impl<'a> Repl<'a> {
    pub fn new(service: &'a DebateService) -> Result<Self> {
        Ok(Self {
            service,
            editor: DefaultEditor::new()?,
        })
    }

    /// Play one debate to completion. Returns once the session is ended or
    /// abandoned.
    pub async fn run(&mut self, mode: GameMode, difficulty: Difficulty) -> Result<()> {
        let start = self.service.start_session(mode, difficulty)?;
        let id = start.session_id;

        println!("Mode: {}  Difficulty: {}", start.mode, start.difficulty);
        println!("Opponent: {}", start.config.personality_tag);
        println!("Topic: {}", start.topic);
        println!();
        println!("Make your opening argument. Type /help for commands.");

        loop {
            let line = match self.editor.readline("> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    self.abandon(id);
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            let _ = self.editor.add_history_entry(input);

            match Command::parse(input) {
                Some(Command::Help) => println!("{}", format_help()),
                Some(Command::Scores) => {
                    let scores = self.service.current_scores(id).await?;
                    println!("{}", format_scores(&scores));
                }
                Some(Command::End) => {
                    let result = self.service.end_session(id).await?;
                    println!("{}", format_result(&result));
                    return Ok(());
                }
                Some(Command::Quit) => {
                    self.abandon(id);
                    return Ok(());
                }
                None => match self.service.submit_turn(id, input).await {
                    Ok(outcome) => println!("{}", format_turn(&outcome)),
                    Err(DebateError::Provider(e)) => {
                        eprintln!("Opponent unavailable: {}", e);
                        eprintln!("Nothing was recorded. Send the argument again to retry.");
                    }
                    Err(e) => return Err(e.into()),
                },
            }
        }
    }

    fn abandon(&self, id: SessionId) {
        if self.service.registry().remove(id).is_ok() {
            tracing::info!(session_id = %id, "Session abandoned");
        }
        println!("Left without recording a result.");
    }
}
