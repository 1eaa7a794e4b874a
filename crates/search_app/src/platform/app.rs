use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use chrono::Local;
use search_core::{update, AppState, Msg, Phase};
use search_logging::{search_debug, search_info};

use super::effects::EffectRunner;
use super::ui;
use crate::cli::Args;
use crate::config::AppConfig;

/// Everything the main loop reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopEvent {
    Msg(Msg),
    Help,
    Quit,
}

pub fn run(args: &Args, config: AppConfig) -> anyhow::Result<()> {
    let engine_config = config.engine_config()?;
    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();
    let runner =
        EffectRunner::new(engine_config, loop_tx.clone()).context("starting search engine")?;
    let mut app = App::new(runner, config.show_joke);
    let mut out = io::stdout().lock();

    match args.one_shot_location() {
        Some(location) => app.run_once(location, &loop_rx, &mut out)?,
        None => {
            spawn_stdin_reader(loop_tx);
            app.run_interactive(&loop_rx, &mut out)?;
        }
    }
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
    show_joke: bool,
}

impl App {
    fn new(runner: EffectRunner, show_joke: bool) -> Self {
        Self {
            state: AppState::new(),
            runner,
            show_joke,
        }
    }

    /// Applies one message, runs its effects and reports whether a redraw is due.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
        self.state.consume_dirty()
    }

    fn settled(&self) -> bool {
        self.state.phase() != Phase::Loading && !self.state.joke_pending()
    }

    /// Opens `location`, waits for the cycle to settle and prints the page once.
    fn run_once(
        &mut self,
        location: String,
        loop_rx: &mpsc::Receiver<LoopEvent>,
        out: &mut impl Write,
    ) -> io::Result<()> {
        if self.show_joke {
            self.dispatch(Msg::JokeRequested);
        }
        self.dispatch(Msg::LocationOpened(location));
        while !self.settled() {
            match loop_rx.recv() {
                Ok(LoopEvent::Msg(msg)) => {
                    self.dispatch(msg);
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
        self.draw(out)
    }

    fn run_interactive(
        &mut self,
        loop_rx: &mpsc::Receiver<LoopEvent>,
        out: &mut impl Write,
    ) -> io::Result<()> {
        if self.show_joke {
            self.dispatch(Msg::JokeRequested);
        }
        self.draw(out)?;
        while let Ok(event) = loop_rx.recv() {
            match event {
                LoopEvent::Msg(msg) => {
                    if self.dispatch(msg) {
                        self.draw(out)?;
                    }
                }
                LoopEvent::Help => write_help(out)?,
                LoopEvent::Quit => break,
            }
        }
        search_info!("Leaving interactive session");
        Ok(())
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let view = self.state.view();
        for line in ui::render::render(&view, Local::now().date_naive(), self.show_joke) {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

fn write_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "<text>            search for <text> (empty line clears)")?;
    writeln!(out, ":open <location>  open a page such as /results?q=maine+coon")?;
    writeln!(out, ":home             back to the home page")?;
    writeln!(out, ":joke             fetch a new joke")?;
    writeln!(out, ":quit             exit")?;
    out.flush()
}

fn spawn_stdin_reader(loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for event in parse_line(&line) {
                if loop_tx.send(event).is_err() {
                    return;
                }
            }
        }
        search_debug!("stdin closed");
        let _ = loop_tx.send(LoopEvent::Quit);
    });
}

/// Maps one line typed at the prompt to loop events.
fn parse_line(line: &str) -> Vec<LoopEvent> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return vec![
            LoopEvent::Msg(Msg::InputChanged(trimmed.to_string())),
            LoopEvent::Msg(Msg::QuerySubmitted),
        ];
    };
    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((command, ""));
    match name {
        "q" | "quit" | "exit" => vec![LoopEvent::Quit],
        "home" => vec![LoopEvent::Msg(Msg::HomeRequested)],
        "joke" => vec![LoopEvent::Msg(Msg::JokeRequested)],
        "open" if !rest.is_empty() => vec![LoopEvent::Msg(Msg::LocationOpened(rest.to_string()))],
        _ => vec![LoopEvent::Help],
    }
}
