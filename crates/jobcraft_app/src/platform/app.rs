use std::io::{self, BufRead};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use jobcraft_core::{update, AppState, AppViewModel, Msg};
use jobcraft_engine::{AtomicFileWriter, EngineHandle, Osc52Clipboard, ReqwestGenerationService};
use jobcraft_logging::{jobcraft_debug, jobcraft_info};

use super::commands::{self, Command, HELP};
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::{logging, render};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    logging::initialize(config.log_destination, config.log_level);
    jobcraft_info!(
        "jobcraft starting: service={} output_dir={:?}",
        config.service.base_url,
        config.output_dir
    );

    let service = ReqwestGenerationService::new(config.service.clone())
        .context("could not build http client")?;
    let engine = EngineHandle::new(Arc::new(service)).context("could not start engine runtime")?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(
        engine,
        Box::new(Osc52Clipboard::stdout()),
        AtomicFileWriter::new(config.output_dir.clone()),
        msg_tx,
    );

    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut app = App::new(runner, msg_rx);
    println!("JobCraft: tailor your CV and write cover letters. Type `help` for commands.");
    app.print_view(true);

    let mut stdin_open = true;
    loop {
        if stdin_open {
            match line_rx.recv_timeout(POLL_INTERVAL) {
                Ok(line) => {
                    if !app.handle_line(&line) {
                        break;
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => stdin_open = false,
            }
        } else {
            // Input ended (piped script): wait for an outstanding request to settle.
            if !app.state.submission().is_pending() {
                break;
            }
            thread::sleep(POLL_INTERVAL);
        }
        app.process_pending_messages();
    }

    app.runner.shutdown();
    jobcraft_info!("jobcraft exiting");
    Ok(())
}

struct App {
    state: AppState,
    last_view: Option<AppViewModel>,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
}

impl App {
    fn new(runner: EffectRunner, msg_rx: mpsc::Receiver<Msg>) -> Self {
        Self {
            state: AppState::new(),
            last_view: None,
            runner,
            msg_rx,
        }
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        let command = match commands::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return true,
            Err(err) => {
                println!("{err}");
                return true;
            }
        };
        match command {
            Command::Quit => return false,
            Command::Help => println!("{HELP}"),
            Command::Show => self.print_view(true),
            command => match commands::into_msg(command) {
                Ok(Some(msg)) => self.dispatch_msg(msg),
                Ok(None) => {}
                Err(err) => println!("{err}"),
            },
        }
        true
    }

    fn process_pending_messages(&mut self) {
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        for msg in inbox {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        jobcraft_debug!("msg {}", msg_name(&msg));
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        for notice in self.runner.run(effects) {
            println!("{notice}");
        }
        if self.state.consume_dirty() {
            self.print_view(false);
        }
    }

    fn print_view(&mut self, full: bool) {
        let view = self.state.view();
        let previous = if full { None } else { self.last_view.as_ref() };
        for line in render::render(&view, previous) {
            println!("{line}");
        }
        self.last_view = Some(view);
    }
}

/// Message name without payloads, which may hold whole documents.
fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::ResumeSelected(_) => "ResumeSelected",
        Msg::JobDescriptionChanged(_) => "JobDescriptionChanged",
        Msg::DispatchClicked(_) => "DispatchClicked",
        Msg::GenerationFinished { .. } => "GenerationFinished",
        Msg::CopyClicked => "CopyClicked",
        Msg::CopyFinished { .. } => "CopyFinished",
        Msg::CopiedExpired { .. } => "CopiedExpired",
        Msg::ExportClicked(_) => "ExportClicked",
        Msg::ResetClicked => "ResetClicked",
    }
}
