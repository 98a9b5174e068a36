//! App — the single event loop.
//!
//! Architecture:
//! - `App` owns the `ConsoleCore`, the control `Session`, the playback
//!   coordinator and every panel.
//! - A `tokio::mpsc` channel carries `AppMessage` events in from the terminal
//!   reader thread and the connection forwarder.
//! - Each message is handled to completion, then the frame is redrawn.
//! - Keys become `Intent`s, the core turns events into `Effect`s, and only
//!   `apply_effect` touches the outside world.

use std::io;
use std::time::Duration;

use chrono::Local;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    app_state::ViewState,
    component::Component,
    components::{
        header::Header, help_overlay::HelpOverlay, radiotext_panel::RadiotextPanel,
        station_panel::StationPanel, tuner_panel::TunerPanel, users_panel::UsersPanel,
    },
    connection::{ConnectionEvent, Session},
    core::{ConsoleCore, CoreEvent, Effect},
    intent::{intent_for_key, Intent, TuneIntent},
    playback::{AudioPlayer, PlaybackCoordinator},
    theme::C_BG,
    widgets::{
        frequency_prompt::{FrequencyPrompt, PromptAction},
        pane_chrome::pane_chrome,
        signal_meter::draw_signal_meter,
        status_bar::draw_status_bar,
        toast::{Severity, ToastManager},
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Connection(ConnectionEvent),
}

const MESSAGE_QUEUE: usize = 1024;
const INPUT_POLL: Duration = Duration::from_millis(200);

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App<P: AudioPlayer> {
    /// Control address as the operator gave it.
    address: String,
    core: ConsoleCore,
    session: Session,
    playback: PlaybackCoordinator<P>,
    autoplay: bool,

    header: Header,
    tuner_panel: TunerPanel,
    station_panel: StationPanel,
    radiotext_panel: RadiotextPanel,
    users_panel: UsersPanel,
    help_overlay: HelpOverlay,
    prompt: FrequencyPrompt,
    toast: ToastManager,

    should_quit: bool,
}

impl<P: AudioPlayer> App<P> {
    pub fn new(address: String, session: Session, player: P, autoplay: bool) -> Self {
        Self {
            address,
            core: ConsoleCore::new(),
            session,
            playback: PlaybackCoordinator::new(player),
            autoplay,
            header: Header::new(),
            tuner_panel: TunerPanel::new(),
            station_panel: StationPanel::new(),
            radiotext_panel: RadiotextPanel::new(),
            users_panel: UsersPanel::new(),
            help_overlay: HelpOverlay::new(),
            prompt: FrequencyPrompt::new(),
            toast: ToastManager::new(),
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self, conn_rx: mpsc::Receiver<ConnectionEvent>) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());
        info!("console running against {}", self.session.url());

        let result = self.event_loop(&mut terminal, conn_rx).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        self.playback.stop();
        self.session.close();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("console stopped");

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        mut conn_rx: mpsc::Receiver<ConnectionEvent>,
    ) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<AppMessage>(MESSAGE_QUEUE);

        // ── Background task: keyboard events ──────────────────────────────────
        // Polls so the thread notices the loop is gone and the runtime can exit.
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            if event_tx.is_closed() {
                break;
            }
            match event::poll(INPUT_POLL) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        });

        // ── Background task: connection events (Session → AppMessage) ────────
        let conn_tx = tx.clone();
        tokio::spawn(async move {
            while let Some(ev) = conn_rx.recv().await {
                if conn_tx.send(AppMessage::Connection(ev)).await.is_err() {
                    break;
                }
            }
        });
        drop(tx);

        if self.autoplay {
            self.dispatch(CoreEvent::Intent(Intent::TogglePlayback));
        }

        // ── Periodic timers ───────────────────────────────────────────────────
        let mut clock_tick = tokio::time::interval(Duration::from_secs(1));
        clock_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Toast expiry check
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                msg = rx.recv() => match msg {
                    Some(msg) => {
                        self.handle_message(msg);
                        needs_redraw = true;
                    }
                    None => break,
                },

                _ = clock_tick.tick() => {
                    self.dispatch(CoreEvent::Tick);
                    needs_redraw = true;
                }

                _ = toast_tick.tick() => {
                    if !self.toast.is_empty() {
                        self.toast.tick();
                        needs_redraw = true;
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(Event::Key(key)) => self.handle_key(key),
            AppMessage::Event(_) => {}
            AppMessage::Connection(ev) => self.on_connection_event(ev),
        }
    }

    fn on_connection_event(&mut self, ev: ConnectionEvent) {
        self.session.apply(&ev);
        let event = match ev {
            ConnectionEvent::Opened => CoreEvent::ConnectionOpened,
            ConnectionEvent::Frame(text) => CoreEvent::FrameReceived(text),
            ConnectionEvent::Closed { reason } => CoreEvent::ConnectionClosed { reason },
        };
        self.dispatch(event);
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        // Ctrl+C quits from anywhere, including the prompt
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.dispatch(CoreEvent::Intent(Intent::Quit));
            return;
        }

        // The prompt captures all keys while open
        if self.prompt.is_active() {
            if let PromptAction::Submitted(text) = self.prompt.handle_key(key) {
                self.dispatch(CoreEvent::Intent(Intent::Tune(TuneIntent::SetAbsolute(
                    text,
                ))));
            }
            return;
        }

        // Esc closes the help overlay before it means quit
        if self.help_overlay.visible && key.code == KeyCode::Esc {
            self.help_overlay.hide();
            return;
        }

        if let Some(intent) = intent_for_key(key) {
            self.dispatch(CoreEvent::Intent(intent));
        }
    }

    // ── Effects ───────────────────────────────────────────────────────────────

    fn dispatch(&mut self, event: CoreEvent) {
        for effect in self.core.handle(event) {
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Send(cmd) => match self.session.send(&cmd.encode()) {
                Ok(()) => debug!("sent {}", cmd),
                Err(e) => {
                    warn!("{} not sent: {}", cmd, e);
                    self.toast.warning(format!("{} not sent: {}", cmd, e));
                }
            },
            Effect::Notice(severity, message) => self.toast.push(message, severity),
            Effect::TogglePlayback => {
                let (state, outcome) = self.playback.toggle();
                match outcome {
                    Ok(()) => self.toast.push(format!("audio {}", state), Severity::Info),
                    Err(e) => self.toast.error(e.to_string()),
                }
            }
            Effect::ToggleHelp => self.help_overlay.toggle(),
            Effect::OpenPrompt => {
                self.help_overlay.hide();
                self.prompt.activate();
            }
            Effect::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let state = ViewState {
            snapshot: self.core.snapshot(),
            connection: self.session.state(),
            playback: self.playback.state(),
            address: &self.address,
            now: Local::now(),
        };

        let prompt_h = if self.prompt.is_active() { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.header.min_height()),
                Constraint::Length(self.tuner_panel.min_height()),
                Constraint::Length(self.radiotext_panel.min_height()),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(prompt_h),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.draw(frame, outer[0], &state);

        let top = halves(outer[1]);
        self.tuner_panel.draw(frame, top[0], &state);
        self.station_panel.draw(frame, top[1], &state);

        self.radiotext_panel.draw(frame, outer[2], &state);

        let meter_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(outer[3]);
        let signal_block = pane_chrome("Signal", None);
        let meter_area = signal_block.inner(meter_row[0]);
        frame.render_widget(signal_block, meter_row[0]);
        draw_signal_meter(frame, meter_area, state.snapshot.and_then(|s| s.signal));
        self.users_panel.draw(frame, meter_row[1], &state);

        if self.prompt.is_active() {
            self.prompt.draw(frame, outer[5]);
        }
        draw_status_bar(
            frame,
            outer[6],
            state.connection,
            state.playback,
            state.address,
        );

        // ── Help overlay (on top of everything) ──────────────────────────────
        self.help_overlay.draw(frame, area, &state);

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }
}

fn halves(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}
