mod handle_app_event;
mod handle_key_events;

use color_eyre::Result;
use ratatui::{crossterm::event::KeyEventKind, DefaultTerminal};
use throbber_widgets_tui::ThrobberState;
use tracing::info;

use crate::chat::store::{ChatEvent, ChatEventReceiver};
use crate::chat::ChatController;
use crate::config::AppConfig;
use crate::event::{app_event_for, spawn_status_poller, AppEvent, Event, EventHandler};

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Transcript, input line and backend.
    pub chat: ChatController,
    /// Store events, drained after every handled event.
    chat_events: ChatEventReceiver,
    /// Event handler.
    pub events: EventHandler,
    pub config: AppConfig,
    /// Lines scrolled up from the bottom of the transcript.
    pub scroll_offset: u16,
    /// Furthest `scroll_offset` the last drawn transcript allowed.
    pub max_scroll: u16,
    /// One-line notice shown under the input (export path, session changes...).
    pub notice: Option<String>,
    pub throbber_state: ThrobberState,
}

impl App {
    /// Constructs a new instance of [`App`].
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut chat = ChatController::from_config(&config)?;
        let chat_events = chat.store_mut().subscribe();
        let mut events = EventHandler::new();

        info!(
            backend = %chat.backend().describe(),
            session_id = %chat.store().session_id(),
            "starting chat"
        );

        if chat.backend().is_remote() {
            events.send(AppEvent::CheckConnection);
            spawn_status_poller(events.sender(), config.status_poll_interval());
        }

        Ok(Self {
            running: true,
            chat,
            chat_events,
            events,
            config,
            scroll_offset: 0,
            max_scroll: 0,
            notice: None,
            throbber_state: ThrobberState::default(),
        })
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
                needs_redraw = false;
            }

            match self.events.next().await? {
                Event::Tick => {
                    if self.chat.is_typing() {
                        self.throbber_state.calc_next();
                        needs_redraw = true;
                    }
                }
                Event::Crossterm(event) => match event {
                    crossterm::event::Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                        self.handle_key_events(key_event)?;
                        needs_redraw = true;
                    }
                    crossterm::event::Event::Resize(_, _) => needs_redraw = true,
                    other => {
                        if let Some(app_event) = app_event_for(&other) {
                            self.events.send(app_event);
                        }
                    }
                },
                Event::App(app_event) => {
                    self.handle_app_event(app_event);
                    needs_redraw = true;
                }
            }

            self.drain_chat_events();
        }
        Ok(())
    }

    fn drain_chat_events(&mut self) {
        while let Ok(event) = self.chat_events.try_recv() {
            match event {
                ChatEvent::ConnectionChanged { connected } => {
                    self.notice = Some(if connected {
                        "Connection restored".to_string()
                    } else {
                        "Backend unreachable, sending is disabled".to_string()
                    });
                }
                ChatEvent::SessionStarted { session_id } => {
                    self.notice = Some(format!("Started {}", session_id));
                }
                ChatEvent::MessageAdded { .. } | ChatEvent::MessagesCleared { .. } => {
                    self.scroll_offset = 0;
                }
            }
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
