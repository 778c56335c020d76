// /app.rs
use crate::{
    character::CharacterId,
    context::Context,
    credential::CredentialStore,
    error::{LedgerError, Result},
    message::Message,
    repository::RepositoryClient,
    session::{self, Mutation, PendingWrite, Saved, Session},
    tui::{Tui, TuiEvent},
    ui::{Admin, Component, ComponentEnum, Dashboard, TokenInput},
};

use crossterm::event::KeyEvent;
use tokio::sync::mpsc;

pub enum Action {
    Quit,
    SwitchView,
    OpenTokenInput,
    Reload,
    Mutate(Mutation),
    SubmitCredential(String),
    RefuseCredential,
    ResetCredential,
}

// Only the latest notifications are kept; the console shows the last one.
const MAX_MESSAGES: usize = 50;

// Results of background network work, sent back to the event loop. `request`
// orders them by when they were issued.
#[derive(Debug)]
pub enum TaskOutcome {
    Loaded {
        request: u64,
        result: Result<Session>,
    },
    Committed {
        request: u64,
        result: Result<Saved>,
    },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum View {
    #[default]
    Dashboard,
    Admin,
}

impl View {
    pub fn toggled(self) -> Self {
        match self {
            View::Dashboard => View::Admin,
            View::Admin => View::Dashboard,
        }
    }

    pub fn component(self) -> ComponentEnum {
        match self {
            View::Dashboard => ComponentEnum::from(Dashboard::new()),
            View::Admin => ComponentEnum::from(Admin::new()),
        }
    }
}

pub struct App {
    // Application state and control flow
    running: bool,
    component: ComponentEnum,
    view: View,

    // --- Global information
    credentials: CredentialStore,
    client: Option<RepositoryClient>,

    // --- Roster state
    session: Option<Session>,
    messages: Vec<Message>,
    in_flight: usize,
    requests: u64, // Last request number handed out.
    applied: u64,  // Request whose roster is currently shown.

    task_sender: mpsc::UnboundedSender<TaskOutcome>,
    task_receiver: mpsc::UnboundedReceiver<TaskOutcome>,
}

impl App {
    pub fn new(credentials: CredentialStore, view: View) -> Self {
        let (task_sender, task_receiver) = mpsc::unbounded_channel();
        let client = credentials.token().and_then(|token| {
            RepositoryClient::new(credentials.settings().repository.clone(), token)
                .inspect_err(|e| log::error!("Failed to build the repository client: {e}"))
                .ok()
        });
        let component = if client.is_some() {
            view.component()
        } else {
            ComponentEnum::from(TokenInput::new(false))
        };

        Self {
            running: true,
            component,
            view,
            credentials,
            client,
            session: None,
            messages: Vec::new(),
            in_flight: 0,
            requests: 0,
            applied: 0,
            task_sender,
            task_receiver,
        }
    }

    // Asynchronous function to continuously run and update the application.
    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(4.0) // 4 ticks per second
            .frame_rate(30.0); // 30 frames per second

        tui.enter()?; // Starts event handler, enters raw mode, enters alternate screen

        if self.client.is_some() {
            self.reload();
        }

        while self.running {
            tui.draw(|frame| {
                let context = Context {
                    session: self.session.as_ref(),
                    settings: self.credentials.settings(),
                    messages: &self.messages,
                    in_flight: self.in_flight,
                };
                self.component
                    .render(frame.area(), frame.buffer_mut(), &context)
            })?;

            tokio::select! {
                Some(event) = tui.next() => self.handle_tui_event(event),
                Some(outcome) = self.task_receiver.recv() => self.handle_outcome(outcome),
                else => self.running = false,
            }
        }

        tui.exit()?; // stops event handler, exits raw mode, exits alternate screen
        Ok(())
    }

    fn handle_tui_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key_event) => self.on_key(key_event),
            TuiEvent::Error => log::warn!("Terminal event stream reported an error"),
            TuiEvent::Init | TuiEvent::Tick | TuiEvent::Render | TuiEvent::Resize(_, _) => {}
        }
    }

    pub fn on_key(&mut self, key_event: KeyEvent) {
        let context = Context {
            session: self.session.as_ref(),
            settings: self.credentials.settings(),
            messages: &self.messages,
            in_flight: self.in_flight,
        };
        if let Some(action) = self.component.on_key(key_event, &context) {
            self.handle_action(action);
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SwitchView => {
                self.view = self.view.toggled();
                self.component = self.view.component();
            }
            Action::OpenTokenInput => {
                self.component =
                    ComponentEnum::from(TokenInput::new(self.credentials.token().is_some()));
            }
            Action::Reload => self.reload(),
            Action::Mutate(mutation) => self.mutate(mutation),
            Action::SubmitCredential(token) => self.submit_credential(&token),
            Action::RefuseCredential => self.refuse_credential(),
            Action::ResetCredential => self.reset_credential(),
        }
    }

    pub fn handle_outcome(&mut self, outcome: TaskOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            TaskOutcome::Loaded {
                request,
                result: Ok(session),
            } => {
                if self.is_current(request) {
                    self.add_message(Message::info(format!(
                        "The chronicles hold {} adventurers.",
                        session.roster().len()
                    )));
                    self.session = Some(session);
                }
            }
            TaskOutcome::Loaded {
                request,
                result: Err(e),
            } => self.load_failed(request, e),
            TaskOutcome::Committed {
                request,
                result: Ok(saved),
            } => {
                self.add_message(Message::success("Saved to Chronicles!"));
                match saved.reload {
                    Ok(session) => {
                        if self.is_current(request) {
                            self.session = Some(session);
                        }
                    }
                    Err(e) => self.load_failed(request, e),
                }
            }
            TaskOutcome::Committed { result: Err(e), .. } => {
                log::error!("Save failed: {e}");
                let hint = if e.is_stale_version() {
                    " Press r to reload the latest roster."
                } else {
                    ""
                };
                self.add_message(Message::error(format!("Save failed: {e}.{hint}")));
            }
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        if self.messages.len() > MAX_MESSAGES {
            let excess = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..excess);
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn component(&self) -> &ComponentEnum {
        &self.component
    }

    fn next_request(&mut self) -> u64 {
        self.requests += 1;
        self.requests
    }

    // A roster from a request older than the one on screen would undo a newer write.
    fn is_current(&mut self, request: u64) -> bool {
        if request < self.applied {
            log::debug!("Dropping roster of request {request}, {} is newer", self.applied);
            return false;
        }
        self.applied = request;
        true
    }

    fn load_failed(&mut self, request: u64, e: LedgerError) {
        log::error!("Failed to load players: {e}");
        if !self.is_current(request) {
            return;
        }
        self.session = None;
        self.add_message(Message::error(format!(
            "Failed to load data. Check your Token and Repo settings. ({e})"
        )));
    }

    fn reload(&mut self) {
        let Some(client) = self.client.clone() else {
            self.add_message(Message::error(LedgerError::MissingCredential.to_string()));
            return;
        };
        self.in_flight += 1;
        let request = self.next_request();
        let sender = self.task_sender.clone();
        tokio::spawn(async move {
            let result = session::load(&client).await;
            let _ = sender.send(TaskOutcome::Loaded { request, result });
        });
    }

    fn mutate(&mut self, mutation: Mutation) {
        let Some(session) = &self.session else {
            self.add_message(Message::error("Nothing to change: no roster is loaded."));
            return;
        };
        // Malformed input is dropped without a notification.
        let Some(pending) = session.prepare(&mutation, now_ms()) else {
            return;
        };
        self.commit(pending);
    }

    fn commit(&mut self, pending: PendingWrite) {
        let Some(client) = self.client.clone() else {
            self.add_message(Message::error(LedgerError::MissingCredential.to_string()));
            return;
        };
        self.in_flight += 1;
        let request = self.next_request();
        let sender = self.task_sender.clone();
        tokio::spawn(async move {
            let result = session::commit(&client, pending).await;
            let _ = sender.send(TaskOutcome::Committed { request, result });
        });
    }

    fn submit_credential(&mut self, token: &str) {
        if token.trim().is_empty() {
            self.refuse_credential();
            return;
        }
        let client = self.credentials.supply(token).and_then(|token| {
            RepositoryClient::new(self.credentials.settings().repository.clone(), token)
        });
        match client {
            Ok(client) => {
                self.client = Some(client);
                self.component = self.view.component();
                self.reload();
            }
            Err(e) => {
                log::error!("Failed to store the token: {e}");
                self.add_message(Message::error(format!("Failed to store the token: {e}")));
            }
        }
    }

    fn refuse_credential(&mut self) {
        self.component = self.view.component();
        // Closing the prompt while a usable token is stored keeps access.
        if self.client.is_some() {
            return;
        }
        log::info!("Token prompt refused");
        self.add_message(Message::error(LedgerError::MissingCredential.to_string()));
    }

    fn reset_credential(&mut self) {
        self.client = None;
        match self.credentials.reset() {
            Ok(()) => self.add_message(Message::info("Your token has been reset.")),
            Err(e) => self.add_message(Message::error(format!(
                "The token reset could not be saved. Please delete {} manually. ({e})",
                self.credentials.path().display()
            ))),
        }
    }
}

fn now_ms() -> CharacterId {
    chrono::Utc::now().timestamp_millis()
}
