use crate::{message::Message, session::Session, settings::Settings};

// Read-only view of the app state handed to components for each key press and frame.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub session: Option<&'a Session>,
    pub settings: &'a Settings,
    pub messages: &'a [Message],
    pub in_flight: usize, // Background fetches and writes not yet answered.
}
