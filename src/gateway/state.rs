use std::path::PathBuf;
use std::sync::Arc;

use crate::embedding::TextEncoder;
use crate::policy::FaqAgent;
use crate::session::InteractionLogger;

pub struct HandlerState<E: TextEncoder + 'static> {
    pub agent: Arc<FaqAgent<E>>,

    pub session_log: Arc<dyn InteractionLogger>,

    /// HTML served at `/chat`.
    pub chat_page_path: Option<PathBuf>,
}

impl<E: TextEncoder + 'static> Clone for HandlerState<E> {
    fn clone(&self) -> Self {
        Self {
            agent: Arc::clone(&self.agent),
            session_log: Arc::clone(&self.session_log),
            chat_page_path: self.chat_page_path.clone(),
        }
    }
}

impl<E: TextEncoder + 'static> HandlerState<E> {
    pub fn new(agent: Arc<FaqAgent<E>>, session_log: Arc<dyn InteractionLogger>) -> Self {
        Self {
            agent,
            session_log,
            chat_page_path: None,
        }
    }

    pub fn with_chat_page(mut self, path: impl Into<PathBuf>) -> Self {
        self.chat_page_path = Some(path.into());
        self
    }
}
