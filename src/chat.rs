//! Chat screen state
//!
//! Sending messages is not wired to anything yet; the inbox and the sample
//! conversation come from the mock data.

use crate::data::{ChatData, ChatMessage, ChatThread};
use crate::toast::Toast;

/// Action buttons on an open conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    VoiceCall,
    VideoCall,
    MoreOptions,
}

impl ChatAction {
    pub fn label(&self) -> &'static str {
        match self {
            ChatAction::VoiceCall => "Voice call",
            ChatAction::VideoCall => "Video call",
            ChatAction::MoreOptions => "More options",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    data: ChatData,
    /// Highlighted row in the thread list
    pub cursor: usize,
    selected: Option<usize>,
    /// Text typed into the message box
    pub draft: String,
}

impl ChatSession {
    pub fn new(data: ChatData) -> Self {
        Self {
            data,
            cursor: 0,
            selected: None,
            draft: String::new(),
        }
    }

    pub fn threads(&self) -> &[ChatThread] {
        &self.data.threads
    }

    /// Conversation currently open, if any
    pub fn selected_thread(&self) -> Option<&ChatThread> {
        self.selected.and_then(|i| self.data.threads.get(i))
    }

    /// Messages of the open conversation; empty when none is open
    pub fn messages(&self) -> &[ChatMessage] {
        if self.selected.is_some() {
            &self.data.transcript
        } else {
            &[]
        }
    }

    pub fn move_up(&mut self) {
        let count = self.data.threads.len();
        if count > 0 {
            self.cursor = if self.cursor == 0 { count - 1 } else { self.cursor - 1 };
        }
    }

    pub fn move_down(&mut self) {
        let count = self.data.threads.len();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    /// Opens the thread at `index`; out of range does nothing
    pub fn select(&mut self, index: usize) {
        if index < self.data.threads.len() {
            self.cursor = index;
            self.selected = Some(index);
        }
    }

    /// Opens the highlighted thread
    pub fn open_highlighted(&mut self) {
        self.select(self.cursor);
    }

    /// Closes the open conversation
    pub fn back(&mut self) {
        self.selected = None;
        self.draft.clear();
    }

    /// Sends the draft.
    ///
    /// Blank drafts are ignored and return `None`. Otherwise the draft is
    /// cleared and a notice is returned, since delivery is not implemented.
    pub fn send(&mut self) -> Option<Toast> {
        if self.draft.trim().is_empty() {
            return None;
        }
        self.draft.clear();
        Some(Toast::coming_soon("Sending messages"))
    }

    pub fn action(&self, action: ChatAction) -> Toast {
        Toast::coming_soon(action.label())
    }
}
