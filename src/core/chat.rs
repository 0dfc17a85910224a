//! In-memory chat thread store.
//!
//! Threads are kept most-recent-first and at most one thread is active at a
//! time. Message logs are append-only; insertion order is what the timeline
//! renders, so it is never re-sorted.
//!
//! Operations that reference an unknown thread id are deliberate silent
//! no-ops rather than errors. Replies from the fan-out dispatcher arrive
//! after an arbitrary delay and the user may have deleted or switched
//! threads in the meantime; dropping the append is the intended outcome.

use chrono::{DateTime, Utc};

use crate::core::ModelId;

/// Maximum number of characters taken from the first message when deriving
/// a thread title.
const DERIVED_TITLE_MAX_CHARS: usize = 30;

/// Title given to threads created before any message is sent.
pub const DEFAULT_THREAD_TITLE: &str = "New Chat";

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Typed by the user.
    User,
    /// Produced by a model responder.
    Assistant,
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Store-allocated id, unique within the session.
    pub id: u64,
    /// The message text, verbatim.
    pub content: String,
    /// Who authored the message.
    pub role: Role,
    /// The producing model; present only on assistant messages.
    pub model: Option<ModelId>,
    /// When the message was appended.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a user message.
    #[must_use]
    pub fn user(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            role: Role::User,
            model: None,
            timestamp: Utc::now(),
        }
    }

    /// Creates an assistant message tagged with the producing model.
    #[must_use]
    pub fn assistant(id: u64, model: ModelId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            role: Role::Assistant,
            model: Some(model),
            timestamp: Utc::now(),
        }
    }
}

/// An ordered conversation of messages.
#[derive(Debug, Clone)]
pub struct Thread {
    /// Time-derived unique id.
    pub id: String,
    /// Display title, derived from the first message or a default.
    pub title: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Append-only message log.
    pub messages: Vec<Message>,
}

/// Derives a thread title from the first message of a conversation.
///
/// Takes the first [`DERIVED_TITLE_MAX_CHARS`] characters (on a char
/// boundary) and appends an ellipsis when the message was longer.
#[must_use]
pub fn derived_title(text: &str) -> String {
    let trimmed = text.trim();
    let mut title: String = trimmed.chars().take(DERIVED_TITLE_MAX_CHARS).collect();
    if trimmed.chars().count() > DERIVED_TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}

/// Holds every chat thread of the session plus the active-thread marker.
#[derive(Debug, Default)]
pub struct ChatStore {
    threads: Vec<Thread>,
    active: Option<String>,
    next_message_id: u64,
    last_thread_stamp: i64,
}

impl ChatStore {
    /// Creates an empty store with no active thread.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all threads, most-recent-first.
    #[must_use]
    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    /// Returns the id of the active thread, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Returns the active thread, if any.
    #[must_use]
    pub fn active_thread(&self) -> Option<&Thread> {
        let id = self.active.as_deref()?;
        self.thread(id)
    }

    /// Looks up a thread by id.
    #[must_use]
    pub fn thread(&self, id: &str) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id == id)
    }

    /// Creates a new empty thread with the default title.
    ///
    /// The new thread becomes active and sits at the head of the list.
    pub fn create_thread(&mut self) -> &Thread {
        self.create_thread_titled(DEFAULT_THREAD_TITLE)
    }

    /// Creates a new empty thread with an explicit title.
    ///
    /// The new thread becomes active and sits at the head of the list.
    pub fn create_thread_titled(&mut self, title: impl Into<String>) -> &Thread {
        let id = self.allocate_thread_id();
        let thread = Thread {
            id: id.clone(),
            title: title.into(),
            created_at: Utc::now(),
            messages: Vec::new(),
        };
        self.threads.insert(0, thread);
        self.active = Some(id);
        &self.threads[0]
    }

    /// Removes a thread.
    ///
    /// If the removed thread was active, the head of the remaining list
    /// becomes active (or none when the list empties). Deleting a
    /// non-active thread never changes which thread is active. Unknown
    /// ids are a silent no-op.
    pub fn delete_thread(&mut self, id: &str) {
        let Some(index) = self.threads.iter().position(|t| t.id == id) else {
            return;
        };
        self.threads.remove(index);
        if self.active.as_deref() == Some(id) {
            self.active = self.threads.first().map(|t| t.id.clone());
        }
    }

    /// Sets the active thread.
    ///
    /// Unknown ids are a silent no-op; selecting the already-active thread
    /// leaves the store unchanged.
    pub fn select_thread(&mut self, id: &str) {
        if self.threads.iter().any(|t| t.id == id) {
            self.active = Some(id.to_string());
        }
    }

    /// Moves the active-thread marker one entry up the list (toward the
    /// most recent thread).
    pub fn select_prev(&mut self) {
        self.select_offset(-1);
    }

    /// Moves the active-thread marker one entry down the list.
    pub fn select_next(&mut self) {
        self.select_offset(1);
    }

    fn select_offset(&mut self, delta: isize) {
        let Some(active) = self.active.as_deref() else {
            // Nothing selected yet: pick the head if there is one.
            self.active = self.threads.first().map(|t| t.id.clone());
            return;
        };
        let Some(index) = self.threads.iter().position(|t| t.id == active) else {
            return;
        };
        let target = index.saturating_add_signed(delta).min(self.threads.len() - 1);
        self.active = Some(self.threads[target].id.clone());
    }

    /// Appends a message to the named thread's log.
    ///
    /// Unknown thread ids are a silent no-op.
    pub fn append_message(&mut self, thread_id: &str, message: Message) {
        if let Some(thread) = self.threads.iter_mut().find(|t| t.id == thread_id) {
            thread.messages.push(message);
        }
    }

    /// Appends a user message, allocating its id.
    pub fn append_user_message(&mut self, thread_id: &str, content: impl Into<String>) {
        let id = self.allocate_message_id();
        self.append_message(thread_id, Message::user(id, content));
    }

    /// Appends an assistant message tagged with its model, allocating its id.
    pub fn append_assistant_message(
        &mut self,
        thread_id: &str,
        model: ModelId,
        content: impl Into<String>,
    ) {
        let id = self.allocate_message_id();
        self.append_message(thread_id, Message::assistant(id, model, content));
    }

    /// Returns the active thread id, creating a thread if none is active.
    ///
    /// The implicit thread takes its title from the message being sent.
    pub fn ensure_active_for_send(&mut self, text: &str) -> String {
        if let Some(id) = self.active.clone() {
            return id;
        }
        self.create_thread_titled(derived_title(text)).id.clone()
    }

    /// Seeds the single empty thread a fresh sign-in starts with.
    pub fn seed_initial_thread(&mut self) {
        if self.threads.is_empty() {
            self.create_thread();
        }
    }

    /// Removes every thread and clears the active marker (sign-out).
    pub fn clear(&mut self) {
        self.threads.clear();
        self.active = None;
    }

    fn allocate_message_id(&mut self) -> u64 {
        self.next_message_id += 1;
        self.next_message_id
    }

    /// Allocates a time-derived thread id, bumping past the last issued
    /// stamp so ids stay unique even when threads are created within the
    /// same millisecond.
    fn allocate_thread_id(&mut self) -> String {
        let mut stamp = Utc::now().timestamp_millis();
        if stamp <= self.last_thread_stamp {
            stamp = self.last_thread_stamp + 1;
        }
        self.last_thread_stamp = stamp;
        stamp.to_string()
    }
}
