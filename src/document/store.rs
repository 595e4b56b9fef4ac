use std::fmt;

type Listener = Box<dyn FnMut(&str)>;

/// Handle returned by [`DocumentStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Owns the document text and the list of change listeners.
#[derive(Default)]
pub struct DocumentStore {
    text: String,
    listeners: Vec<(Subscription, Listener)>,
    next_id: u64,
}

impl DocumentStore {
    /// An empty document with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// A document starting with `text`. No one is notified.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// The current text, exactly as last set.
    pub fn get(&self) -> &str {
        &self.text
    }

    /// Replace the text and notify every subscriber before returning.
    ///
    /// Subscribers are called even when the text is unchanged.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        for (_, listener) in &mut self.listeners {
            listener(&self.text);
        }
    }

    /// Register `listener` to run after each [`set`](Self::set).
    ///
    /// Listeners run in the order they were subscribed. The current text is
    /// not replayed on subscribe.
    pub fn subscribe(&mut self, listener: impl FnMut(&str) + 'static) -> Subscription {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStore")
            .field("text_bytes", &self.text.len())
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
