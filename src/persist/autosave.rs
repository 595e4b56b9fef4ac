//! Background writer that mirrors the document into storage.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use super::Storage;

enum Command {
    Save(String),
    Flush(Sender<()>),
    Shutdown,
}

/// Owns the autosave thread.
///
/// Snapshots are sent without waiting. When several are queued the writer
/// keeps only the newest, so a burst of keystrokes costs one write. Dropping
/// the `Autosaver` drains the queue and joins the thread; listeners created
/// by [`Autosaver::listener`] become no-ops afterwards.
pub struct Autosaver {
    tx: Option<Sender<Command>>,
    handle: Option<JoinHandle<()>>,
}

impl Autosaver {
    /// Start the writer thread for `key` in `storage`.
    ///
    /// # Errors
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(storage: Box<dyn Storage>, key: impl Into<String>) -> std::io::Result<Self> {
        let key = key.into();
        let (tx, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("autosave".to_string())
            .spawn(move || run_writer(storage, &key, &rx))?;
        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    /// Queue `text` to be written. Never blocks and never fails.
    pub fn submit(&self, text: &str) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Command::Save(text.to_string()));
        }
    }

    /// A document listener that forwards every change to this writer.
    pub fn listener(&self) -> impl FnMut(&str) + 'static {
        let tx = self.tx.clone();
        move |text: &str| {
            if let Some(tx) = &tx {
                let _ = tx.send(Command::Save(text.to_string()));
            }
        }
    }

    /// Block until everything queued so far has been written (or dropped).
    pub fn flush(&self) {
        let Some(tx) = &self.tx else {
            return;
        };
        let (ack_tx, ack_rx) = mpsc::channel();
        if tx.send(Command::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Command::Shutdown);
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl std::fmt::Debug for Autosaver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Autosaver")
            .field("running", &self.handle.is_some())
            .finish()
    }
}

fn run_writer(mut storage: Box<dyn Storage>, key: &str, rx: &Receiver<Command>) {
    while let Ok(first) = rx.recv() {
        let mut latest = None;
        let mut acks = Vec::new();
        let mut shutdown = false;
        let mut pending = Some(first);
        while let Some(command) = pending.take().or_else(|| rx.try_recv().ok()) {
            match command {
                Command::Save(text) => latest = Some(text),
                Command::Flush(ack) => acks.push(ack),
                Command::Shutdown => shutdown = true,
            }
        }

        if let Some(text) = latest {
            match storage.save(key, &text) {
                Ok(()) => tracing::debug!(bytes = text.len(), "autosaved document"),
                Err(err) => tracing::warn!(error = %err, "autosave failed, keeping in-memory copy"),
            }
        }
        for ack in acks {
            let _ = ack.send(());
        }
        if shutdown {
            break;
        }
    }
}
