//! Single-writer command loop and its cloneable handle.

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{
    backend::TabularBackend,
    core::{
        records::{RecordStore, StoreError},
        settings::SettingsStore,
    },
    entry::{EntryDraft, Settings},
    submit::{SubmitError, SubmitReceipt, Submitter},
};

use super::events::OutreachEvent;

/// Failure surfaced by a runtime handle call.
#[derive(Debug)]
pub enum RuntimeError {
    /// A submission attempt was rejected.
    Submit(SubmitError),
    /// A store operation outside a submission failed.
    Store(StoreError),
    /// The runtime loop is gone.
    ChannelClosed,
}

impl From<SubmitError> for RuntimeError {
    fn from(value: SubmitError) -> Self {
        Self::Submit(value)
    }
}

impl From<StoreError> for RuntimeError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Runtime knobs: area names and channel bounds.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Name of the data area holding entries.
    pub data_area: String,
    /// Name of the settings area.
    pub settings_area: String,
    /// Bound of the command queue.
    pub cmd_queue_bound: usize,
    /// Capacity of the broadcast event channel.
    pub events_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_area: "Outreach".to_string(),
            settings_area: "Settings".to_string(),
            cmd_queue_bound: 64,
            events_capacity: 256,
        }
    }
}

/// Cloneable handle to the runtime loop.
pub struct OutreachHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<OutreachEvent>,
}

impl Clone for OutreachHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Submit {
        draft: EntryDraft,
        resp: oneshot::Sender<Result<SubmitReceipt, RuntimeError>>,
    },
    SubmitterName {
        resp: oneshot::Sender<Result<Settings, RuntimeError>>,
    },
    SetSubmitterName {
        name: String,
        resp: oneshot::Sender<Result<Settings, RuntimeError>>,
    },
    Shutdown {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
}

/// Spawns the single-writer loop that owns `backend` and returns its handle.
///
/// Commands execute to completion in arrival order, so one submission finishes
/// before the next is accepted. The session settings value is loaded lazily on
/// the first command that needs the store; a failed open surfaces on that
/// command and is attempted again on the next.
pub fn spawn_outreach(backend: Box<dyn TabularBackend>, config: RuntimeConfig) -> OutreachHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.cmd_queue_bound);
    let (events_tx, _) = broadcast::channel::<OutreachEvent>(config.events_capacity);

    let submitter = Submitter::new(
        RecordStore::new(config.data_area.clone()),
        SettingsStore::new(config.settings_area.clone()),
    );
    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut backend = backend;
        let mut session: Option<Settings> = None;

        while let Some(cmd) = cmd_rx.recv().await {
            let done = handle_command(
                cmd,
                backend.as_mut(),
                &submitter,
                &mut session,
                &events_tx_loop,
            );
            if done {
                break;
            }
        }
    });

    OutreachHandle { cmd_tx, events_tx }
}

impl OutreachHandle {
    /// Subscribes to the runtime event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<OutreachEvent> {
        self.events_tx.subscribe()
    }

    /// Submits one entry draft and returns the receipt.
    pub async fn submit(&self, draft: EntryDraft) -> Result<SubmitReceipt, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Submit { draft, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Returns the current submitter-name setting.
    pub async fn submitter_name(&self) -> Result<Settings, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SubmitterName { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Overwrites the submitter-name setting independently of a submission.
    pub async fn set_submitter_name(
        &self,
        name: impl Into<String>,
    ) -> Result<Settings, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SetSubmitterName {
                name: name.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Stops the runtime loop after in-flight commands complete.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }
}

fn handle_command(
    cmd: Command,
    backend: &mut dyn TabularBackend,
    submitter: &Submitter,
    session: &mut Option<Settings>,
    events_tx: &broadcast::Sender<OutreachEvent>,
) -> bool {
    match cmd {
        Command::Submit { draft, resp } => {
            let res = ensure_session(backend, submitter, session)
                .map_err(RuntimeError::from)
                .and_then(|settings| {
                    let (receipt, updated) = submitter
                        .submit(backend, draft, &settings)
                        .map_err(RuntimeError::from)?;
                    *session = Some(updated);
                    let _ = events_tx.send(OutreachEvent::EntryRecorded { row: receipt.row });
                    if receipt.name_saved {
                        let _ = events_tx.send(OutreachEvent::NameSaved);
                    }
                    Ok(receipt)
                });
            let _ = resp.send(res);
        }
        Command::SubmitterName { resp } => {
            let res = ensure_session(backend, submitter, session).map_err(RuntimeError::from);
            let _ = resp.send(res);
        }
        Command::SetSubmitterName { name, resp } => {
            let res = ensure_session(backend, submitter, session)
                .map_err(RuntimeError::from)
                .and_then(|_| {
                    let updated = submitter
                        .update_name(backend, &name)
                        .map_err(RuntimeError::from)?;
                    *session = Some(updated.clone());
                    let _ = events_tx.send(OutreachEvent::NameSaved);
                    Ok(updated)
                });
            let _ = resp.send(res);
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(Ok(()));
            return true;
        }
    }

    false
}

fn ensure_session(
    backend: &mut dyn TabularBackend,
    submitter: &Submitter,
    session: &mut Option<Settings>,
) -> Result<Settings, StoreError> {
    if let Some(settings) = session {
        return Ok(settings.clone());
    }
    let loaded = submitter.open(backend)?;
    *session = Some(loaded.clone());
    Ok(loaded)
}
