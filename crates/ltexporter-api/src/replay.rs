// Replay session
//
// Answers commands from a recorded JSON fixture instead of a live device.
// Backs the CLI's offline `scrape --replay` mode and the integration tests.
//
// Fixture shape:
//
//   [
//     { "path": "/interface/lte/print", "reply": [{ "name": "lte1" }] },
//     { "path": "/interface/lte/monitor", "match": { ".id": "lte1" },
//       "reply": [{ "rssi": "-70" }] },
//     { "path": "/interface/lte/monitor", "match": { ".id": "lte2" },
//       "trap": { "message": "interface not running" } }
//   ]

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use futures_util::future::{self, BoxFuture, FutureExt};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::command::{Command, PROPLIST};
use crate::error::Error;
use crate::reply::Reply;
use crate::session::Session;

/// Recorded device-side failure.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedTrap {
    #[serde(default)]
    pub category: Option<u8>,
    pub message: String,
}

/// What the device answered for a recorded command.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordedOutcome {
    Reply(Reply),
    Trap(RecordedTrap),
}

/// One recorded command and its outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedCommand {
    pub path: String,
    /// Attributes the command must carry for this entry to apply.
    #[serde(default, rename = "match")]
    pub matches: IndexMap<String, String>,
    #[serde(flatten)]
    pub outcome: RecordedOutcome,
}

impl RecordedCommand {
    fn applies_to(&self, command: &Command) -> bool {
        self.path == command.path()
            && self
                .matches
                .iter()
                .all(|(k, v)| command.attribute_value(k) == Some(v.as_str()))
    }
}

/// A [`Session`] that serves replies from recorded commands.
///
/// Honors `.proplist` the way a device does: reply records only carry the
/// requested properties. Every command received is kept in
/// [`history`](Self::history) for inspection.
#[derive(Debug, Default)]
pub struct ReplaySession {
    entries: Vec<RecordedCommand>,
    history: Mutex<Vec<Command>>,
}

impl ReplaySession {
    pub fn new(entries: Vec<RecordedCommand>) -> Self {
        Self {
            entries,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Parse a fixture from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let entries: Vec<RecordedCommand> =
            serde_json::from_str(json).map_err(|e| Error::Deserialization {
                message: e.to_string(),
            })?;
        Ok(Self::new(entries))
    }

    /// Load a fixture file.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::Fixture {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let entries: Vec<RecordedCommand> =
            serde_json::from_str(&raw).map_err(|e| Error::Fixture {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        debug!(path = %path.display(), entries = entries.len(), "loaded replay fixture");
        Ok(Self::new(entries))
    }

    /// Commands received so far, oldest first.
    pub fn history(&self) -> Vec<Command> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn answer(&self, command: &Command) -> Result<Reply, Error> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command.clone());
        trace!(%command, "replaying command");

        let Some(entry) = self.entries.iter().find(|e| e.applies_to(command)) else {
            return Err(Error::Trap {
                category: None,
                message: format!("no such command: {}", command.path()),
            });
        };

        match &entry.outcome {
            RecordedOutcome::Trap(trap) => Err(Error::Trap {
                category: trap.category,
                message: trap.message.clone(),
            }),
            RecordedOutcome::Reply(reply) => {
                let Some(props) = command.requested_properties() else {
                    return Ok(reply.clone());
                };
                let records = reply
                    .records()
                    .iter()
                    .cloned()
                    .map(|mut r| {
                        r.retain_keys(&props);
                        r
                    })
                    .collect::<Vec<_>>();
                trace!(proplist = ?command.attribute_value(PROPLIST), records = records.len(), "filtered reply");
                Ok(Reply::new(records))
            }
        }
    }
}

impl Session for ReplaySession {
    fn run<'a>(&'a self, command: &'a Command) -> BoxFuture<'a, Result<Reply, Error>> {
        future::ready(self.answer(command)).boxed()
    }
}
