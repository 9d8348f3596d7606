//! Session loop state: the one engine a server drives.
//!
//! The server never touches the engine. It queues [`InboundCommand`]s; the
//! session applies them in order and hands back the lines to deliver.

use serde::Serialize;

use crate::core::{EngineConfig, EngineError, GridEngine, Selection, SimpleRng};
use crate::protocol::{create_ack, OutcomeKind, OutcomeReport};
use crate::runtime::{ClientCommand, InboundCommand, InboundPayload, OutboundMessage};
use crate::server::build_observation;

pub struct Session {
    engine: GridEngine<SimpleRng>,
    selection: Selection,
    seed: u32,
    episode_id: u32,
    /// Sequence counter for session-originated messages (observations)
    out_seq: u64,
    last_outcome: Option<OutcomeReport>,
}

impl Session {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            engine: GridEngine::new(config)?,
            selection: Selection::new(),
            seed: config.seed,
            episode_id: 0,
            out_seq: 0,
            last_outcome: None,
        })
    }

    pub fn engine(&self) -> &GridEngine<SimpleRng> {
        &self.engine
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Apply one inbound command and return what to send
    pub fn apply(&mut self, cmd: InboundCommand) -> Vec<OutboundMessage> {
        let mut out = Vec::with_capacity(2);

        match cmd.payload {
            InboundPayload::SnapshotRequest => {
                if let Some(line) = self.observation_line() {
                    out.push(OutboundMessage::ToClient {
                        client_id: cmd.client_id,
                        line,
                    });
                }
            }
            InboundPayload::Command(command) => {
                let outcome = self.execute(command);
                tracing::debug!(
                    client_id = cmd.client_id,
                    seq = cmd.seq,
                    ?command,
                    result = ?outcome.result,
                    "command applied"
                );

                if let Some(line) = encode(&create_ack(cmd.seq, Some(outcome.clone()))) {
                    out.push(OutboundMessage::ToClient {
                        client_id: cmd.client_id,
                        line,
                    });
                }

                let observe_only = command == ClientCommand::Observe;
                if !observe_only {
                    self.last_outcome = Some(outcome);
                }
                if let Some(line) = self.observation_line() {
                    out.push(if observe_only {
                        OutboundMessage::ToClient {
                            client_id: cmd.client_id,
                            line,
                        }
                    } else {
                        OutboundMessage::Broadcast { line }
                    });
                }
            }
        }

        out
    }

    fn execute(&mut self, command: ClientCommand) -> OutcomeReport {
        match command {
            ClientCommand::Swap { a, b } => {
                self.selection.clear();
                OutcomeReport::from(&self.engine.attempt_swap(a, b))
            }
            ClientCommand::Select(coord) => {
                OutcomeReport::from(&self.selection.select(&mut self.engine, coord))
            }
            ClientCommand::Restart => {
                self.engine.restart();
                self.selection.clear();
                self.episode_id = self.episode_id.wrapping_add(1);
                tracing::info!(episode_id = self.episode_id, "session restarted");
                OutcomeReport::of(OutcomeKind::Restarted)
            }
            ClientCommand::Observe => OutcomeReport::of(OutcomeKind::Observed),
        }
    }

    fn observation_line(&mut self) -> Option<String> {
        self.out_seq += 1;
        let obs = build_observation(
            &self.engine,
            self.selection.selected(),
            self.out_seq,
            self.episode_id,
            self.seed,
            self.last_outcome.clone(),
        );
        encode(&obs)
    }
}

fn encode<T: Serialize>(msg: &T) -> Option<String> {
    match serde_json::to_string(msg) {
        Ok(line) => Some(line),
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode outbound message");
            None
        }
    }
}
