//! TCP server for the session adapter
//!
//! Handles incoming connections and manages client lifecycle.
//! Uses tokio for async networking.

use std::hash::Hasher;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, RwLock};

use crate::core::{ColorSource, Fnv1aHasher, GridEngine};
use crate::protocol::*;
use crate::runtime::{ClientCommand, InboundCommand, InboundPayload, OutboundMessage};
use crate::types::Coord;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7878;
pub const DEFAULT_MAX_PENDING: usize = 16;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub protocol_version: String,
    pub max_pending_commands: usize,
    pub log_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            protocol_version: PROTOCOL_VERSION.to_string(),
            max_pending_commands: DEFAULT_MAX_PENDING,
            log_path: None,
        }
    }
}

impl ServerConfig {
    /// Create from `COLOR_BLOCKS_*` environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (the environment, or a map in tests)
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = get("COLOR_BLOCKS_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get("COLOR_BLOCKS_PORT") {
            Some(s) => s
                .trim()
                .parse()
                .with_context(|| format!("COLOR_BLOCKS_PORT must be a port number, got {s:?}"))?,
            None => DEFAULT_PORT,
        };

        let max_pending_commands = match get("COLOR_BLOCKS_MAX_PENDING") {
            Some(s) => s.trim().parse().with_context(|| {
                format!("COLOR_BLOCKS_MAX_PENDING must be a positive number, got {s:?}")
            })?,
            None => DEFAULT_MAX_PENDING,
        };
        if max_pending_commands == 0 {
            anyhow::bail!("COLOR_BLOCKS_MAX_PENDING must be at least 1");
        }

        let log_path = get("COLOR_BLOCKS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            host,
            port,
            protocol_version: PROTOCOL_VERSION.to_string(),
            max_pending_commands,
            log_path,
        })
    }
}

/// "1" or "true" (any case)
pub fn parse_flag(value: &str) -> bool {
    let v = value.trim();
    v == "1" || v.eq_ignore_ascii_case("true")
}

/// Shared server state
pub struct ServerState {
    config: ServerConfig,
    clients: RwLock<Vec<ClientHandle>>,
    controller: RwLock<Option<usize>>, // Client id
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            clients: RwLock::new(Vec::new()),
            controller: RwLock::new(None),
        }
    }
}

/// Handle to a connected client
pub struct ClientHandle {
    pub id: usize,
    /// Role asked for in hello; `Observer` is never promoted
    pub requested_role: RequestedRole,
    pub stream_observations: bool,
    pub handshaken: bool,
    pub last_seq: Option<u64>,
    pub tx: mpsc::UnboundedSender<ClientOutbound>, // Channel to send messages to client
}

#[derive(Debug, Clone)]
pub enum ClientOutbound {
    Line(String),
    Ack(AckMessage),
    Error(ErrorMessage),
    Welcome(WelcomeMessage),
}

impl ClientOutbound {
    fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            ClientOutbound::Line(line) => Some(line.into_bytes()),
            ClientOutbound::Ack(m) => serde_json::to_vec(&m).ok(),
            ClientOutbound::Error(m) => serde_json::to_vec(&m).ok(),
            ClientOutbound::Welcome(m) => serde_json::to_vec(&m).ok(),
        }
    }
}

async fn is_handshaken(state: &ServerState, client_id: usize) -> bool {
    let clients = state.clients.read().await;
    clients
        .iter()
        .find(|c| c.id == client_id)
        .map(|c| c.handshaken)
        .unwrap_or(false)
}

async fn is_controller(state: &ServerState, client_id: usize) -> bool {
    *state.controller.read().await == Some(client_id)
}

async fn check_and_update_seq(state: &ServerState, client_id: usize, seq: u64) -> bool {
    let mut clients = state.clients.write().await;
    let Some(client) = clients.iter_mut().find(|c| c.id == client_id) else {
        return true;
    };

    match client.last_seq {
        Some(prev) if seq <= prev => false,
        _ => {
            client.last_seq = Some(seq);
            true
        }
    }
}

fn send_error(tx: &mpsc::UnboundedSender<ClientOutbound>, seq: u64, code: ErrorCode, message: &str) {
    let _ = tx.send(ClientOutbound::Error(create_error(seq, code, message)));
}

/// Append-only JSONL log of every line sent or received
fn spawn_wire_log(path: String) -> mpsc::UnboundedSender<Vec<u8>> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();
    tokio::spawn(async move {
        use tokio::fs::OpenOptions;

        let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(%path, error = %e, "wire log disabled");
                return;
            }
        };

        while let Some(bytes) = rx.recv().await {
            if file.write_all(&bytes).await.is_err() || file.write_all(b"\n").await.is_err() {
                break;
            }
        }

        let _ = file.flush().await;
    });
    tx
}

/// Start the TCP server
pub async fn run_server(
    config: ServerConfig,
    command_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let wire_log_tx = config.log_path.clone().map(spawn_wire_log);

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    let bound = listener.local_addr()?;
    tracing::info!(addr = %bound, "adapter listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(ServerState::new(config));
    let mut client_id_counter = 0usize;

    // Outbound dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                let clients = state.clients.read().await;
                match msg {
                    OutboundMessage::ToClient { client_id, line } => {
                        if let Some(c) = clients.iter().find(|c| c.id == client_id) {
                            let _ = c.tx.send(ClientOutbound::Line(line));
                        }
                    }
                    OutboundMessage::Broadcast { line } => {
                        for c in clients.iter() {
                            if c.handshaken && c.stream_observations {
                                let _ = c.tx.send(ClientOutbound::Line(line.clone()));
                            }
                        }
                    }
                }
            }
        });
    }

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        tracing::info!(client_id, %addr, "client connected");

        let state = Arc::clone(&state);
        let command_tx = command_tx.clone();
        let wire_log_tx = wire_log_tx.clone();

        // Spawn task to handle this client
        tokio::spawn(async move {
            if let Err(e) =
                handle_client(socket, client_id, state, command_tx, wire_log_tx).await
            {
                tracing::warn!(client_id, error = %e, "client error");
            }
            tracing::info!(client_id, "client disconnected");
        });
    }
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    state: Arc<ServerState>,
    command_tx: mpsc::Sender<InboundCommand>,
    wire_log_tx: Option<mpsc::UnboundedSender<Vec<u8>>>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);

    // Channel to send messages to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<ClientOutbound>();

    state.clients.write().await.push(ClientHandle {
        id: client_id,
        requested_role: RequestedRole::Auto,
        stream_observations: false,
        handshaken: false,
        last_seq: None,
        tx: tx.clone(),
    });

    let wire_log_tx_out = wire_log_tx.clone();

    // Spawn task to write messages to client
    let write_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let Some(bytes) = msg.into_bytes() else {
                continue;
            };
            if writer.write_all(&bytes).await.is_err()
                || writer.write_all(b"\n").await.is_err()
                || writer.flush().await.is_err()
            {
                break;
            }
            if let Some(log) = wire_log_tx_out.as_ref() {
                let _ = log.send(bytes);
            }
        }
    });

    let result = read_loop(
        &mut reader,
        client_id,
        &state,
        &command_tx,
        &tx,
        wire_log_tx.as_ref(),
    )
    .await;

    remove_client(&state, client_id).await;

    // Last sender gone: the write task drains and exits
    drop(tx);
    let _ = write_task.await;

    result
}

async fn read_loop(
    reader: &mut BufReader<OwnedReadHalf>,
    client_id: usize,
    state: &ServerState,
    command_tx: &mpsc::Sender<InboundCommand>,
    tx: &mpsc::UnboundedSender<ClientOutbound>,
    wire_log_tx: Option<&mpsc::UnboundedSender<Vec<u8>>>,
) -> anyhow::Result<()> {
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            // Client disconnected
            return Ok(());
        }

        let raw_line = line.trim_end_matches(['\n', '\r']);
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(log) = wire_log_tx {
            let _ = log.send(raw_line.as_bytes().to_vec());
        }

        match parse_message(trimmed) {
            Ok(ParsedMessage::Hello(hello)) => {
                if is_handshaken(state, client_id).await
                    && !check_and_update_seq(state, client_id, hello.seq).await
                {
                    send_error(tx, hello.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }

                if !is_compatible_version(&hello.protocol_version) {
                    send_error(
                        tx,
                        hello.seq,
                        ErrorCode::ProtocolMismatch,
                        &format!("Protocol version {} not supported", hello.protocol_version),
                    );
                    return Ok(());
                }

                let welcome = handshake(state, client_id, &hello).await;
                let _ = tx.send(ClientOutbound::Welcome(welcome));

                // Initial state for streaming clients.
                if hello.requested.stream_observations {
                    match command_tx.try_send(InboundCommand {
                        client_id,
                        seq: hello.seq,
                        payload: InboundPayload::SnapshotRequest,
                    }) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            tracing::warn!(client_id, "queue full, initial observation dropped");
                            send_error(
                                tx,
                                hello.seq,
                                ErrorCode::Backpressure,
                                "Command queue is full; send an observe command",
                            );
                        }
                        Err(TrySendError::Closed(_)) => {
                            anyhow::bail!("session loop has shut down");
                        }
                    }
                }
            }

            Ok(ParsedMessage::Command(cmd)) => {
                if !is_handshaken(state, client_id).await {
                    send_error(tx, cmd.seq, ErrorCode::HandshakeRequired, "Send hello before command");
                    continue;
                }
                if !check_and_update_seq(state, client_id, cmd.seq).await {
                    send_error(tx, cmd.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }
                if !is_controller(state, client_id).await {
                    send_error(tx, cmd.seq, ErrorCode::NotController, "Only controller may send commands");
                    continue;
                }

                let mapped = match map_command(&cmd) {
                    Ok(c) => c,
                    Err((code, message)) => {
                        send_error(tx, cmd.seq, code, &message);
                        continue;
                    }
                };

                // Backpressure: bounded queue. The ack is sent by the session
                // loop after the command is applied.
                match command_tx.try_send(InboundCommand {
                    client_id,
                    seq: cmd.seq,
                    payload: InboundPayload::Command(mapped),
                }) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        send_error(tx, cmd.seq, ErrorCode::Backpressure, "Command queue is full");
                    }
                    Err(TrySendError::Closed(_)) => {
                        anyhow::bail!("session loop has shut down");
                    }
                }
            }

            Ok(ParsedMessage::Control(ctrl)) => {
                if !is_handshaken(state, client_id).await {
                    send_error(tx, ctrl.seq, ErrorCode::HandshakeRequired, "Send hello before control");
                    continue;
                }
                if !check_and_update_seq(state, client_id, ctrl.seq).await {
                    send_error(tx, ctrl.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }

                match apply_control(state, client_id, ctrl.action).await {
                    Ok(()) => {
                        let _ = tx.send(ClientOutbound::Ack(create_ack(ctrl.seq, None)));
                    }
                    Err((code, message)) => send_error(tx, ctrl.seq, code, message),
                }
            }

            Ok(ParsedMessage::Unknown(unknown)) => {
                let seq = unknown.seq;
                if is_handshaken(state, client_id).await
                    && !check_and_update_seq(state, client_id, seq).await
                {
                    send_error(tx, seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }
                send_error(tx, seq, ErrorCode::InvalidCommand, "Unknown message type");
            }

            Err(e) => {
                let seq = extract_seq_best_effort(trimmed).unwrap_or(0);
                send_error(tx, seq, ErrorCode::InvalidCommand, &format!("JSON parse error: {}", e));
            }
        }
    }
}

/// Mark the client handshaken and settle its role
async fn handshake(state: &ServerState, client_id: usize, hello: &HelloMessage) -> WelcomeMessage {
    let wants = hello.requested.role.unwrap_or(RequestedRole::Auto);

    let mut controller = state.controller.write().await;
    let mut clients = state.clients.write().await;

    if controller.is_none() && wants != RequestedRole::Observer {
        *controller = Some(client_id);
        tracing::info!(client_id, "client is now controller");
    }
    let is_controller = *controller == Some(client_id);

    if let Some(client) = clients.iter_mut().find(|c| c.id == client_id) {
        client.handshaken = true;
        client.last_seq = Some(hello.seq);
        client.stream_observations = hello.requested.stream_observations;
        client.requested_role = wants;
    }

    let role = if is_controller {
        AssignedRole::Controller
    } else {
        AssignedRole::Observer
    };
    create_welcome(
        hello.seq,
        &state.config.protocol_version,
        client_id as u64,
        role,
        controller.map(|id| id as u64),
    )
}

async fn apply_control(
    state: &ServerState,
    client_id: usize,
    action: ControlAction,
) -> Result<(), (ErrorCode, &'static str)> {
    let mut controller = state.controller.write().await;

    match action {
        ControlAction::Claim => match *controller {
            None => {
                *controller = Some(client_id);
                tracing::info!(client_id, "controller claimed");
                Ok(())
            }
            Some(id) if id == client_id => Ok(()),
            Some(_) => Err((ErrorCode::ControllerActive, "Controller already assigned")),
        },
        ControlAction::Release => {
            if *controller != Some(client_id) {
                return Err((ErrorCode::NotController, "Only controller may release"));
            }
            *controller = None;
            tracing::info!(client_id, "controller released");
            Ok(())
        }
    }
}

/// Remove the client; if it held control, promote the lowest remaining
/// handshaken client that did not ask to observe.
async fn remove_client(state: &ServerState, client_id: usize) {
    let mut controller = state.controller.write().await;
    let mut clients = state.clients.write().await;

    clients.retain(|c| c.id != client_id);

    if *controller != Some(client_id) {
        return;
    }

    let next_id = clients
        .iter()
        .filter(|c| c.handshaken && c.requested_role != RequestedRole::Observer)
        .map(|c| c.id)
        .min();
    *controller = next_id;
    match next_id {
        Some(new_id) => tracing::info!(client_id = new_id, "controller promoted"),
        None => tracing::info!(client_id, "controller slot vacant"),
    }
}

/// Map a protocol command into a session command.
fn map_command(cmd: &CommandMessage) -> Result<ClientCommand, (ErrorCode, String)> {
    match cmd.mode {
        CommandMode::Swap => {
            let Some(swap) = cmd.swap else {
                return Err((ErrorCode::InvalidCommand, "Missing swap".to_string()));
            };
            Ok(ClientCommand::Swap {
                a: swap.a.into(),
                b: swap.b.into(),
            })
        }
        CommandMode::Select => {
            let Some(cell) = cmd.select else {
                return Err((ErrorCode::InvalidCommand, "Missing select".to_string()));
            };
            Ok(ClientCommand::Select(cell.into()))
        }
        CommandMode::Restart => Ok(ClientCommand::Restart),
        CommandMode::Observe => Ok(ClientCommand::Observe),
    }
}

/// Build an observation message from engine state
pub fn build_observation<R: ColorSource>(
    engine: &GridEngine<R>,
    selected: Option<Coord>,
    seq: u64,
    episode_id: u32,
    seed: u32,
    last_outcome: Option<OutcomeReport>,
) -> ObservationMessage {
    let snapshot = engine.snapshot();

    // Build state hash
    let mut hasher = Fnv1aHasher::new();
    hasher.write_u64(snapshot.board_hash);
    hasher.write_u32(snapshot.score);
    hasher.write_u32(snapshot.moves);
    hasher.write_u32(episode_id);
    hasher.write_u32(seed);
    match selected {
        Some(c) => {
            hasher.write_u8(1);
            hasher.write_u32(c.row as u32);
            hasher.write_u32(c.col as u32);
        }
        None => hasher.write_u8(0),
    }
    let state_hash = StateHash(hasher.finish());

    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        episode_id,
        seed,
        grid: GridWire {
            size: snapshot.size,
            cells: snapshot.rows(),
        },
        selected: selected.map(CellRef::from),
        score: snapshot.score,
        moves: snapshot.moves,
        state_hash,
        last_outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 7878);
        assert_eq!(config.max_pending_commands, 16);
        assert_eq!(config.log_path, None);
        assert_eq!(config.protocol_version, PROTOCOL_VERSION);
    }

    #[test]
    fn test_server_config_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("COLOR_BLOCKS_HOST", "0.0.0.0"),
            ("COLOR_BLOCKS_PORT", "9000"),
            ("COLOR_BLOCKS_MAX_PENDING", "4"),
            ("COLOR_BLOCKS_LOG_PATH", " /tmp/wire.jsonl "),
        ]))
        .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_pending_commands, 4);
        assert_eq!(config.log_path.as_deref(), Some("/tmp/wire.jsonl"));
    }

    #[test]
    fn test_server_config_rejects_garbage() {
        let err = ServerConfig::from_lookup(lookup(&[("COLOR_BLOCKS_PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("COLOR_BLOCKS_PORT"));
        assert!(ServerConfig::from_lookup(lookup(&[("COLOR_BLOCKS_MAX_PENDING", "0")])).is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("yes"));
    }

    #[test]
    fn test_map_command_requires_payload() {
        let json = r#"{"type":"command","seq":2,"ts":1,"mode":"swap"}"#;
        let ParsedMessage::Command(cmd) = parse_message(json).unwrap() else {
            panic!("expected command");
        };
        let (code, _) = map_command(&cmd).unwrap_err();
        assert_eq!(code, ErrorCode::InvalidCommand);

        let json = r#"{"type":"command","seq":3,"ts":1,"mode":"select","select":{"row":1,"col":2}}"#;
        let ParsedMessage::Command(cmd) = parse_message(json).unwrap() else {
            panic!("expected command");
        };
        assert_eq!(map_command(&cmd).unwrap(), ClientCommand::Select(Coord::new(1, 2)));
    }

    async fn join(state: &ServerState, client_id: usize, role: RequestedRole) -> WelcomeMessage {
        let (tx, _rx) = mpsc::unbounded_channel();
        state.clients.write().await.push(ClientHandle {
            id: client_id,
            requested_role: RequestedRole::Auto,
            stream_observations: false,
            handshaken: false,
            last_seq: None,
            tx,
        });
        let mut hello = create_hello(1, "unit", PROTOCOL_VERSION);
        hello.requested.role = Some(role);
        handshake(state, client_id, &hello).await
    }

    #[tokio::test]
    async fn test_explicit_observer_never_takes_vacant_slot() {
        let state = ServerState::new(ServerConfig::default());

        let welcome = join(&state, 1, RequestedRole::Observer).await;
        assert_eq!(welcome.role, AssignedRole::Observer);
        assert_eq!(welcome.controller_id, None);
        assert_eq!(*state.controller.read().await, None);

        let welcome = join(&state, 2, RequestedRole::Auto).await;
        assert_eq!(welcome.role, AssignedRole::Controller);
        assert_eq!(welcome.controller_id, Some(2));
    }

    #[tokio::test]
    async fn test_promotion_skips_observer_role() {
        let state = ServerState::new(ServerConfig::default());
        join(&state, 1, RequestedRole::Auto).await;
        join(&state, 2, RequestedRole::Observer).await;
        join(&state, 3, RequestedRole::Auto).await;

        remove_client(&state, 1).await;
        assert_eq!(*state.controller.read().await, Some(3));

        remove_client(&state, 3).await;
        assert_eq!(*state.controller.read().await, None);
        assert!(!is_controller(&state, 2).await);
    }

    #[tokio::test]
    async fn test_non_controller_leaving_keeps_controller() {
        let state = ServerState::new(ServerConfig::default());
        join(&state, 1, RequestedRole::Auto).await;
        join(&state, 2, RequestedRole::Auto).await;

        remove_client(&state, 2).await;
        assert_eq!(*state.controller.read().await, Some(1));
    }

    #[test]
    fn test_observation_mirrors_engine() {
        let engine = GridEngine::new(&EngineConfig::default()).unwrap();
        let obs = build_observation(&engine, None, 1, 0, 1, None);
        assert_eq!(obs.grid.size, 8);
        assert_eq!(obs.grid.cells.len(), 8);
        assert_eq!(obs.grid.cells[0].len(), 8);
        assert_eq!(obs.score, 0);
        assert_eq!(obs.seed, 1);
    }

    #[test]
    fn test_state_hash_changes_when_meta_changes() {
        let engine = GridEngine::new(&EngineConfig::default()).unwrap();
        let a = build_observation(&engine, None, 1, 0, 1, None);
        let b = build_observation(&engine, None, 2, 1, 1, None);
        let c = build_observation(&engine, Some(Coord::new(0, 0)), 3, 0, 1, None);
        let d = build_observation(&engine, None, 4, 0, 1, None);
        assert_ne!(a.state_hash, b.state_hash);
        assert_ne!(a.state_hash, c.state_hash);
        // seq and ts do not feed the hash
        assert_eq!(a.state_hash, d.state_hash);
    }
}
