//! Protocol module - JSON message types for the session adapter
//!
//! Line-delimited JSON. All messages have: type, seq (sequence number),
//! ts (timestamp in ms).

use serde::{Deserialize, Serialize};

use crate::core::SelectOutcome;
use crate::types::{CascadeReport, Coord, SwapOutcome, SwapRejection};

/// Protocol version spoken by this adapter. Clients must share the major part.
pub const PROTOCOL_VERSION: &str = "1.0.0";

/// Identifier reported in `welcome.game_id`
pub const GAME_ID: &str = "color-blocks";

// ============== Client -> Session Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HelloType {
    #[serde(rename = "hello")]
    #[default]
    Hello,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CommandType {
    #[serde(rename = "command")]
    #[default]
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ControlType {
    #[serde(rename = "control")]
    #[default]
    Control,
}

/// Client hello message (first message to establish connection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: HelloType,
    pub seq: u64,
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
    pub requested: RequestedCapabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestedCapabilities {
    pub stream_observations: bool,
    /// Optional role request. `observer` never takes the controller slot;
    /// `auto` and `controller` take it when vacant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RequestedRole>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestedRole {
    Auto,
    Controller,
    Observer,
}

impl<'de> Deserialize<'de> for RequestedRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else if s.eq_ignore_ascii_case("controller") {
            Ok(Self::Controller)
        } else if s.eq_ignore_ascii_case("observer") {
            Ok(Self::Observer)
        } else {
            Err(serde::de::Error::custom("invalid requested role"))
        }
    }
}

impl Serialize for RequestedRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            RequestedRole::Auto => serializer.serialize_str("auto"),
            RequestedRole::Controller => serializer.serialize_str("controller"),
            RequestedRole::Observer => serializer.serialize_str("observer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignedRole {
    #[serde(rename = "controller")]
    Controller,
    #[serde(rename = "observer")]
    Observer,
}

/// A grid position on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl From<CellRef> for Coord {
    fn from(value: CellRef) -> Self {
        Coord::new(value.row, value.col)
    }
}

impl From<Coord> for CellRef {
    fn from(value: Coord) -> Self {
        Self {
            row: value.row,
            col: value.col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapCommand {
    pub a: CellRef,
    pub b: CellRef,
}

/// Command message (controller only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: CommandType,
    pub seq: u64,
    pub ts: u64,
    pub mode: CommandMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap: Option<SwapCommand>, // For swap mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<CellRef>, // For select mode
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandMode {
    Swap,
    Select,
    Restart,
    Observe,
}

impl CommandMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandMode::Swap => "swap",
            CommandMode::Select => "select",
            CommandMode::Restart => "restart",
            CommandMode::Observe => "observe",
        }
    }
}

impl<'de> Deserialize<'de> for CommandMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("swap") {
            Ok(Self::Swap)
        } else if s.eq_ignore_ascii_case("select") {
            Ok(Self::Select)
        } else if s.eq_ignore_ascii_case("restart") {
            Ok(Self::Restart)
        } else if s.eq_ignore_ascii_case("observe") {
            Ok(Self::Observe)
        } else {
            Err(serde::de::Error::custom("invalid command mode"))
        }
    }
}

impl Serialize for CommandMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Control message (claim/release controller status)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ControlType,
    pub seq: u64,
    pub ts: u64,
    pub action: ControlAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    Claim,
    Release,
}

impl<'de> Deserialize<'de> for ControlAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("claim") {
            Ok(Self::Claim)
        } else if s.eq_ignore_ascii_case("release") {
            Ok(Self::Release)
        } else {
            Err(serde::de::Error::custom("invalid control action"))
        }
    }
}

impl Serialize for ControlAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            ControlAction::Claim => serializer.serialize_str("claim"),
            ControlAction::Release => serializer.serialize_str("release"),
        }
    }
}

// ============== Session -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WelcomeType {
    #[serde(rename = "welcome")]
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    HandshakeRequired,
    ProtocolMismatch,
    NotController,
    ControllerActive,
    InvalidCommand,
    Backpressure,
}

/// Welcome message (response to hello)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: WelcomeType,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    pub client_id: u64,
    pub role: AssignedRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller_id: Option<u64>,
    pub game_id: String,
    pub capabilities: ServerCapabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    pub formats: [CapabilityFormat; 1],
    pub command_modes: [CommandMode; 4],
    pub features: Vec<CapabilityFeature>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityFormat {
    #[serde(rename = "json")]
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityFeature {
    Selection,
    CascadeReport,
    StateHash,
    Score,
    Moves,
}

/// What a command did, attached to its ack and to the next observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Rejected,
    NoMatch,
    Resolved,
    Selected,
    Cleared,
    Ignored,
    Restarted,
    Observed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeReport {
    pub result: OutcomeKind,
    /// Rejection reason (`invalid_coordinate`, `non_adjacent`, `identical`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cascade: Option<CascadeSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<CellRef>,
}

impl OutcomeReport {
    pub fn of(result: OutcomeKind) -> Self {
        Self {
            result,
            reason: None,
            cascade: None,
            selected: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeSummary {
    pub total_removed: u32,
    pub passes: u32,
    pub score_delta: u32,
    pub removed_per_pass: Vec<u32>,
}

impl From<&CascadeReport> for CascadeSummary {
    fn from(value: &CascadeReport) -> Self {
        Self {
            total_removed: value.total_removed,
            passes: value.passes,
            score_delta: value.score_delta,
            removed_per_pass: value.removed_per_pass.clone(),
        }
    }
}

fn rejection(reason: SwapRejection) -> OutcomeReport {
    OutcomeReport {
        reason: Some(reason.as_str().to_string()),
        ..OutcomeReport::of(OutcomeKind::Rejected)
    }
}

impl From<&SwapOutcome> for OutcomeReport {
    fn from(value: &SwapOutcome) -> Self {
        match value {
            SwapOutcome::Rejected(reason) => rejection(*reason),
            SwapOutcome::NoMatch => OutcomeReport::of(OutcomeKind::NoMatch),
            SwapOutcome::Resolved(report) => OutcomeReport {
                cascade: Some(CascadeSummary::from(report)),
                ..OutcomeReport::of(OutcomeKind::Resolved)
            },
        }
    }
}

impl From<&SelectOutcome> for OutcomeReport {
    fn from(value: &SelectOutcome) -> Self {
        match value {
            SelectOutcome::Selected(coord) => OutcomeReport {
                selected: Some(CellRef::from(*coord)),
                ..OutcomeReport::of(OutcomeKind::Selected)
            },
            SelectOutcome::Cleared => OutcomeReport::of(OutcomeKind::Cleared),
            SelectOutcome::Swapped { outcome, .. } => OutcomeReport::from(outcome),
            SelectOutcome::Ignored => OutcomeReport::of(OutcomeKind::Ignored),
        }
    }
}

/// Acknowledgment, sent once the command has been applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub status: AckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<OutcomeReport>,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

/// Grid state observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub episode_id: u32,
    pub seed: u32,
    pub grid: GridWire,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<CellRef>,
    pub score: u32,
    pub moves: u32,
    pub state_hash: StateHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_outcome: Option<OutcomeReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridWire {
    pub size: usize,
    /// Rows top to bottom; 0 = empty, 1-6 = color code
    pub cells: Vec<Vec<u8>>,
}

/// Deterministic state hash serialized as 16 lowercase hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateHash(pub u64);

impl Serialize for StateHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&format_args!("{:016x}", self.0))
    }
}

impl<'de> Deserialize<'de> for StateHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        u64::from_str_radix(s.trim(), 16)
            .map(StateHash)
            .map_err(|_| serde::de::Error::custom("invalid hex"))
    }
}

// ============== Message Parsing ==============

/// Parse a JSON message from a string
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "hello")]
        Hello(HelloMessage),
        #[serde(rename = "command")]
        Command(CommandMessage),
        #[serde(rename = "control")]
        Control(ControlMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Hello(m)) => Ok(ParsedMessage::Hello(m)),
        Ok(InboundMessage::Command(m)) => Ok(ParsedMessage::Command(m)),
        Ok(InboundMessage::Control(m)) => Ok(ParsedMessage::Control(m)),
        Err(e) => {
            // Unknown message type is not a hard parse error for the protocol.
            #[derive(Debug, Deserialize)]
            struct TypeOnly<'a> {
                #[serde(rename = "type")]
                #[serde(borrow)]
                msg_type: Option<&'a str>,
                seq: Option<u64>,
            }
            let head = serde_json::from_str::<TypeOnly>(json)?;
            let msg_type = head.msg_type.unwrap_or("unknown");
            if !matches!(msg_type, "hello" | "command" | "control") {
                return Ok(ParsedMessage::Unknown(UnknownMessage {
                    seq: head.seq.unwrap_or(0),
                }));
            }
            Err(e)
        }
    }
}

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Command(CommandMessage),
    Control(ControlMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

/// Best-effort `seq` recovery from a line that failed to parse
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

/// True when `version` shares the major component of [`PROTOCOL_VERSION`]
pub fn is_compatible_version(version: &str) -> bool {
    let major = |v: &str| v.trim().split('.').next().map(str::to_owned);
    major(version).is_some_and(|m| Some(m) == major(PROTOCOL_VERSION))
}

// ============== Utility Functions ==============

/// Create a hello message
pub fn create_hello(seq: u64, client_name: &str, protocol_version: &str) -> HelloMessage {
    HelloMessage {
        msg_type: HelloType::Hello,
        seq,
        ts: current_timestamp_ms(),
        client: ClientInfo {
            name: client_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        protocol_version: protocol_version.to_string(),
        requested: RequestedCapabilities {
            stream_observations: true,
            role: Some(RequestedRole::Auto),
        },
    }
}

/// Create a welcome message
pub fn create_welcome(
    seq: u64,
    protocol_version: &str,
    client_id: u64,
    role: AssignedRole,
    controller_id: Option<u64>,
) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: WelcomeType::Welcome,
        seq,
        ts: current_timestamp_ms(),
        protocol_version: protocol_version.to_string(),
        client_id,
        role,
        controller_id,
        game_id: GAME_ID.to_string(),
        capabilities: ServerCapabilities {
            formats: [CapabilityFormat::Json],
            command_modes: [
                CommandMode::Swap,
                CommandMode::Select,
                CommandMode::Restart,
                CommandMode::Observe,
            ],
            features: vec![
                CapabilityFeature::Selection,
                CapabilityFeature::CascadeReport,
                CapabilityFeature::StateHash,
                CapabilityFeature::Score,
                CapabilityFeature::Moves,
            ],
        },
    }
}

/// Create an acknowledgment for command `seq`
pub fn create_ack(seq: u64, outcome: Option<OutcomeReport>) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        status: AckStatus::Ok,
        outcome,
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Get current timestamp in milliseconds
pub(crate) fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hello() {
        let json = r#"{"type":"hello","seq":1,"ts":1234567890,"client":{"name":"test-bot","version":"1.0.0"},"protocol_version":"1.0.0","requested":{"stream_observations":true}}"#;

        match parse_message(json).unwrap() {
            ParsedMessage::Hello(msg) => {
                assert_eq!(msg.msg_type, HelloType::Hello);
                assert_eq!(msg.seq, 1);
                assert_eq!(msg.client.name, "test-bot");
                assert_eq!(msg.protocol_version, "1.0.0");
                assert!(msg.requested.stream_observations);
                assert_eq!(msg.requested.role, None);
            }
            _ => panic!("Expected Hello message"),
        }
    }

    #[test]
    fn test_parse_command_swap() {
        let json = r#"{"type":"command","seq":2,"ts":1234567900,"mode":"swap","swap":{"a":{"row":6,"col":2},"b":{"row":7,"col":2}}}"#;

        match parse_message(json).unwrap() {
            ParsedMessage::Command(msg) => {
                assert_eq!(msg.mode, CommandMode::Swap);
                let swap = msg.swap.unwrap();
                assert_eq!(Coord::from(swap.a), Coord::new(6, 2));
                assert_eq!(Coord::from(swap.b), Coord::new(7, 2));
                assert!(msg.select.is_none());
            }
            _ => panic!("Expected Command message"),
        }
    }

    #[test]
    fn test_parse_command_modes_case_insensitive() {
        let json = r#"{"type":"command","seq":3,"ts":1,"mode":"Restart"}"#;
        match parse_message(json).unwrap() {
            ParsedMessage::Command(msg) => assert_eq!(msg.mode, CommandMode::Restart),
            _ => panic!("Expected Command message"),
        }

        let bad = r#"{"type":"command","seq":3,"ts":1,"mode":"teleport"}"#;
        assert!(parse_message(bad).is_err());
    }

    #[test]
    fn test_parse_control() {
        let json = r#"{"type":"control","seq":3,"ts":1234567910,"action":"claim"}"#;

        match parse_message(json).unwrap() {
            ParsedMessage::Control(msg) => assert_eq!(msg.action, ControlAction::Claim),
            _ => panic!("Expected Control message"),
        }
    }

    #[test]
    fn test_parse_unknown_type_keeps_seq() {
        let json = r#"{"type":"ping","seq":9}"#;
        match parse_message(json).unwrap() {
            ParsedMessage::Unknown(m) => assert_eq!(m.seq, 9),
            _ => panic!("Expected Unknown message"),
        }
    }

    #[test]
    fn test_extract_seq_best_effort() {
        assert_eq!(extract_seq_best_effort(r#"{"seq": 42, "type":"#), Some(42));
        assert_eq!(extract_seq_best_effort(r#"{"type":"command"}"#), None);
    }

    #[test]
    fn test_version_compatibility() {
        assert!(is_compatible_version("1.0.0"));
        assert!(is_compatible_version("1.4"));
        assert!(!is_compatible_version("2.0.0"));
        assert!(!is_compatible_version(""));
    }

    #[test]
    fn test_create_welcome() {
        let welcome = create_welcome(1, PROTOCOL_VERSION, 7, AssignedRole::Controller, Some(7));
        assert_eq!(welcome.msg_type, WelcomeType::Welcome);
        assert_eq!(welcome.seq, 1);
        assert_eq!(welcome.client_id, 7);
        assert_eq!(welcome.role, AssignedRole::Controller);
        assert_eq!(welcome.controller_id, Some(7));
        assert_eq!(welcome.game_id, "color-blocks");

        let v = serde_json::to_value(&welcome).unwrap();
        assert_eq!(v["capabilities"]["command_modes"][0], "swap");
        assert_eq!(v["capabilities"]["features"][1], "cascade_report");
    }

    #[test]
    fn test_error_codes_serialize_snake_case() {
        let error = create_error(5, ErrorCode::NotController, "Only controller may send commands");
        let v = serde_json::to_value(&error).unwrap();
        assert_eq!(v["type"], "error");
        assert_eq!(v["code"], "not_controller");
    }

    #[test]
    fn test_rejected_swap_outcome() {
        let report = OutcomeReport::from(&SwapOutcome::Rejected(SwapRejection::NonAdjacent));
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["result"], "rejected");
        assert_eq!(v["reason"], "non_adjacent");
        assert!(v.get("cascade").is_none());
    }

    #[test]
    fn test_resolved_outcome_carries_cascade() {
        let outcome = SwapOutcome::Resolved(CascadeReport {
            total_removed: 6,
            passes: 2,
            score_delta: 60,
            removed_per_pass: vec![3, 3],
        });
        let ack = create_ack(4, Some(OutcomeReport::from(&outcome)));
        let json = serde_json::to_string(&ack).unwrap();
        let parsed: AckMessage = serde_json::from_str(&json).unwrap();
        let cascade = parsed.outcome.unwrap().cascade.unwrap();
        assert_eq!(cascade.removed_per_pass, vec![3, 3]);
        assert_eq!(cascade.score_delta, 60);
    }

    #[test]
    fn test_state_hash_hex() {
        let v = serde_json::to_value(StateHash(0xabc)).unwrap();
        assert_eq!(v, "0000000000000abc");
        let back: StateHash = serde_json::from_value(v).unwrap();
        assert_eq!(back, StateHash(0xabc));
    }
}
