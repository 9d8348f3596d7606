//! Adapter module - remote play via TCP socket with a JSON protocol
//!
//! This crate lets external clients (bots, test harnesses, front ends) drive a
//! Color Blocks session over a TCP socket connection.
//!
//! # Protocol Overview
//!
//! The adapter implements a **line-delimited JSON protocol** over TCP:
//!
//! 1. **Connection**: Client connects to TCP socket (default: 127.0.0.1:7878)
//! 2. **Handshake**: Client sends `hello`, server responds with `welcome`
//! 3. **Controller Assignment**: First client to hello becomes the controller
//! 4. **Observation Streaming**: Every applied command broadcasts the grid state
//! 5. **Commanding**: Controller sends swap / select / restart / observe commands
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **hello**: Initial handshake with client info and requested capabilities
//! - **command**: Swap two cells, pick a cell, restart, or ask for a snapshot
//! - **control**: Claim or release controller status
//!
//! ## Server → Client
//!
//! - **welcome**: Response to hello with role and capabilities
//! - **observation**: Grid snapshot, score, moves, selection, state hash
//! - **ack**: Command acknowledgment, carrying the outcome (`rejected` swaps included)
//! - **error**: Error response with code and message
//!
//! # Environment Variables
//!
//! - `COLOR_BLOCKS_HOST`: Bind address (default: "127.0.0.1")
//! - `COLOR_BLOCKS_PORT`: Port number (default: 7878, 0 picks a free port)
//! - `COLOR_BLOCKS_MAX_PENDING`: Bounded command queue depth (default: 16)
//! - `COLOR_BLOCKS_LOG_PATH`: Append every wire line to this JSONL file
//! - `COLOR_BLOCKS_DISABLED`: Set to "1" or "true" to disable the adapter entirely
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"ts":1700000000000,"client":{"name":"bot","version":"0.1.0"},"protocol_version":"1.0.0","requested":{"stream_observations":true}}
//! Server -> Client: {"type":"welcome","seq":1,"ts":1700000000001,"protocol_version":"1.0.0","client_id":1,"role":"controller",...}
//! Server -> Client: {"type":"observation","seq":1,"ts":1700000000002,"episode_id":0,"seed":42,"grid":{"size":8,"cells":[[...]]},...}
//! Client -> Server: {"type":"command","seq":2,"ts":1700000000100,"mode":"swap","swap":{"a":{"row":6,"col":2},"b":{"row":7,"col":2}}}
//! Server -> Client: {"type":"ack","seq":2,"ts":1700000000101,"status":"ok","outcome":{"result":"resolved","cascade":{...}}}
//! ```
//!
//! # Implementation
//!
//! - Uses **tokio** for async networking
//! - Multiple clients can connect (only one controller at a time)
//! - The engine lives in a [`session::Session`] on the caller's thread; the
//!   server only moves lines between sockets and bounded channels
//! - See [`protocol`] for message structure definitions
//! - See [`server`] for TCP server implementation

pub mod protocol;
pub mod runtime;
pub mod server;
pub mod session;

pub use color_blocks_core as core;
pub use color_blocks_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use runtime::{Adapter, ClientCommand, InboundCommand, InboundPayload, OutboundMessage};
pub use server::*;
pub use session::Session;
