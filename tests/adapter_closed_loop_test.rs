use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::time::{Duration, Instant};

use color_blocks::adapter::protocol::{create_hello, PROTOCOL_VERSION};
use color_blocks::adapter::server::ServerConfig;
use color_blocks::adapter::{Adapter, InboundCommand, InboundPayload, Session};
use color_blocks::core::EngineConfig;

fn local_config(port: u16) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port,
        ..ServerConfig::default()
    }
}

fn wait_for_command(adapter: &mut Adapter) -> InboundCommand {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        if let Some(cmd) = adapter.try_recv() {
            return cmd;
        }
        assert!(Instant::now() < deadline, "no command within 2s");
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn read_json(reader: &mut BufReader<TcpStream>) -> serde_json::Value {
    let mut line = String::new();
    reader.read_line(&mut line).expect("read line");
    serde_json::from_str(line.trim_end()).expect("valid json")
}

#[test]
fn adapter_start_fails_when_port_in_use() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral port");
    let port = listener.local_addr().unwrap().port();

    assert!(Adapter::start(local_config(port)).is_err());
}

#[test]
fn adapter_closed_loop_drives_session() {
    let mut adapter = Adapter::start(local_config(0)).expect("adapter start");
    let mut session = Session::new(&EngineConfig {
        seed: 7,
        settle_on_start: true,
        ..EngineConfig::default()
    })
    .unwrap();

    let stream = TcpStream::connect(adapter.local_addr()).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(2)))
        .unwrap();
    let mut writer = stream.try_clone().unwrap();
    let mut reader = BufReader::new(stream);

    let hello = serde_json::to_string(&create_hello(1, "closed-loop", PROTOCOL_VERSION)).unwrap();
    writeln!(writer, "{hello}").unwrap();

    let welcome = read_json(&mut reader);
    assert_eq!(welcome["type"], "welcome");
    assert_eq!(welcome["role"], "controller");

    // Handshake queues a snapshot request for the streaming client.
    let cmd = wait_for_command(&mut adapter);
    assert_eq!(cmd.payload, InboundPayload::SnapshotRequest);
    for msg in session.apply(cmd) {
        adapter.send(msg);
    }
    let obs = read_json(&mut reader);
    assert_eq!(obs["type"], "observation");
    assert_eq!(obs["seed"], 7);
    assert_eq!(obs["episode_id"], 0);

    writeln!(
        writer,
        r#"{{"type":"command","seq":2,"ts":1,"mode":"restart"}}"#
    )
    .unwrap();
    let cmd = wait_for_command(&mut adapter);
    assert_eq!(cmd.seq, 2);
    for msg in session.apply(cmd) {
        adapter.send(msg);
    }

    let ack = read_json(&mut reader);
    assert_eq!(ack["type"], "ack");
    assert_eq!(ack["outcome"]["result"], "restarted");
    let obs = read_json(&mut reader);
    assert_eq!(obs["episode_id"], 1);
    assert_eq!(obs["score"], 0);
    assert_eq!(session.episode_id(), 1);
}
