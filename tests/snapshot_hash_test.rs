use color_blocks::core::{EngineConfig, GridEngine, GridSnapshot};
use color_blocks::types::Coord;

fn fnv1a64_bytes(bytes: impl Iterator<Item = u8>) -> u64 {
    // FNV-1a 64-bit.
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

#[test]
fn snapshot_into_sets_board_hash() {
    let mut engine = GridEngine::new(&EngineConfig {
        seed: 1,
        settle_on_start: true,
        ..EngineConfig::default()
    })
    .unwrap();

    let mut snap = GridSnapshot::default();
    engine.snapshot_into(&mut snap);
    assert_eq!(snap.board_hash, fnv1a64_bytes(snap.cells.iter().copied()));

    let codes: Vec<u8> = engine.grid().cells().iter().map(|c| c.code()).collect();
    assert_eq!(snap.cells, codes);

    // Seed 1 has a horizontal swap that resolves in the top row.
    let resolved = (0..8)
        .flat_map(|r| (0..7).map(move |c| (r, c)))
        .any(|(r, c)| {
            engine
                .attempt_swap(Coord::new(r, c), Coord::new(r, c + 1))
                .is_resolved()
        });
    assert!(resolved, "no horizontal swap resolved");

    let before = snap.board_hash;
    engine.snapshot_into(&mut snap);
    assert_eq!(snap.board_hash, fnv1a64_bytes(snap.cells.iter().copied()));
    assert_ne!(snap.board_hash, before);
    assert!(snap.score >= 30);
    assert_eq!(snap.score % 10, 0);
    assert_eq!(snap.moves, 1);
}

#[test]
fn snapshot_rows_follow_grid_rows() {
    let engine = GridEngine::new(&EngineConfig {
        grid_size: 5,
        seed: 8,
        ..EngineConfig::default()
    })
    .unwrap();
    let snap = engine.snapshot();
    let rows = snap.rows();
    assert_eq!(rows.len(), 5);
    for (r, row) in rows.iter().enumerate() {
        for (c, &code) in row.iter().enumerate() {
            assert_eq!(engine.cell_at(Coord::new(r, c)).map(|cell| cell.code()), Some(code));
        }
    }
}
