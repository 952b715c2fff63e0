//! Walk once around the Möbius strip and print the observer's frame per step.
//!
//! Purpose
//! - Show holonomy directly: after one lap the frame is a reflection, after two
//!   laps it is the identity again.
//!
//! Usage
//! - `cargo run -p roomgraph --example mobius_walk -- [WIDTH HEIGHT]`

use roomgraph::api::{Cursor, Dir, GraphCfg, RoomId, Topology};

fn main() {
    let mut args = std::env::args().skip(1).map(|a| a.parse::<usize>());
    let width = args.next().and_then(Result::ok).unwrap_or(10);
    let height = args.next().and_then(Result::ok).unwrap_or(3);
    let graph = Topology::Mobius { width, height }
        .build(GraphCfg::default())
        .expect("mobius strip builds in strict mode");

    let mut cur = Cursor::new(RoomId(0));
    for step in 1..=2 * width {
        cur = cur.step(&graph, Dir::E).expect("every room has an east edge");
        let name = cur.transform.name().unwrap_or("?");
        println!("step={step:>3} room={:>3} frame={name}", cur.room.number());
    }
    assert_eq!(cur, Cursor::new(RoomId(0)), "two laps return to the start");
}
