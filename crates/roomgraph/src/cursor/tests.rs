use super::*;
use crate::code::load;
use crate::graph::GraphCfg;
use crate::topology::{klein, twisted_ladder, Request, Topology};
use proptest::prelude::*;

fn id(number: usize) -> RoomId {
    RoomId(number - 1)
}

const GRID_3X3: &str = "1E2 2E3 4E5 5E6 7E8 8E9 1S4 2S5 3S6 4S7 5S8 6S9";

#[test]
fn step_follows_edges_and_reports_walls() {
    let g = load("1E2", GraphCfg::default()).unwrap();
    let c = Cursor::new(id(1));
    let east = c.step(&g, E).unwrap();
    assert_eq!(east, Cursor::new(id(2)));
    assert_eq!(c.step(&g, N), None);
    assert_eq!(east.step(&g, W), Some(c));
    assert_eq!(Cursor::new(id(9)).step(&g, E), None);
}

#[test]
fn flipped_edge_reflects_and_round_trip_undoes_it() {
    let g = load("1E2'", GraphCfg::default()).unwrap();
    let c = Cursor::new(id(1));
    let across = c.step(&g, E).unwrap();
    assert_eq!(across.room, id(2));
    assert!(!across.transform.is_identity());
    assert!(!across.transform.is_orientation_preserving());
    // The flip fixes W and E, so the way back is still the observer's West.
    assert_eq!(across.step(&g, W), Some(c));
}

#[test]
fn mobius_holonomy_has_order_two() {
    let g = Topology::MOBIUS.build(GraphCfg::default()).unwrap();
    let start = Cursor::new(id(1));
    let row_end = start.walk(&g, [E; 9]).unwrap();
    assert_eq!(row_end, Cursor::new(id(10)));
    let wrapped = row_end.step(&g, E).unwrap();
    assert_eq!(wrapped.room, id(21));
    assert_eq!(wrapped.transform, Frame::FLIP_VERTICAL);
    // The observer's north is the room's south now: row 3 has no south edge.
    assert_eq!(wrapped.step(&g, N), None);
    assert_eq!(wrapped.step(&g, S).map(|c| c.room), Some(id(11)));
    assert_eq!(start.walk(&g, [E; 20]), Some(start));
}

#[test]
fn rotate_turns_in_place() {
    let g = load(GRID_3X3, GraphCfg::default()).unwrap();
    let mut c = Cursor::new(id(5));
    c.rotate(Frame::ROTATE_CW);
    assert_eq!(c.room, id(5));
    // Facing turned clockwise: the observer's north is the room's east.
    assert_eq!(c.step(&g, N).map(|n| n.room), Some(id(6)));
    c.rotate(Frame::ROTATE_CCW);
    assert_eq!(c, Cursor::new(id(5)));
}

#[test]
fn grid_is_flat_and_diagonal_finds_corner() {
    let g = load(GRID_3X3, GraphCfg::default()).unwrap();
    let c = Cursor::new(id(5));
    for (a, b) in Neighborhood::CORNERS {
        assert_eq!(c.is_flat(&g, a, b), Some(true));
    }
    assert_eq!(c.is_flat(&g, E, W), None);
    assert_eq!(c.is_flat(&g, N, N), None);
    assert_eq!(c.diagonal(&g, E, N).map(|d| d.room), Some(id(3)));
    // Missing path around a corner of the grid.
    assert_eq!(Cursor::new(id(1)).is_flat(&g, W, N), None);
    assert!(non_flat_corners(&g).is_empty());
}

#[test]
fn klein_is_flat_everywhere() {
    let g = Topology::KLEIN.build(GraphCfg::default()).unwrap();
    for room in g.ids() {
        for frame in Frame::all() {
            let mut c = Cursor::new(room);
            c.rotate(frame);
            for (a, b) in Neighborhood::CORNERS {
                assert_eq!(c.is_flat(&g, a, b), Some(true), "{room} {frame}");
            }
        }
    }
    assert!(non_flat_corners(&g).is_empty());
}

#[test]
fn one_unflipped_wrap_breaks_klein_flatness() {
    let mut bp = klein(4, 4).unwrap();
    let last = bp.requests.len() - 1;
    let Request::Connect(c) = &mut bp.requests[last] else {
        panic!("closing edge should be a derived connection");
    };
    c.flip = false;
    let g = bp.build(GraphCfg::default()).unwrap();
    assert!(g.is_consistent());
    let kinks = non_flat_corners(&g);
    assert!(!kinks.is_empty());
    assert!(kinks.contains(&Kink {
        room: id(12),
        a: E,
        b: S,
    }));
    let cur = Cursor::new(id(12));
    assert_eq!(cur.is_flat(&g, E, S), Some(false));
    assert_eq!(cur.diagonal(&g, E, S), None);
}

#[test]
fn neighborhood_shows_corners_only_through_visited_sides() {
    let mut g = load(GRID_3X3, GraphCfg::default()).unwrap();
    let c = Cursor::new(id(5));
    let view = c.neighborhood(&g);
    assert_eq!(view.center, c);
    assert!(view.sides.iter().all(Option::is_some));
    assert!(view.corners.iter().all(Option::is_none));

    g.visit_all();
    let view = c.neighborhood(&g);
    let rooms = view.corners.map(|k| k.map(|k| k.room));
    assert_eq!(rooms, [Some(id(3)), Some(id(1)), Some(id(9)), Some(id(7))]);
    assert_eq!(view.at(Point::new(1, -1)).map(|k| k.room), Some(id(3)));
    assert_eq!(view.at(Point::new(0, 1)).map(|k| k.room), Some(id(8)));
    assert_eq!(view.at(Point::zeros()), Some(c));
    assert_eq!(view.at(Point::new(2, 0)), None);
}

#[test]
fn neighborhood_reaches_corner_through_lone_side() {
    let mut g = load("1E2 2N3", GraphCfg::default()).unwrap();
    let c = Cursor::new(id(1));
    assert_eq!(c.neighborhood(&g).corners[0], None);
    g.mark_visited(id(2));
    let view = c.neighborhood(&g);
    assert_eq!(view.corners[0].map(|k| k.room), Some(id(3)));
    assert_eq!(view.sides[N.index()], None);
}

#[test]
fn orientability_follows_reflecting_loops() {
    let grid = load(GRID_3X3, GraphCfg::default()).unwrap();
    assert!(is_orientable(&grid));
    for topo in [Topology::MOBIUS, Topology::KLEIN, Topology::PROJECTIVE] {
        let g = topo.build(GraphCfg::default()).unwrap();
        assert!(!is_orientable(&g), "{topo:?}");
    }
    let ladder = twisted_ladder(4).unwrap().build(GraphCfg::default()).unwrap();
    assert!(is_orientable(&ladder));
}

#[test]
fn visited_flags_go_through_the_graph() {
    let mut g = load("1E2", GraphCfg::default()).unwrap();
    let c = Cursor::new(id(2));
    assert!(!c.visited(&g));
    c.mark_visited(&mut g);
    assert!(c.visited(&g));
    assert!(!Cursor::new(id(1)).visited(&g));
}

fn dir_strategy() -> impl Strategy<Value = Dir> {
    (0usize..4).prop_map(Dir::from_index)
}

proptest! {
    #[test]
    fn klein_walks_stay_flat(moves in prop::collection::vec(dir_strategy(), 0..60)) {
        let g = Topology::KLEIN.build(GraphCfg::default()).unwrap();
        let mut c = Cursor::new(id(1));
        for d in moves {
            c = c.step(&g, d).unwrap();
            prop_assert!(Frame::from_map(c.transform.map()).is_some());
            for (a, b) in Neighborhood::CORNERS {
                prop_assert_eq!(c.is_flat(&g, a, b), Some(true));
            }
        }
    }

    #[test]
    fn steps_are_undone_by_the_opposite_step(
        moves in prop::collection::vec(dir_strategy(), 0..40),
        turns in prop::collection::vec(0usize..8, 0..40),
    ) {
        let g = Topology::PROJECTIVE.build(GraphCfg::default()).unwrap();
        let mut c = Cursor::new(id(6));
        for (d, t) in moves.into_iter().zip(turns.into_iter().chain(std::iter::repeat(0))) {
            c.rotate(Frame::all()[t]);
            let next = c.step(&g, d).unwrap();
            prop_assert_eq!(next.step(&g, d.opposite()), Some(c));
            c = next;
        }
    }
}
