use super::*;
use proptest::prelude::*;

fn any_frame() -> impl Strategy<Value = Frame> {
    prop::sample::select(Frame::all().to_vec())
}

fn det(m: &Matrix2<i32>) -> i32 {
    m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)]
}

#[test]
fn named_constants_match_direction_tables() {
    assert_eq!(Frame::FLIP_HORIZONTAL.map(), [E, N, W, S]);
    assert_eq!(Frame::FLIP_VERTICAL.map(), [W, S, E, N]);
    assert_eq!(Frame::ROTATE_CW.map(), [N, E, S, W]);
    assert_eq!(Frame::ROTATE_CCW.map(), [S, W, N, E]);
    assert_eq!(Frame::ROTATE_180.map(), [E, S, W, N]);
    assert_eq!(Frame::default(), Frame::IDENTITY);
}

#[test]
fn group_has_eight_distinct_symmetries() {
    let all = Frame::all();
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
        assert!(Frame::from_map(a.map()).is_some());
    }
    let rotations = all.iter().filter(|f| f.is_orientation_preserving()).count();
    assert_eq!(rotations, 4);
}

#[test]
fn composition_is_closed_over_named_constants() {
    let all = Frame::all();
    for a in all {
        for b in all {
            let c = a.compose(&b);
            assert!(all.contains(&c), "{a} ∘ {b} = {c} escaped the group");
        }
    }
}

#[test]
fn compose_applies_right_operand_first() {
    // W -(flipV)-> W -(rotCW)-> N, whereas W -(rotCW)-> N -(flipV)-> S.
    let a = Frame::ROTATE_CW.compose(&Frame::FLIP_VERTICAL);
    assert_eq!(a.apply(W), N);
    let b = Frame::FLIP_VERTICAL.compose(&Frame::ROTATE_CW);
    assert_eq!(b.apply(W), S);
    assert_eq!(Frame::ROTATE_CW * Frame::ROTATE_CW, Frame::ROTATE_180);
    assert_eq!(Frame::FLIP_HORIZONTAL * Frame::FLIP_VERTICAL, Frame::ROTATE_180);
    assert_eq!(Frame::ROTATE_CW.inverse(), Frame::ROTATE_CCW);
}

#[test]
fn from_map_rejects_non_symmetries() {
    // Swapping only two adjacent directions is a permutation but not a symmetry.
    assert!(Frame::from_map([N, W, E, S]).is_none());
    // Not even a bijection.
    assert!(Frame::from_map([W, W, E, S]).is_none());
    assert_eq!(Frame::from_map([E, N, W, S]), Some(Frame::FLIP_HORIZONTAL));
}

#[test]
fn anchored_sends_anchor_and_respects_reflection() {
    for from in Dir::ALL {
        for to in Dir::ALL {
            for reflect in [false, true] {
                let f = Frame::anchored(from, to, reflect);
                assert_eq!(f.apply(from), to);
                assert_eq!(f.is_orientation_preserving(), !reflect);
                assert!(Frame::all().contains(&f));
            }
        }
    }
}

#[test]
fn canvas_transform_and_display() {
    assert_eq!(Frame::IDENTITY.canvas_transform(), [1, 0, 0, 1]);
    assert_eq!(Frame::FLIP_HORIZONTAL.canvas_transform(), [-1, 0, 0, 1]);
    assert_eq!(Frame::ROTATE_CW.canvas_transform(), [0, 1, -1, 0]);
    assert_eq!(Frame::FLIP_HORIZONTAL.to_string(), "[E,N,W,S]");
    assert_eq!(Frame::ROTATE_180.name(), Some("rotate_180"));
}

proptest! {
    #[test]
    fn inverse_is_two_sided(p in any_frame()) {
        prop_assert_eq!(p.compose(&p.inverse()), Frame::IDENTITY);
        prop_assert_eq!(p.inverse().compose(&p), Frame::IDENTITY);
        prop_assert_eq!(p.compose(&Frame::IDENTITY), p);
        prop_assert_eq!(Frame::IDENTITY.compose(&p), p);
    }

    #[test]
    fn composition_is_associative(a in any_frame(), b in any_frame(), c in any_frame()) {
        prop_assert_eq!((a * b) * c, a * (b * c));
    }

    #[test]
    fn words_stay_symmetries(word in prop::collection::vec(any_frame(), 0..24)) {
        let acc = word.iter().fold(Frame::IDENTITY, |acc, f| acc.compose(f));
        prop_assert!(Frame::from_map(acc.map()).is_some());
        let flips = word.iter().filter(|f| !f.is_orientation_preserving()).count();
        prop_assert_eq!(acc.is_orientation_preserving(), flips % 2 == 0);
    }

    #[test]
    fn matrix_is_a_homomorphism(a in any_frame(), b in any_frame()) {
        prop_assert_eq!((a * b).to_matrix(), a.to_matrix() * b.to_matrix());
        let expected = if a.is_orientation_preserving() { 1 } else { -1 };
        prop_assert_eq!(det(&a.to_matrix()), expected);
        for d in Dir::ALL {
            prop_assert_eq!(a.to_matrix() * d.to_point(), a.apply(d).to_point());
        }
    }
}
