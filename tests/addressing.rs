// Integration tests (native) for tile addressing and session state.
// Pure logic only, so they run under plain `cargo test` on the host.

use std::collections::HashSet;
use std::rc::Rc;

use gridy::feeds::{FeedEvent, FeedKind, FeedMessage};
use gridy::model::{GameAction, GameState, path_offset};
use gridy::state::{MinedState, Navigator, canonical_location};
use gridy::{
    FAN_OUT, Layer, TileId, TileRange, compute_display_range, compute_leaf_range_for_path,
    resolve_leaf_tile_id,
};

#[test]
fn display_width_matches_layer_for_every_depth() {
    let mut path = Vec::new();
    for depth in 0..=3 {
        let layer = Layer::from_depth(depth).unwrap();
        let r = compute_display_range(&path, layer, Some(17)).unwrap();
        assert_eq!(r.end - r.start + 1, FAN_OUT[depth]);
        path.push(depth * 11);
    }
}

#[test]
fn siblings_are_disjoint_and_ordered() {
    for path in [vec![], vec![3], vec![3, 41]] {
        let layer = Layer::from_depth(path.len()).unwrap();
        let ranges: Vec<TileRange> = (0..100)
            .map(|i| compute_display_range(&path, layer, Some(i)).unwrap())
            .collect();
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end + 1, pair[1].start);
        }
    }
}

#[test]
fn child_ranges_nest_inside_their_parent() {
    let parent = compute_display_range(&[], Layer::One, Some(5)).unwrap();
    let first = compute_display_range(&[5], Layer::Two, Some(0)).unwrap();
    let last = compute_display_range(&[5], Layer::Two, Some(99)).unwrap();
    assert_eq!(first.start, parent.start);
    assert_eq!(last.end, parent.end);
}

#[test]
fn worked_example() {
    assert_eq!(
        compute_display_range(&[], Layer::One, Some(0)),
        Some(TileRange { start: 1, end: 200_000 })
    );
    assert_eq!(
        compute_display_range(&[0], Layer::Two, Some(0)),
        Some(TileRange { start: 1, end: 2_000 })
    );
    assert_eq!(path_offset(&[2, 3, 1]), 406_020);
    assert_eq!(
        compute_leaf_range_for_path(&[2, 3, 1]),
        Some(TileRange { start: 406_021, end: 406_040 })
    );
    assert_eq!(resolve_leaf_tile_id(&[2, 3, 1], 5), Some(TileId(406_026)));
}

#[test]
fn leaf_ids_are_unique_across_sampled_paths() {
    let mut seen = HashSet::new();
    for a in [0, 1, 50, 99] {
        for b in [0, 1, 50, 99] {
            for c in 0..100 {
                for leaf in 0..20 {
                    let id = resolve_leaf_tile_id(&[a, b, c], leaf).unwrap();
                    assert!(seen.insert(id), "duplicate id {} for {:?}", id, (a, b, c, leaf));
                }
            }
        }
    }
    // Highest address on the board.
    assert_eq!(resolve_leaf_tile_id(&[99, 99, 99], 19), Some(TileId(20_000_000)));
}

#[test]
fn advance_and_retreat_are_inverse() {
    let mut nav = Navigator::default();
    for idx in [12, 34] {
        assert!(nav.advance(idx));
    }
    let snapshot = nav.clone();
    assert!(nav.advance(56));
    assert!(nav.retreat());
    assert_eq!(nav, snapshot);
    assert_eq!(nav.layer(), Layer::Three);
}

#[test]
fn hex_and_decimal_locations_agree() {
    assert_eq!(canonical_location("0x1a").unwrap(), canonical_location("26").unwrap());
    let mut mined = MinedState::default();
    assert!(!mined.is_already_mined(TileId(26)));
    mined.record("0x1a", "Diamond").unwrap();
    assert!(mined.is_already_mined(TileId(26)));
}

#[test]
fn feeds_flow_through_one_reducer_in_any_order() {
    let frames = [
        r#"{"type":"tileData","data":[{"location":"0x6320a","mine_type":"Bomb"}]}"#,
        r#"{"type":"stats","data":{"totalPlayers":1,"totalBots":2,"botsAlive":1,
            "botsDead":1,"diamondsMined":0,"leaderboard":[]}}"#,
        "{broken",
        r#"{"type":"transactions","data":[{"event_name":"BombFound","data":["0x0abc"]}]}"#,
    ];
    let apply = |order: &[usize]| {
        let mut state = Rc::new(GameState::default());
        for &i in order {
            let event = FeedEvent::from_frame(FeedKind::Tiles, frames[i]);
            state = yew::Reducible::reduce(state, GameAction::Feed(event));
        }
        state
    };
    let a = apply(&[0, 1, 2, 3]);
    let b = apply(&[3, 2, 1, 0]);
    assert_eq!(a, b);
    assert!(a.mined.is_already_mined(TileId(406_026)));
    assert_eq!(a.feed.stats.total_bots, 2);
    assert_eq!(a.feed.transactions.len(), 1);
    assert_eq!(a.feed.skipped, 1);
    assert!(matches!(
        FeedEvent::from_frame(FeedKind::Stats, frames[1]),
        FeedEvent::Message(FeedMessage::Stats(_))
    ));
}
