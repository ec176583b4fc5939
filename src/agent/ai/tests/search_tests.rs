// Property tests for the negamax search
//
// Every variant is checked against a reference minimax written directly on
// the synthetic trees: with and without pruning, with and without the table,
// with and without move ordering.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::agent::ai::negamax::Searcher;
use crate::agent::ai::search::{search_best_action, SearchConfig};
use crate::agent::ai::transposition_table::TranspositionTable;
use crate::agent::ai::Score;
use crate::game::{GameState, GameTree, GameTreeBuilder, Layout, TreeState, TREE_PLAYERS};

fn leaf_value(state: &TreeState) -> Score {
    state.static_value()
}

/// Textbook minimax: no window, no table, no extension.
fn reference_negamax(state: &TreeState, depth: u32) -> Score {
    if depth == 0 || state.is_done() {
        return state.static_value();
    }
    state
        .children()
        .iter()
        .map(|child| -reference_negamax(child, depth - 1))
        .fold(Score::NEG_INFINITY, Score::max)
}

/// First child reaching the reference value.
fn reference_choice(state: &TreeState, depth: u32) -> usize {
    let values: Vec<Score> = state
        .children()
        .iter()
        .map(|child| -reference_negamax(child, depth - 1))
        .collect();
    let best = values.iter().copied().fold(Score::NEG_INFINITY, Score::max);
    values.iter().position(|&v| v == best).unwrap()
}

fn variants(depth: u32) -> Vec<(&'static str, SearchConfig)> {
    let base = SearchConfig {
        use_quiescence: false,
        ..SearchConfig::with_depth(depth)
    };
    vec![
        ("plain negamax", SearchConfig::plain_negamax(depth)),
        (
            "alpha-beta",
            SearchConfig {
                use_transposition_table: false,
                ..base.clone()
            },
        ),
        ("alpha-beta + table", base.clone()),
        (
            "alpha-beta + table + ordering",
            SearchConfig {
                order_moves: true,
                ..base
            },
        ),
    ]
}

fn root_value(root: &TreeState, config: &SearchConfig) -> Score {
    let mut tt = TranspositionTable::new();
    let mut searcher = Searcher::new(config, &mut tt, &leaf_value);
    searcher.search(root, config.search_depth, Score::NEG_INFINITY, Score::INFINITY, root)
}

/// Heap's algorithm, calling `visit` once per permutation of `items`.
fn for_each_permutation(items: &mut [f64], visit: &mut impl FnMut(&[f64])) {
    let n = items.len();
    let mut counters = vec![0; n];
    visit(items);
    let mut i = 0;
    while i < n {
        if counters[i] < i {
            if i % 2 == 0 {
                items.swap(0, i);
            } else {
                items.swap(counters[i], i);
            }
            visit(items);
            counters[i] += 1;
            i = 0;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
}

#[test]
fn test_heap_permutation_count() {
    let mut items = [1.0, 2.0, 3.0, 4.0];
    let mut seen = std::collections::HashSet::new();
    for_each_permutation(&mut items, &mut |p| {
        seen.insert(p.iter().map(|&v| v as i32).collect::<Vec<_>>());
    });
    assert_eq!(seen.len(), 24);
}

#[test]
fn test_alpha_beta_matches_minimax_on_every_leaf_order() {
    let mut leaves = [3.0, -1.0, 7.0, 0.0, 5.0, -6.0, 2.0, 9.0];
    let configs = variants(3);

    for_each_permutation(&mut leaves, &mut |values| {
        let root = GameTree::uniform(2, 3, values);
        let expected = reference_negamax(&root, 3);
        for (name, config) in &configs {
            assert_eq!(root_value(&root, config), expected, "{name} on leaves {values:?}");
        }
    });
}

#[test]
fn test_variants_match_minimax_on_random_trees() {
    for seed in 0..40 {
        let mut rng = StdRng::seed_from_u64(seed);
        let depth = 2 + (seed % 3) as u32;
        let root = GameTree::random(&mut rng, depth, 4);
        let expected = reference_negamax(&root, depth);
        let expected_choice = reference_choice(&root, depth);

        for (name, config) in variants(depth) {
            let mut tt = TranspositionTable::new();
            let result = search_best_action(&root, &config, &mut tt, &leaf_value);
            assert_eq!(result.score, expected, "{name}, seed {seed}");
            assert_eq!(result.action_score, expected, "{name}, seed {seed}");

            let choice = result.best_action.map(|a| a.ordinal());
            let chosen = choice.and_then(|ordinal| root.child(ordinal)).unwrap();
            assert_eq!(-reference_negamax(&chosen, depth - 1), expected, "{name}, seed {seed}");
            // Equally good moves are only told apart by expansion order.
            if !config.order_moves {
                assert_eq!(choice, Some(expected_choice), "{name}, seed {seed}");
            }
        }
    }
}

#[test]
fn test_shuffled_leaves_prune_but_agree() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut values: Vec<f64> = (0..81).map(|v| v as f64 - 40.0).collect();

    for _ in 0..20 {
        values.shuffle(&mut rng);
        let root = GameTree::uniform(3, 4, &values);
        let expected = reference_negamax(&root, 4);

        let mut full = TranspositionTable::new();
        let plain_config = SearchConfig::plain_negamax(4);
        let plain = search_best_action(&root, &plain_config, &mut full, &leaf_value);
        let pruned_config = SearchConfig {
            use_quiescence: false,
            use_transposition_table: false,
            ..SearchConfig::with_depth(4)
        };
        let pruned = search_best_action(&root, &pruned_config, &mut full, &leaf_value);

        assert_eq!(plain.score, expected);
        assert_eq!(pruned.score, expected);
        assert!(pruned.stats.nodes <= plain.stats.nodes);
        assert_eq!(plain.stats.cutoffs, 0);
    }
}

#[test]
fn test_negamax_consistency_with_children() {
    // The root value is the best negated child value searched one ply less.
    for seed in 100..120 {
        let mut rng = StdRng::seed_from_u64(seed);
        let root = GameTree::random(&mut rng, 3, 3);
        let config = SearchConfig::plain_negamax(3);

        let best_child = root
            .children()
            .iter()
            .map(|child| {
                let mut tt = TranspositionTable::new();
                let mut searcher = Searcher::new(&config, &mut tt, &leaf_value);
                -searcher.search(child, 2, Score::NEG_INFINITY, Score::INFINITY, &root)
            })
            .fold(Score::NEG_INFINITY, Score::max);

        assert_eq!(root_value(&root, &config), best_child, "seed {seed}");
    }
}

/// Search `root` with a window and a result expressed from the first
/// player's point of view, whoever is to move.
fn first_player_search(
    root: &TreeState,
    config: &SearchConfig,
    alpha: Score,
    beta: Score,
) -> Score {
    let mut tt = TranspositionTable::new();
    let mut searcher = Searcher::new(config, &mut tt, &leaf_value);
    let depth = config.search_depth;
    if root.next_player() == TREE_PLAYERS[0] {
        searcher.search(root, depth, alpha, beta, root)
    } else {
        -searcher.search(root, depth, -beta, -alpha, root)
    }
}

fn first_player_value(state: &TreeState) -> Score {
    if state.next_player() == TREE_PLAYERS[0] {
        state.static_value()
    } else {
        -state.static_value()
    }
}

/// Small game with a transposition, a finished line and marbles on the board.
fn mixed_game() -> TreeState {
    let layout = Layout::standard()
        .with_pieces(TREE_PLAYERS[0], &[(8, 4), (6, 4)])
        .with_pieces(TREE_PLAYERS[1], &[(10, 4)]);
    let mut builder = GameTreeBuilder::with_layout(layout);
    let a = builder.add_child(0);
    let b = builder.add_child(0);
    let c = builder.add_child(0);
    let a1 = builder.add_leaf(a, 4.0);
    builder.add_leaf(a, -2.0);
    let b1 = builder.add_leaf(b, 4.0);
    builder.set_key(b1, a1 as u64);
    let won = builder.add_child(b);
    builder.finish(won, [6.0, 1.0]);
    builder.layout_mut(c).shift((10, 4), (12, 4));
    builder.add_leaf(c, 3.0);
    builder.add_leaf(c, -7.0);
    builder.build()
}

#[test]
fn test_negamax_symmetry_under_role_swap() {
    let windows = [
        (Score::NEG_INFINITY, Score::INFINITY),
        (-3.0, 3.0),
        (-20.0, -2.0),
        (2.0, 20.0),
        (0.0, 1.0),
        (-1.0, 0.0),
    ];
    let mut games: Vec<(TreeState, u32)> = (0..12u64)
        .map(|seed| {
            let depth = 2 + (seed % 3) as u32;
            (GameTree::random(&mut StdRng::seed_from_u64(seed), depth, 3), depth)
        })
        .collect();
    games.push((mixed_game(), 2));

    for (index, (root, depth)) in games.iter().enumerate() {
        let swapped = root.with_roles_swapped();
        assert_ne!(swapped.next_player(), root.next_player());
        assert_eq!(first_player_value(&swapped), -first_player_value(root));

        for config in [
            SearchConfig::with_depth(*depth),
            SearchConfig {
                order_moves: true,
                ..SearchConfig::with_depth(*depth)
            },
        ] {
            assert!(config.use_transposition_table);
            for &(alpha, beta) in &windows {
                let original = first_player_search(root, &config, alpha, beta);
                let mirrored = first_player_search(&swapped, &config, -beta, -alpha);
                assert_eq!(mirrored, -original, "game {index}, window [{alpha}, {beta}]");
            }
        }
    }
}

#[test]
fn test_table_entry_read_by_the_other_player() {
    // One position, stored with the first player to move, then read with
    // the second player to move: the cached score changes sign.
    let mut builder = GameTreeBuilder::new();
    builder.set_value(0, 3.0);
    let first = builder.build();
    let mut builder = GameTreeBuilder::new();
    builder.set_value(0, -3.0);
    let second = builder.build().with_roles_swapped();
    assert_eq!(first.key(), second.key());
    assert_eq!(first_player_value(&first), first_player_value(&second));

    let config = SearchConfig::with_depth(0);
    let mut tt = TranspositionTable::new();
    let mut searcher = Searcher::new(&config, &mut tt, &leaf_value);
    let stored = searcher.search(&first, 0, Score::NEG_INFINITY, Score::INFINITY, &first);
    let cached = searcher.search(&second, 0, Score::NEG_INFINITY, Score::INFINITY, &second);
    assert_eq!(searcher.stats().table_hits, 1);
    assert_eq!(stored, 3.0);
    assert_eq!(cached, -3.0);
    assert_eq!(cached, leaf_value(&second));
}

#[test]
fn test_textbook_tree() {
    let root = GameTree::uniform(3, 2, &[3.0, 12.0, 8.0, 2.0, 4.0, 6.0, 14.0, 5.0, 2.0]);
    let mut tt = TranspositionTable::new();
    let result = search_best_action(&root, &SearchConfig::with_depth(2), &mut tt, &leaf_value);

    assert_eq!(result.score, 3.0);
    assert_eq!(result.best_action.map(|a| a.ordinal()), Some(0));
    assert_eq!(result.stats.cutoffs, 1);
}

/// Root with two moves reaching the same position, which has two replies.
fn diamond() -> TreeState {
    let mut builder = GameTreeBuilder::new();
    let a = builder.add_child(0);
    let b = builder.add_child(0);
    let a1 = builder.add_leaf(a, 4.0);
    let a2 = builder.add_leaf(a, -3.0);
    let b1 = builder.add_leaf(b, 4.0);
    let b2 = builder.add_leaf(b, -3.0);
    builder.set_key(b, a as u64);
    builder.set_key(b1, a1 as u64);
    builder.set_key(b2, a2 as u64);
    builder.build()
}

#[test]
fn test_transposition_gives_same_value() {
    let root = diamond();
    let expected = reference_negamax(&root, 2);

    for (name, config) in variants(2) {
        let mut tt = TranspositionTable::new();
        let result = search_best_action(&root, &config, &mut tt, &leaf_value);
        assert_eq!(result.score, expected, "{name}");
        // Both moves are worth the same: the first one is kept.
        assert_eq!(result.best_action.map(|a| a.ordinal()), Some(0), "{name}");
    }
}

#[test]
fn test_table_reused_across_decisions() {
    let mut rng = StdRng::seed_from_u64(3);
    let root = GameTree::random(&mut rng, 4, 3);
    let config = SearchConfig::with_depth(4);
    let mut tt = TranspositionTable::new();

    let first = search_best_action(&root, &config, &mut tt, &leaf_value);
    let size = tt.len();
    let second = search_best_action(&root, &config, &mut tt, &leaf_value);

    assert_eq!(first.score, second.score);
    assert_eq!(
        first.best_action.map(|a| a.ordinal()),
        second.best_action.map(|a| a.ordinal())
    );
    assert_eq!(second.stats.nodes, 1);
    assert_eq!(tt.len(), size);
}

#[test]
fn test_shallow_entry_not_trusted_for_deeper_search() {
    let mut rng = StdRng::seed_from_u64(5);
    let root = GameTree::random(&mut rng, 3, 3);
    let mut tt = TranspositionTable::new();

    search_best_action(&root, &SearchConfig::plain_negamax(1), &mut tt, &leaf_value);
    assert!(tt.is_empty(), "table disabled");

    let shallow = SearchConfig {
        use_quiescence: false,
        ..SearchConfig::with_depth(1)
    };
    let deep = SearchConfig {
        use_quiescence: false,
        ..SearchConfig::with_depth(3)
    };
    search_best_action(&root, &shallow, &mut tt, &leaf_value);
    let result = search_best_action(&root, &deep, &mut tt, &leaf_value);

    assert_eq!(result.score, reference_negamax(&root, 3));
    assert!(result.stats.nodes > 1);
}

#[test]
fn test_near_end_positions_do_not_share_entries() {
    // Same identity searched with and without reaching the move limit.
    let mut builder = GameTreeBuilder::new();
    builder.max_step(2);
    let a = builder.add_child(0);
    builder.add_leaf(a, 1.0);
    let root = builder.build();
    let child = root.child(0).unwrap();

    let config = SearchConfig::with_depth(1);
    let mut tt = TranspositionTable::new();
    search_best_action(&root, &config, &mut tt, &leaf_value);
    // Step 1 + depth 0 stays within the limit, step 1 + depth 2 does not.
    assert!(tt.lookup(&child, 0).is_some());
    assert_eq!(tt.lookup(&child, 2), None);
    assert!(child.step() + 2 > child.max_step());
}
