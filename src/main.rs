//! Search variant comparison on seeded random game trees.
//!
//! Every variant searches the same tree; the table shows how much work each
//! one does and checks that they agree on the root value.

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use abalone_agent::agent::ai::{search_best_action, Score, SearchConfig, TranspositionTable};
use abalone_agent::game::{GameTree, TreeState};

#[derive(Parser, Debug)]
#[command(about = "Compare search variants on a seeded random game tree")]
struct Args {
    /// Plies below the root (at least 1)
    #[arg(long, short = 'd', default_value_t = 5)]
    depth: u32,

    /// Upper bound on the children of each interior node (at least 1)
    #[arg(long, short = 'b', default_value_t = 6)]
    max_branching: usize,

    /// Random seed for the tree
    #[arg(long, short = 's', default_value_t = 42)]
    seed: u64,
}

fn leaf_value(state: &TreeState) -> Score {
    state.static_value()
}

fn variants(depth: u32) -> Vec<(&'static str, SearchConfig)> {
    let pruned = SearchConfig {
        use_transposition_table: false,
        use_quiescence: false,
        ..SearchConfig::with_depth(depth)
    };
    let tabled = SearchConfig {
        use_transposition_table: true,
        ..pruned.clone()
    };
    let ordered = SearchConfig {
        order_moves: true,
        ..tabled.clone()
    };
    vec![
        ("negamax", SearchConfig::plain_negamax(depth)),
        ("alpha-beta", pruned),
        ("alpha-beta + table", tabled),
        ("alpha-beta + table + ordering", ordered),
    ]
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let depth = args.depth.max(1);
    let branching = args.max_branching.max(1);
    let seed = args.seed;

    let mut rng = StdRng::seed_from_u64(seed);
    let root = GameTree::random(&mut rng, depth, branching);
    log::info!(
        "random tree: depth {}, up to {} children, seed {}, {} nodes",
        depth,
        branching,
        seed,
        root.tree().node_count()
    );

    println!(
        "{:<32} {:>8} {:>10} {:>8} {:>8} {:>8} {:>8}",
        "variant", "value", "nodes", "hits", "cutoffs", "action", "ms"
    );

    let mut reference: Option<Score> = None;
    for (name, config) in variants(depth) {
        let mut table = TranspositionTable::new();
        let result = search_best_action(&root, &config, &mut table, &leaf_value);
        let action = result
            .best_action
            .as_ref()
            .map_or_else(|| "-".to_string(), |a| a.ordinal().to_string());

        let stats = &result.stats;
        println!(
            "{:<32} {:>8} {:>10} {:>8} {:>8} {:>8} {:>8}",
            name, result.score, stats.nodes, stats.table_hits, stats.cutoffs, action, result.time_ms
        );

        match reference {
            None => reference = Some(result.score),
            Some(value) if value != result.score => {
                log::error!("{} disagrees: {} instead of {}", name, result.score, value);
            }
            Some(_) => {}
        }
    }
}
