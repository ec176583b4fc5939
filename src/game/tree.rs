//! Explicit synthetic game trees.
//!
//! A [`GameTree`] is an arena of nodes addressed by index. Every node carries
//! everything a [`GameState`] must expose: a key, the player to move, step
//! counters, scores and a [`Layout`]. On top of that each node has a *static
//! value*, a fixed number from the point of view of the player to move, which
//! tests and benchmarks use as the leaf heuristic.
//!
//! Trees are built with [`GameTreeBuilder`], with [`GameTree::uniform`] from a
//! list of leaf values, or randomly with [`GameTree::random`].

use std::rc::Rc;

use rand::Rng;

use super::{Action, GameState, Layout, PlayerId};

/// The two players of every synthetic tree, in turn order.
pub const TREE_PLAYERS: [PlayerId; 2] = [PlayerId(1), PlayerId(2)];

#[derive(Debug, Clone)]
struct TreeNode {
    key: u64,
    children: Vec<usize>,
    value: f64,
    done: bool,
    step: u32,
    next_player: PlayerId,
    scores: [f64; 2],
    layout: Layout,
}

/// Arena holding every node of a synthetic game.
#[derive(Debug)]
pub struct GameTree {
    nodes: Vec<TreeNode>,
    max_step: u32,
}

impl GameTree {
    /// Complete tree of the given `branching` and `depth` whose leaves carry
    /// `leaf_values`, left to right.
    ///
    /// Leaf values are expressed from the root player's point of view, so the
    /// minimax value of the root equals the textbook result computed on those
    /// numbers. They are converted to the mover's frame internally.
    ///
    /// # Panics
    ///
    /// Panics if `leaf_values.len() != branching.pow(depth)`.
    pub fn uniform(branching: usize, depth: u32, leaf_values: &[f64]) -> TreeState {
        let leaves = branching.pow(depth);
        assert_eq!(
            leaf_values.len(),
            leaves,
            "a {branching}-ary tree of depth {depth} has {leaves} leaves"
        );

        let mut builder = GameTreeBuilder::new();
        let mut frontier = vec![builder.root()];
        for _ in 0..depth {
            let mut next = Vec::with_capacity(frontier.len() * branching);
            for &node in &frontier {
                for _ in 0..branching {
                    next.push(builder.add_child(node));
                }
            }
            frontier = next;
        }

        let root_moves_at_leaves = depth % 2 == 0;
        for (&leaf, &value) in frontier.iter().zip(leaf_values) {
            builder.set_value(leaf, if root_moves_at_leaves { value } else { -value });
        }
        builder.build()
    }

    /// Random tree with exactly `depth` plies below the root and between one
    /// and `max_branching` children per interior node.
    ///
    /// Static values are small integers so ties happen regularly.
    pub fn random<R: Rng>(rng: &mut R, depth: u32, max_branching: usize) -> TreeState {
        let mut builder = GameTreeBuilder::new();
        let root = builder.root();
        builder.set_value(root, rng.gen_range(-20..=20) as f64);

        let mut frontier = vec![root];
        for _ in 0..depth {
            let mut next = Vec::new();
            for &node in &frontier {
                let branching = rng.gen_range(1..=max_branching.max(1));
                for _ in 0..branching {
                    let child = builder.add_child(node);
                    builder.set_value(child, rng.gen_range(-20..=20) as f64);
                    next.push(child);
                }
            }
            frontier = next;
        }
        builder.build()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn max_step(&self) -> u32 {
        self.max_step
    }
}

/// Incremental construction of a [`GameTree`].
///
/// Node 0 is the root, player 1 to move, step 0, on an empty standard board.
/// Children inherit the parent's layout and scores, advance the step and pass
/// the move to the other player.
#[derive(Debug)]
pub struct GameTreeBuilder {
    nodes: Vec<TreeNode>,
    max_step: u32,
}

impl GameTreeBuilder {
    pub fn new() -> Self {
        Self::with_layout(Layout::standard())
    }

    pub fn with_layout(layout: Layout) -> Self {
        let root = TreeNode {
            key: 0,
            children: Vec::new(),
            value: 0.0,
            done: false,
            step: 0,
            next_player: TREE_PLAYERS[0],
            scores: [0.0; 2],
            layout,
        };
        Self {
            nodes: vec![root],
            max_step: u32::MAX,
        }
    }

    pub fn root(&self) -> usize {
        0
    }

    pub fn add_child(&mut self, parent: usize) -> usize {
        let index = self.nodes.len();
        let parent_node = &self.nodes[parent];
        let child = TreeNode {
            key: index as u64,
            children: Vec::new(),
            value: 0.0,
            done: false,
            step: parent_node.step + 1,
            next_player: other_player(parent_node.next_player),
            scores: parent_node.scores,
            layout: parent_node.layout.clone(),
        };
        self.nodes.push(child);
        self.nodes[parent].children.push(index);
        index
    }

    /// Add a child carrying a static value, from the child's mover's view.
    pub fn add_leaf(&mut self, parent: usize, value: f64) -> usize {
        let child = self.add_child(parent);
        self.set_value(child, value);
        child
    }

    pub fn set_value(&mut self, node: usize, value: f64) -> &mut Self {
        self.nodes[node].value = value;
        self
    }

    /// Give `node` the identity of another node to model a transposition.
    pub fn set_key(&mut self, node: usize, key: u64) -> &mut Self {
        self.nodes[node].key = key;
        self
    }

    pub fn set_step(&mut self, node: usize, step: u32) -> &mut Self {
        self.nodes[node].step = step;
        self
    }

    pub fn set_scores(&mut self, node: usize, scores: [f64; 2]) -> &mut Self {
        self.nodes[node].scores = scores;
        self
    }

    /// Mark `node` as a finished game with the given final scores.
    pub fn finish(&mut self, node: usize, scores: [f64; 2]) -> &mut Self {
        let target = &mut self.nodes[node];
        target.done = true;
        target.scores = scores;
        self
    }

    pub fn layout_mut(&mut self, node: usize) -> &mut Layout {
        &mut self.nodes[node].layout
    }

    pub fn max_step(&mut self, max_step: u32) -> &mut Self {
        self.max_step = max_step;
        self
    }

    /// Freeze the tree and return its root state.
    pub fn build(self) -> TreeState {
        let tree = Rc::new(GameTree {
            nodes: self.nodes,
            max_step: self.max_step,
        });
        TreeState { tree, index: 0 }
    }
}

impl Default for GameTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn other_player(player: PlayerId) -> PlayerId {
    if player == TREE_PLAYERS[0] {
        TREE_PLAYERS[1]
    } else {
        TREE_PLAYERS[0]
    }
}

fn player_slot(player: PlayerId) -> usize {
    if player == TREE_PLAYERS[0] {
        0
    } else {
        1
    }
}

/// A node of a [`GameTree`] seen as a game state.
#[derive(Debug, Clone)]
pub struct TreeState {
    tree: Rc<GameTree>,
    index: usize,
}

impl TreeState {
    fn node(&self) -> &TreeNode {
        &self.tree.nodes[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Fixed value of this node from the point of view of the player to move.
    pub fn static_value(&self) -> f64 {
        self.node().value
    }

    pub fn child(&self, ordinal: usize) -> Option<TreeState> {
        self.node().children.get(ordinal).map(|&index| TreeState {
            tree: Rc::clone(&self.tree),
            index,
        })
    }

    pub fn children(&self) -> Vec<TreeState> {
        self.node()
            .children
            .iter()
            .map(|&index| TreeState {
                tree: Rc::clone(&self.tree),
                index,
            })
            .collect()
    }

    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    /// The same game with the two players exchanged everywhere: player to
    /// move, scores and marbles. Keys and steps are kept.
    ///
    /// Static values are relative to the player to move, so from a fixed
    /// player's point of view every static value changes sign.
    pub fn with_roles_swapped(&self) -> TreeState {
        let nodes = self
            .tree
            .nodes
            .iter()
            .map(|node| TreeNode {
                next_player: other_player(node.next_player),
                scores: [node.scores[1], node.scores[0]],
                layout: swap_owners(&node.layout),
                ..node.clone()
            })
            .collect();
        let tree = Rc::new(GameTree {
            nodes,
            max_step: self.tree.max_step,
        });
        TreeState {
            tree,
            index: self.index,
        }
    }
}

fn swap_owners(layout: &Layout) -> Layout {
    let mut swapped = layout.clone();
    for cell in layout.playable_cells() {
        if let Some(owner) = layout.owner(cell) {
            swapped.place(cell, other_player(owner));
        }
    }
    swapped
}

impl PartialEq for TreeState {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.index == other.index
    }
}

/// Transition to one child of a [`TreeState`].
#[derive(Debug, Clone)]
pub struct TreeAction {
    tree: Rc<GameTree>,
    target: usize,
    ordinal: usize,
}

impl TreeAction {
    /// Position of the action among its siblings (generator order).
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Arena index of the state this action leads to.
    pub fn target(&self) -> usize {
        self.target
    }
}

impl Action for TreeAction {
    type State = TreeState;

    fn next_state(&self) -> TreeState {
        TreeState {
            tree: Rc::clone(&self.tree),
            index: self.target,
        }
    }
}

impl GameState for TreeState {
    type Action = TreeAction;
    type Key = u64;
    type Board = Layout;

    fn key(&self) -> u64 {
        self.node().key
    }

    fn possible_actions(&self) -> Vec<TreeAction> {
        if self.node().done {
            return Vec::new();
        }
        self.node()
            .children
            .iter()
            .enumerate()
            .map(|(ordinal, &target)| TreeAction {
                tree: Rc::clone(&self.tree),
                target,
                ordinal,
            })
            .collect()
    }

    fn is_done(&self) -> bool {
        self.node().done
    }

    fn step(&self) -> u32 {
        self.node().step
    }

    fn max_step(&self) -> u32 {
        self.tree.max_step
    }

    fn players(&self) -> &[PlayerId] {
        &TREE_PLAYERS
    }

    fn next_player(&self) -> PlayerId {
        self.node().next_player
    }

    fn score(&self, player: PlayerId) -> f64 {
        self.node().scores[player_slot(player)]
    }

    fn board(&self) -> &Layout {
        &self.node().layout
    }
}
