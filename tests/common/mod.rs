//! Shared fixtures: a hand-built game tree that implements `Rules`, so the
//! search can be observed node by node.

#![allow(dead_code)]

use alfiere::{Evaluator, Rules};
use shakmaty::Color;

/// Shape of a test tree
pub enum Shape {
    /// Leaf with a static value
    Leaf(i32),
    /// Inner node; its own static value is used as the ordering key
    Branch(i32, Vec<Shape>),
    /// Side to move is checkmated
    Mated,
    /// Side to move may claim a draw; the subtree is still playable
    Claim(Box<Shape>),
}

pub fn leaf(value: i32) -> Shape {
    Shape::Leaf(value)
}

pub fn branch(children: Vec<Shape>) -> Shape {
    Shape::Branch(0, children)
}

pub fn hinted(hint: i32, children: Vec<Shape>) -> Shape {
    Shape::Branch(hint, children)
}

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub children: Vec<usize>,
    pub value: i32,
    pub mated: bool,
    pub claim: bool,
}

/// Game over a fixed tree. Moves are child node indices; White moves at the root.
#[derive(Debug, Clone)]
pub struct TreeGame {
    pub nodes: Vec<Node>,
    path: Vec<usize>,
    /// Every node entered through `make_move`, in order
    pub visited: Vec<usize>,
}

impl TreeGame {
    pub fn new(shape: Shape) -> Self {
        let mut nodes = Vec::new();
        flatten(shape, &mut nodes);
        Self {
            nodes,
            path: Vec::new(),
            visited: Vec::new(),
        }
    }

    pub fn current(&self) -> usize {
        self.path.last().copied().unwrap_or(0)
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Indices of `node` and all its descendants
    pub fn subtree(&self, node: usize) -> Vec<usize> {
        let mut out = vec![node];
        for &child in &self.nodes[node].children {
            out.extend(self.subtree(child));
        }
        out
    }
}

fn flatten(shape: Shape, nodes: &mut Vec<Node>) -> usize {
    let id = nodes.len();
    nodes.push(Node::default());
    match shape {
        Shape::Leaf(value) => nodes[id].value = value,
        Shape::Mated => nodes[id].mated = true,
        Shape::Branch(hint, children) => {
            nodes[id].value = hint;
            for child in children {
                let child_id = flatten(child, nodes);
                nodes[id].children.push(child_id);
            }
        }
        Shape::Claim(inner) => {
            nodes.pop();
            let inner_id = flatten(*inner, nodes);
            nodes[inner_id].claim = true;
            return inner_id;
        }
    }
    id
}

impl Rules for TreeGame {
    type Move = usize;

    fn legal_moves(&self) -> Vec<usize> {
        self.nodes[self.current()].children.clone()
    }

    fn make_move(&mut self, mv: &usize) {
        self.path.push(*mv);
        self.visited.push(*mv);
    }

    fn unmake_move(&mut self) {
        self.path.pop();
    }

    fn is_checkmate(&self) -> bool {
        self.nodes[self.current()].mated
    }

    fn is_game_over(&self) -> bool {
        self.is_checkmate()
    }

    fn can_claim_draw(&self) -> bool {
        self.nodes[self.current()].claim
    }

    fn turn(&self) -> Color {
        if self.path.len() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// Static values straight from the tree
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeEval;

impl Evaluator<TreeGame> for TreeEval {
    fn evaluate(&self, position: &TreeGame) -> i32 {
        position.nodes[position.current()].value
    }

    fn is_end_game(&self, _: &TreeGame) -> bool {
        false
    }

    fn move_value(&self, position: &TreeGame, mv: &usize, _: bool) -> i32 {
        position.nodes[*mv].value
    }
}

/// Positions used across the chess tests
pub mod positions {
    pub const STARTING: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    /// 1. e4 e5 2. Nf3 Nc6
    pub const OPEN_GAME: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    /// Black queen hangs to Nxh4
    pub const HANGING_QUEEN: &str = "rnb1kbnr/pppp1ppp/8/4p3/4P2q/5N2/PPPP1PPP/RNBQKB1R w KQkq - 0 3";
    /// Qxf7# available
    pub const SCHOLARS_MATE: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
    /// Black plays Qh4#
    pub const FOOLS_MATE: &str = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2";
    /// Rook ladder: 1. Rb7 Kg8 2. Ra8#
    pub const LADDER_MATE_IN_TWO: &str = "7k/8/8/8/8/8/1R6/R3K3 w - - 0 1";
}
