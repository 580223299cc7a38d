use std::{
    collections::{HashSet, VecDeque},
    fmt::{Debug, Display},
    hash::Hash,
    marker::PhantomData,
    ops::Index,
    str::FromStr,
};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Supertrait that collects all the requirements on the NodeReference values
/// Must be copy, comparable, hashable and not references (hence 'static)
pub trait NodeReference: Copy + Eq + Hash + Debug + 'static {}

pub trait MapTrait {
    /// The type that can be used to reference nodes in the map
    type Reference: NodeReference;

    /// The label of the move between two neighboring nodes
    type Action: Copy + Debug + 'static;

    /// Return an iterator over the neighbors of the provided node and the action that leads there.
    /// The order of the iterator decides the order in which the search expands nodes.
    fn neighbors_of(
        &self,
        node: Self::Reference,
    ) -> impl Iterator<Item = (Self::Action, Self::Reference)>;
}

/// Index of an expanded node inside a [`NodeArena`]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NodeId(usize);

/// A step in the search tree. Only the root has neither a parent nor an action.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node<A, R> {
    pub state: R,
    pub parent: Option<NodeId>,
    pub action: Option<A>,
}

impl<A, R> Node<A, R> {
    pub fn root(state: R) -> Self {
        Self {
            state,
            parent: None,
            action: None,
        }
    }

    pub fn child(state: R, parent: NodeId, action: A) -> Self {
        Self {
            state,
            parent: Some(parent),
            action: Some(action),
        }
    }
}

/// Growable store of expanded nodes. A node can only point at nodes pushed before it, so the
/// parent links never form a cycle.
#[derive(Debug)]
pub struct NodeArena<A, R> {
    nodes: Vec<Node<A, R>>,
}

impl<A, R> Default for NodeArena<A, R> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<A: Copy, R: Copy> NodeArena<A, R> {
    pub fn push(&mut self, node: Node<A, R>) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk from `node` back to the root and return the moves in start to end order. The root
    /// itself is not part of the result.
    pub fn backtrack(&self, node: &Node<A, R>) -> Solution<A, R> {
        let mut actions = Vec::new();
        let mut cells = Vec::new();

        let mut current = node;
        while let (Some(parent), Some(action)) = (current.parent, current.action) {
            actions.push(action);
            cells.push(current.state);
            current = &self[parent];
        }

        actions.reverse();
        cells.reverse();

        Solution { actions, cells }
    }
}

impl<A, R> Index<NodeId> for NodeArena<A, R> {
    type Output = Node<A, R>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

/// Which end of the frontier `remove` takes from
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontierPolicy {
    /// Last in, first out. Depth-first search.
    #[default]
    Stack,
    /// First in, first out. Breadth-first search, finds a shortest path.
    Queue,
}

impl Display for FrontierPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FrontierPolicy::Stack => "stack",
                FrontierPolicy::Queue => "queue",
            }
        )
    }
}

impl FromStr for FrontierPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stack" | "dfs" => Ok(FrontierPolicy::Stack),
            "queue" | "bfs" => Ok(FrontierPolicy::Queue),
            _ => Err(anyhow::anyhow!("Invalid frontier policy: {}", s)),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("empty frontier")]
pub struct EmptyFrontier;

/// The nodes that have been discovered but not yet expanded
#[derive(Debug)]
pub struct Frontier<A, R> {
    policy: FrontierPolicy,
    nodes: VecDeque<Node<A, R>>,
}

impl<A, R: PartialEq> Frontier<A, R> {
    pub fn new(policy: FrontierPolicy) -> Self {
        Self {
            policy,
            nodes: VecDeque::new(),
        }
    }

    pub fn policy(&self) -> FrontierPolicy {
        self.policy
    }

    /// Does not check for duplicates, use [`Frontier::contains_state`] first
    pub fn add(&mut self, node: Node<A, R>) {
        self.nodes.push_back(node);
    }

    pub fn contains_state(&self, state: &R) -> bool {
        self.nodes.iter().any(|node| node.state == *state)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn remove(&mut self) -> Result<Node<A, R>, EmptyFrontier> {
        match self.policy {
            FrontierPolicy::Stack => self.nodes.pop_back(),
            FrontierPolicy::Queue => self.nodes.pop_front(),
        }
        .ok_or(EmptyFrontier)
    }
}

/// The moves from start to goal, `cells[i]` is reached by taking `actions[i]`
#[derive(Debug, PartialEq, Clone, Eq, Serialize, Deserialize)]
pub struct Solution<A, R> {
    pub actions: Vec<A>,
    pub cells: Vec<R>,
}

impl<A, R> Solution<A, R> {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState<A, R> {
    Computing,
    NoSolution,
    Solved(Solution<A, R>),
}

impl<A, R> SearchState<A, R> {
    pub fn is_done(&self) -> bool {
        !matches!(self, SearchState::Computing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no solution")]
    NoSolution,
    #[error(transparent)]
    EmptyFrontier(#[from] EmptyFrontier),
}

/// Uninformed graph search from `start` to `goal`. The frontier policy decides whether this is
/// depth-first or breadth-first.
#[derive(Debug)]
pub struct PathFinder<M: MapTrait> {
    start: M::Reference,
    goal: M::Reference,
    frontier: Frontier<M::Action, M::Reference>,
    nodes: NodeArena<M::Action, M::Reference>,
    explored: HashSet<M::Reference>,
    num_explored: usize,
    state: SearchState<M::Action, M::Reference>,
    _map: PhantomData<M>,
}

impl<M: MapTrait> PathFinder<M> {
    pub fn new(start: M::Reference, goal: M::Reference, policy: FrontierPolicy) -> Self {
        let mut frontier = Frontier::new(policy);
        frontier.add(Node::root(start));

        debug!("searching {:?} -> {:?} using a {}", start, goal, policy);

        Self {
            start,
            goal,
            frontier,
            nodes: NodeArena::default(),
            explored: HashSet::new(),
            num_explored: 0,
            state: SearchState::Computing,
            _map: PhantomData,
        }
    }

    /// Run until the goal is found or the frontier runs dry
    pub fn finish(
        &mut self,
        map: &M,
    ) -> Result<&SearchState<M::Action, M::Reference>, EmptyFrontier> {
        while !self.step(map)?.is_done() {}
        Ok(&self.state)
    }

    /// Like [`PathFinder::finish`] but turns a search without a path into an error
    pub fn solve(&mut self, map: &M) -> Result<Solution<M::Action, M::Reference>, SearchError> {
        match self.finish(map)? {
            SearchState::Solved(solution) => Ok(solution.clone()),
            _ => Err(SearchError::NoSolution),
        }
    }

    /// Expand a single node. Once a terminal state is reached it is returned unchanged.
    pub fn step(
        &mut self,
        map: &M,
    ) -> Result<&SearchState<M::Action, M::Reference>, EmptyFrontier> {
        if self.state.is_done() {
            return Ok(&self.state);
        }

        if self.frontier.is_empty() {
            debug!("no solution after exploring {} states", self.num_explored);
            self.state = SearchState::NoSolution;
            return Ok(&self.state);
        }

        let node = self.frontier.remove()?;
        self.num_explored += 1;
        trace!("expanding {:?}", node.state);

        if node.state == self.goal {
            let solution = self.nodes.backtrack(&node);
            debug!(
                "found goal after exploring {} states, path length {}",
                self.num_explored,
                solution.len()
            );
            self.state = SearchState::Solved(solution);
            return Ok(&self.state);
        }

        self.explored.insert(node.state);
        let current = node.state;
        let id = self.nodes.push(node);

        for (action, next) in map.neighbors_of(current) {
            if !self.frontier.contains_state(&next) && !self.explored.contains(&next) {
                self.frontier.add(Node::child(next, id, action));
            }
        }

        Ok(&self.state)
    }

    pub fn state(&self) -> &SearchState<M::Action, M::Reference> {
        &self.state
    }

    pub fn solution(&self) -> Option<&Solution<M::Action, M::Reference>> {
        match &self.state {
            SearchState::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    /// Number of nodes taken off the frontier so far, the goal included
    pub fn num_explored(&self) -> usize {
        self.num_explored
    }

    pub fn explored(&self) -> &HashSet<M::Reference> {
        &self.explored
    }

    pub fn policy(&self) -> FrontierPolicy {
        self.frontier.policy()
    }

    pub fn start(&self) -> M::Reference {
        self.start
    }

    pub fn goal(&self) -> M::Reference {
        self.goal
    }
}
