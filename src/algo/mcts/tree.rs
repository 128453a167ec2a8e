/// Index of a node in a [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// A node of the search tree
///
/// `parent` is a back-link into the arena and is only followed to propagate returns
/// upwards. Ownership runs strictly top-down through the arena.
#[derive(Debug, Clone)]
pub struct Node<S, A> {
    pub state: S,
    pub parent: Option<(NodeId, A)>,
    pub children: Vec<(A, NodeId)>,
    pub visits: u32,
    pub value_sum: f64,
    /// Reward sampled on the edge that created this node
    pub reward: f64,
}

impl<S, A: PartialEq> Node<S, A> {
    fn new(state: S, parent: Option<(NodeId, A)>, reward: f64) -> Self {
        Self {
            state,
            parent,
            children: Vec::new(),
            visits: 0,
            value_sum: 0.0,
            reward,
        }
    }

    /// Mean return observed through this node, 0 before the first visit
    pub fn q(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value_sum / self.visits as f64
        }
    }

    /// Get the child reached by `action`, if it has been expanded
    pub fn child(&self, action: &A) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| a == action)
            .map(|&(_, id)| id)
    }
}

/// Arena-backed search tree, the root always lives at index 0
#[derive(Debug, Clone)]
pub struct Tree<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S, A> Tree<S, A>
where
    A: Clone + PartialEq,
{
    pub const ROOT: NodeId = NodeId(0);

    pub fn new(root_state: S) -> Self {
        Self {
            nodes: vec![Node::new(root_state, None, 0.0)],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> &Node<S, A> {
        &self.nodes[id.0]
    }

    pub fn root(&self) -> &Node<S, A> {
        self.get(Self::ROOT)
    }

    /// Attach a new child to `parent` for `action`
    pub fn add_child(&mut self, parent: NodeId, action: A, state: S, reward: f64) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(Node::new(state, Some((parent, action.clone())), reward));
        self.nodes[parent.0].children.push((action, id));
        id
    }

    /// Propagate the discounted return `ret` observed from `leaf`'s state back to the root
    ///
    /// Every node on the way receives the return of the same trajectory, measured from the
    /// edge that leads into it, so a child's mean is the value of the action that created it.
    pub fn backpropagate(&mut self, leaf: NodeId, ret: f64, gamma: f64) {
        let mut id = leaf;
        let mut ret = ret;
        while let Some((parent, _)) = self.nodes[id.0].parent {
            let node = &mut self.nodes[id.0];
            ret = node.reward + gamma * ret;
            node.visits += 1;
            node.value_sum += ret;
            id = parent;
        }

        let root = &mut self.nodes[id.0];
        root.visits += 1;
        root.value_sum += ret;
    }
}
