use tsunagi_core::{Edge, EdgeSink, NodePopulation};

/// Dense boolean adjacency matrix used to check that wiring works with sinks
/// other than `EdgeList`.
#[derive(Debug)]
pub struct AdjacencySink {
    targets: usize,
    cells: Vec<bool>,
    len: usize,
}

impl AdjacencySink {
    #[must_use]
    pub fn new(sources: usize, targets: usize) -> Self {
        Self {
            targets,
            cells: vec![false; sources * targets],
            len: 0,
        }
    }

    fn cell(&mut self, edge: Edge) -> &mut bool {
        let index = edge.source() * self.targets + edge.target();
        &mut self.cells[index]
    }

    #[must_use]
    pub fn is_connected(&self, source: usize, target: usize) -> bool {
        self.cells[source * self.targets + target]
    }
}

impl EdgeSink for AdjacencySink {
    fn reserve(&mut self, _additional: usize) {}

    fn add_edge(&mut self, edge: Edge) -> bool {
        let cell = self.cell(edge);
        let added = !*cell;
        *cell = true;
        if added {
            self.len += 1;
        }
        added
    }

    fn remove_edge(&mut self, edge: Edge) -> bool {
        let cell = self.cell(edge);
        let removed = *cell;
        *cell = false;
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[must_use]
pub fn layer(len: usize) -> NodePopulation<usize> {
    (0..len).collect()
}
