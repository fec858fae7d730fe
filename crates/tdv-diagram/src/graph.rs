//! # Graph Inputs
//!
//! Placeholder validation for graph inputs (adjacency matrices or lists).
//! No structural rules are enforced yet; the input is returned unchanged so
//! that callers can already route graph inputs through a validation step.

/// Return `graph` unchanged.
pub fn check_graph<G>(graph: G) -> G {
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_check_graph_is_identity() {
        let adjacency = array![[0.0, 1.0], [1.0, 0.0]];
        let ptr = adjacency.as_ptr();
        let out = check_graph(adjacency);
        assert_eq!(out.as_ptr(), ptr);
        assert_eq!(out, array![[0.0, 1.0], [1.0, 0.0]]);
    }

    #[test]
    fn test_check_graph_passes_borrowed_inputs() {
        let edges = vec![(0usize, 1usize), (1, 2)];
        assert_eq!(check_graph(&edges), &edges);
    }
}
