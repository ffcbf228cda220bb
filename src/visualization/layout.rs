//! Force-directed graph layout algorithm.

use std::collections::HashMap;

use glam::DVec2;

use crate::graph::Network;

/// Smallest distance used in force computations.
const MIN_DISTANCE: f64 = 0.01;
/// Initial temperature as a fraction of the initial layout extent.
const INITIAL_TEMPERATURE: f64 = 0.1;
/// Mean displacement below which the layout counts as settled.
const SETTLE_THRESHOLD: f64 = 1e-4;

/// A person placed in the layout.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    /// Person name (also the label).
    pub name: String,
    /// Current position.
    pub position: DVec2,
}

/// An edge in the layout.
#[derive(Debug, Clone)]
pub struct LayoutEdge {
    /// Source node index.
    pub from_idx: usize,
    /// Target node index.
    pub to_idx: usize,
    /// Attraction strength (the relation's weight).
    pub strength: f64,
}

/// Fruchterman–Reingold spring layout.
///
/// `optimal_distance` is the natural edge length `k / sqrt(n)`. After
/// [`SpringLayout::stabilize`] positions are centered on the origin and
/// scaled into `[-1, 1]`.
#[derive(Debug, Clone)]
pub struct SpringLayout {
    /// Nodes with positions, in network insertion order.
    pub nodes: Vec<LayoutNode>,
    /// Edges connecting nodes.
    pub edges: Vec<LayoutEdge>,
    optimal_distance: f64,
    temperature: f64,
}

impl SpringLayout {
    /// Create a layout for `network` with spacing parameter `k`.
    pub fn new(network: &Network, k: f64) -> Self {
        let n = network.node_count();
        let mut id_to_idx = HashMap::new();
        let nodes: Vec<LayoutNode> = network
            .names()
            .enumerate()
            .map(|(i, name)| {
                id_to_idx.insert(name, i);
                LayoutNode {
                    name: name.to_string(),
                    position: initial_position(i, n),
                }
            })
            .collect();

        let edges = network
            .relations()
            .filter_map(|r| {
                Some(LayoutEdge {
                    from_idx: *id_to_idx.get(r.subject)?,
                    to_idx: *id_to_idx.get(r.object)?,
                    strength: r.relation.weight,
                })
            })
            .collect();

        let optimal_distance = k / (n.max(1) as f64).sqrt();
        Self {
            nodes,
            edges,
            optimal_distance,
            temperature: INITIAL_TEMPERATURE,
        }
    }

    /// Natural edge length used by the forces.
    pub fn optimal_distance(&self) -> f64 {
        self.optimal_distance
    }

    /// Run one cooling step. Returns the mean displacement of this step.
    ///
    /// - Repulsion: `k² / d` between all pairs
    /// - Attraction: `strength · d² / k` along each edge, on both endpoints
    /// - Displacement capped by the current temperature
    pub fn step(&mut self) -> f64 {
        let n = self.nodes.len();
        if n < 2 {
            return 0.0;
        }
        let k = self.optimal_distance;
        let mut displacement = vec![DVec2::ZERO; n];

        // --- Repulsion: all pairs ---
        for i in 0..n {
            for j in (i + 1)..n {
                let delta = self.nodes[i].position - self.nodes[j].position;
                let dist = delta.length().max(MIN_DISTANCE);
                let dir = if delta.length() > 0.0 {
                    delta * (1.0 / delta.length())
                } else {
                    // Coincident nodes: push apart along a fixed axis
                    DVec2::new(1.0, 0.0)
                };
                let force = k * k / dist;
                displacement[i] += dir * force;
                displacement[j] -= dir * force;
            }
        }

        // --- Attraction: weighted springs ---
        for edge in &self.edges {
            if edge.from_idx == edge.to_idx {
                continue;
            }
            let delta = self.nodes[edge.to_idx].position - self.nodes[edge.from_idx].position;
            let dist = delta.length().max(MIN_DISTANCE);
            let force = edge.strength * dist * dist / k;
            let dir = delta.normalize_or_zero();
            displacement[edge.from_idx] += dir * force;
            displacement[edge.to_idx] -= dir * force;
        }

        // --- Temperature-limited integration ---
        let mut total = 0.0;
        for (node, disp) in self.nodes.iter_mut().zip(&displacement) {
            let len = disp.length().max(MIN_DISTANCE);
            let step = *disp * (self.temperature / len);
            node.position += step;
            total += step.length();
        }
        total / n as f64
    }

    /// Run up to `iterations` cooling steps, then center and rescale.
    pub fn stabilize(&mut self, iterations: usize) {
        let cooling = self.temperature / (iterations as f64 + 1.0);
        for _ in 0..iterations {
            let moved = self.step();
            self.temperature -= cooling;
            if moved < SETTLE_THRESHOLD {
                break;
            }
        }
        self.rescale();
    }

    /// Center on the origin and scale the largest coordinate to 1.
    pub fn rescale(&mut self) {
        let n = self.nodes.len();
        if n == 0 {
            return;
        }
        let centroid = self
            .nodes
            .iter()
            .fold(DVec2::ZERO, |acc, node| acc + node.position)
            * (1.0 / n as f64);
        for node in &mut self.nodes {
            node.position -= centroid;
        }

        let extent = self
            .nodes
            .iter()
            .map(|node| node.position.x.abs().max(node.position.y.abs()))
            .fold(0.0_f64, f64::max);
        if extent > 0.0 {
            for node in &mut self.nodes {
                node.position = node.position * (1.0 / extent);
            }
        }
    }

    /// Position of a person by name.
    pub fn position(&self, name: &str) -> Option<DVec2> {
        self.nodes
            .iter()
            .find(|node| node.name == name)
            .map(|node| node.position)
    }
}

/// Deterministic initial position in the unit square.
/// Uses a golden-angle (sunflower) spiral for even spacing.
fn initial_position(i: usize, total_nodes: usize) -> DVec2 {
    let golden_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
    let n = total_nodes.max(1) as f64;
    let idx = i as f64 + 0.5;

    let radius = (idx / n).sqrt() * 0.5;
    let theta = idx * golden_angle;
    DVec2::new(0.5 + radius * theta.cos(), 0.5 + radius * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Triple, TripleTable};

    fn network(edges: &[(&str, &str)]) -> Network {
        Network::from_triples(&TripleTable::new(
            edges.iter().map(|(s, o)| Triple::new(*s, *o, 5)).collect(),
        ))
    }

    #[test]
    fn test_optimal_distance_scales_with_node_count() {
        let layout = SpringLayout::new(&network(&[("A", "B"), ("C", "D")]), 1.0);
        assert_eq!(layout.optimal_distance(), 0.5);
    }

    #[test]
    fn test_positions_rescaled_into_unit_box() {
        let mut layout = SpringLayout::new(
            &network(&[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D"), ("E", "A")]),
            1.0,
        );
        layout.stabilize(50);

        let max = layout
            .nodes
            .iter()
            .map(|n| n.position.x.abs().max(n.position.y.abs()))
            .fold(0.0_f64, f64::max);
        assert!((max - 1.0).abs() < 1e-9);
        for node in &layout.nodes {
            assert!(node.position.x.is_finite() && node.position.y.is_finite());
        }
    }

    #[test]
    fn test_nodes_do_not_collapse() {
        let mut layout = SpringLayout::new(&network(&[("A", "B"), ("B", "C")]), 1.0);
        layout.stabilize(100);
        let a = layout.position("A").unwrap();
        let b = layout.position("B").unwrap();
        let c = layout.position("C").unwrap();
        assert!((a - b).length() > 0.05);
        assert!((b - c).length() > 0.05);
        assert!((a - c).length() > 0.05);
    }

    #[test]
    fn test_single_node_stays_at_origin() {
        let mut layout = SpringLayout::new(&network(&[("A", "A")]), 1.0);
        layout.stabilize(50);
        assert_eq!(layout.nodes.len(), 1);
        assert_eq!(layout.position("A"), Some(DVec2::ZERO));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let n = network(&[("A", "B"), ("B", "C"), ("C", "D")]);
        let mut first = SpringLayout::new(&n, 2.0);
        let mut second = SpringLayout::new(&n, 2.0);
        first.stabilize(50);
        second.stabilize(50);
        for (a, b) in first.nodes.iter().zip(&second.nodes) {
            assert_eq!(a.position, b.position);
        }
    }
}
