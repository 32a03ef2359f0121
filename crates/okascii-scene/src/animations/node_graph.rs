//! Random node graph with pulses travelling along its edges (stateful).
//!
//! Edge construction retries a bounded number of times per connection. When
//! every attempt for a connection lands on the node itself or on an existing
//! neighbour, that connection is skipped and the node ends up with fewer
//! edges than it wanted. Building never fails.

use glam::Vec3;
use okascii_core::{GeometryKind, GraphConfig, SizeParams};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::geometry::make_geometry;
use crate::scene::{ObjectId, Scene, Transform};

/// Shapes a node is drawn as.
const NODE_SHAPES: [GeometryKind; 3] = [
    GeometryKind::Sphere,
    GeometryKind::Box,
    GeometryKind::Tetrahedron,
];

/// Luminance of the static edges.
const EDGE_BRIGHTNESS: f32 = 0.35;

/// Luminance of the pulses.
const FLOW_BRIGHTNESS: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct GraphNode {
    pub position: Vec3,
    pub object: ObjectId,
    /// Indices of the nodes this one has an edge to.
    pub connections: Vec<usize>,
}

/// A pulse travelling from `start` towards `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    pub line: ObjectId,
    pub start: usize,
    pub end: usize,
    /// Always in `[0, 1)` between frames.
    pub progress: f32,
    pub speed: f32,
}

#[derive(Debug)]
pub struct NodeGraphAnimator {
    nodes: Vec<GraphNode>,
    edges: Vec<(usize, usize)>,
    flows: Vec<Flow>,
    node_spin: f32,
    scene_spin: f32,
    reroute_probability: f32,
    rng: StdRng,
}

impl NodeGraphAnimator {
    pub fn build(config: &GraphConfig, scene: &mut Scene, mut rng: StdRng) -> Self {
        let half = config.bounds / 2.0;
        let mut nodes: Vec<GraphNode> = (0..config.node_count)
            .map(|_| {
                let position = Vec3::new(
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                );
                let kind = NODE_SHAPES[rng.gen_range(0..NODE_SHAPES.len())];
                let mesh = make_geometry(kind, &SizeParams::small(kind, config.node_size));
                GraphNode {
                    position,
                    object: scene.add_mesh(mesh, Transform::at(position)),
                    connections: Vec::new(),
                }
            })
            .collect();

        let mut edges = Vec::new();
        for from in 0..nodes.len() {
            let wanted = rng.gen_range(config.min_connections..=config.max_connections);
            for _ in 0..wanted {
                let mut target = None;
                for _ in 0..config.max_attempts {
                    let candidate = rng.gen_range(0..nodes.len());
                    if candidate != from && !nodes[from].connections.contains(&candidate) {
                        target = Some(candidate);
                        break;
                    }
                }
                let Some(to) = target else {
                    debug!(
                        node = from,
                        attempts = config.max_attempts,
                        "no free neighbour, skipping connection"
                    );
                    continue;
                };
                nodes[from].connections.push(to);
                scene.add_segment(nodes[from].position, nodes[to].position, EDGE_BRIGHTNESS);
                edges.push((from, to));
            }
        }

        let sources: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.connections.is_empty())
            .map(|(index, _)| index)
            .collect();
        let mut flows = Vec::new();
        if !sources.is_empty() {
            for _ in 0..config.flow_count {
                let start = sources[rng.gen_range(0..sources.len())];
                let Some(&end) = nodes[start].connections.choose(&mut rng) else {
                    continue;
                };
                let position = nodes[start].position;
                flows.push(Flow {
                    line: scene.add_segment(position, position, FLOW_BRIGHTNESS),
                    start,
                    end,
                    progress: 0.0,
                    speed: rng.gen_range(config.flow_speed.min..config.flow_speed.max),
                });
            }
        }

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            flows = flows.len(),
            "node graph built"
        );

        Self {
            nodes,
            edges,
            flows,
            node_spin: config.node_spin,
            scene_spin: config.scene_spin,
            reroute_probability: config.reroute_probability,
            rng,
        }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Accepted `(from, to)` connections in creation order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    /// Advance one frame.
    pub fn update(&mut self, scene: &mut Scene) {
        for node in &self.nodes {
            if let Some(transform) = scene.transform_mut(node.object) {
                transform.rotation.x += self.node_spin;
                transform.rotation.y += self.node_spin;
            }
        }

        for flow in &mut self.flows {
            advance_flow(flow, &self.nodes, self.reroute_probability, &mut self.rng);
            let start = self.nodes[flow.start].position;
            let end = self.nodes[flow.end].position;
            scene.set_segment(flow.line, start, start.lerp(end, flow.progress));
        }

        scene.root_mut().rotation.y += self.scene_spin;
    }
}

/// Move a pulse forward by its speed. Returns whether it wrapped.
///
/// On wrapping, progress restarts at zero and with `reroute_probability` the
/// pulse continues from its old end node towards one of that node's
/// neighbours. A node without neighbours keeps the previous pair.
pub fn advance_flow(
    flow: &mut Flow,
    nodes: &[GraphNode],
    reroute_probability: f32,
    rng: &mut impl Rng,
) -> bool {
    flow.progress += flow.speed;
    if flow.progress < 1.0 {
        return false;
    }
    flow.progress = 0.0;

    if rng.gen_bool(reroute_probability as f64) {
        match nodes[flow.end].connections.choose(rng) {
            Some(&next) => {
                trace!(from = flow.end, to = next, "pulse rerouted");
                flow.start = flow.end;
                flow.end = next;
            }
            None => trace!(node = flow.end, "reroute target has no edges, keeping pair"),
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn build(config: &GraphConfig, seed: u64) -> (NodeGraphAnimator, Scene) {
        let mut scene = Scene::new();
        let graph = NodeGraphAnimator::build(config, &mut scene, StdRng::seed_from_u64(seed));
        (graph, scene)
    }

    fn node(connections: Vec<usize>) -> GraphNode {
        GraphNode {
            position: Vec3::ZERO,
            object: Scene::new().add_point(Vec3::ZERO, 1.0),
            connections,
        }
    }

    #[test]
    fn test_builds_exactly_n_nodes() {
        for node_count in [1, 2, 5, 15, 40] {
            let config = GraphConfig {
                node_count,
                ..Default::default()
            };
            let (graph, _) = build(&config, 7);
            assert_eq!(graph.nodes().len(), node_count);
        }
    }

    #[test]
    fn test_tiny_bounds_place_nodes_at_origin() {
        let config = GraphConfig {
            bounds: f32::from_bits(1),
            ..Default::default()
        };
        let (graph, _) = build(&config, 7);
        assert_eq!(graph.nodes().len(), 15);
        assert!(graph.nodes().iter().all(|node| node.position.length() < 1e-30));
    }

    #[test]
    fn test_connection_counts() {
        let (graph, _) = build(&GraphConfig::default(), 42);
        for (index, node) in graph.nodes().iter().enumerate() {
            assert!(
                (2..=4).contains(&node.connections.len()),
                "node {index} has {} connections",
                node.connections.len()
            );
            assert!(!node.connections.contains(&index));
            let mut unique = node.connections.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), node.connections.len());
        }
    }

    #[test]
    fn test_single_node_has_no_edges_or_flows() {
        let config = GraphConfig {
            node_count: 1,
            ..Default::default()
        };
        let (graph, scene) = build(&config, 1);
        assert!(graph.edges().is_empty());
        assert!(graph.flows().is_empty());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_exhausted_connections_are_skipped() {
        // Two nodes can connect to each other at most once.
        let config = GraphConfig {
            node_count: 2,
            ..Default::default()
        };
        let (graph, _) = build(&config, 3);
        for node in graph.nodes() {
            assert!(node.connections.len() <= 1);
        }
    }

    #[test]
    fn test_same_seed_same_graph() {
        let config = GraphConfig::default();
        let (first, _) = build(&config, 2024);
        let (second, _) = build(&config, 2024);
        assert_eq!(first.edges(), second.edges());
        assert_eq!(first.flows(), second.flows());
        assert_eq!(first.flows().len(), 25);
    }

    #[test]
    fn test_flows_follow_edges() {
        let (graph, _) = build(&GraphConfig::default(), 11);
        for flow in graph.flows() {
            assert!(graph.nodes()[flow.start].connections.contains(&flow.end));
            assert!((0.005..0.02).contains(&flow.speed));
        }
    }

    #[test]
    fn test_progress_stays_below_one() {
        let (mut graph, mut scene) = build(&GraphConfig::default(), 5);
        for _ in 0..500 {
            graph.update(&mut scene);
            for flow in graph.flows() {
                assert!((0.0..1.0).contains(&flow.progress));
            }
        }
    }

    #[test]
    fn test_wrap_resets_progress() {
        let nodes = vec![node(vec![1]), node(vec![0])];
        let mut flow = Flow {
            line: nodes[0].object,
            start: 0,
            end: 1,
            progress: 0.95,
            speed: 0.1,
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(advance_flow(&mut flow, &nodes, 1.0, &mut rng));
        assert_eq!(flow.progress, 0.0);
        assert_eq!((flow.start, flow.end), (1, 0));

        assert!(!advance_flow(&mut flow, &nodes, 1.0, &mut rng));
        assert!((flow.progress - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_reroute_onto_dead_end_keeps_pair() {
        let nodes = vec![node(vec![1]), node(Vec::new())];
        let mut flow = Flow {
            line: nodes[0].object,
            start: 0,
            end: 1,
            progress: 0.99,
            speed: 0.02,
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(advance_flow(&mut flow, &nodes, 1.0, &mut rng));
        assert_eq!((flow.start, flow.end), (0, 1));
        assert_eq!(flow.progress, 0.0);
    }

    #[test]
    fn test_update_spins_scene_and_moves_pulses() {
        let (mut graph, mut scene) = build(&GraphConfig::default(), 9);
        graph.update(&mut scene);
        assert!((scene.root().rotation.y - 0.001).abs() < 1e-7);

        let flow = &graph.flows()[0];
        let start = graph.nodes()[flow.start].position;
        let end = graph.nodes()[flow.end].position;
        let object = scene.object(flow.line).expect("pulse line");
        assert_eq!(
            object.primitive,
            crate::scene::Primitive::Segment {
                start,
                end: start.lerp(end, flow.progress),
            }
        );
    }
}
