//! Question diagram wire format and the validated graph built from it.
//!
//! The admin back-office stores diagrams drawn in a node editor. The wire
//! envelope is `{payload: {model: {layers: [...]}}}` where one layer of
//! type "diagram-nodes" holds the question/answer nodes keyed by id and one
//! of type "diagram-links" holds the directed edges. [`QuestionGraph`]
//! parses that envelope and validates the structural assumptions the
//! walker relies on, so a malformed diagram is rejected up front with a
//! descriptive error instead of producing a broken questionnaire.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Layer type carrying the node models.
pub const NODES_LAYER: &str = "diagram-nodes";
/// Layer type carrying the link models.
pub const LINKS_LAYER: &str = "diagram-links";

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("diagram payload is not valid JSON for a diagram: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("diagram has no \"{0}\" layer")]
    MissingLayer(&'static str),

    #[error("diagram has no start node (a node whose inbound port has no links)")]
    NoStartNode,

    #[error("diagram has {0} start nodes, expected exactly one")]
    MultipleStartNodes(usize),

    #[error("link {link} references unknown node {node}")]
    DanglingLink { link: String, node: String },

    #[error("node {node} references unknown link {link}")]
    UnknownPortLink { node: String, link: String },

    #[error("diagram contains a cycle through node {0}")]
    Cycle(String),

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    #[error("the questionnaire is already complete")]
    TraversalComplete,
}

/// The stored diagram envelope, verbatim from the editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramPayload {
    pub payload: DiagramBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramBody {
    pub model: DiagramModel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramModel {
    pub layers: Vec<Layer>,
}

/// One diagram layer. Layers the graph does not care about (grids,
/// selection overlays) are carried along untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub models: BTreeMap<String, serde_json::Value>,
}

/// A question or answer node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ports: Vec<Port>,
}

/// A connection point on a node. The editor is inconsistent about whether
/// the direction lives in `label` or `name`, so both are honored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub links: Vec<String>,
}

impl Port {
    fn has_direction(&self, direction: &str) -> bool {
        self.label == direction || self.name == direction
    }
}

impl Node {
    /// The port with the given direction ("In"/"Out"), if any.
    pub fn port(&self, direction: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.has_direction(direction))
    }

    /// A node with no inbound links is a start-node candidate. A node
    /// without an "In" port counts the same as one with an empty link list.
    fn has_no_inbound_links(&self) -> bool {
        self.port("In").map(|p| p.links.is_empty()).unwrap_or(true)
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// An immutable, validated question graph.
///
/// Construction guarantees: exactly one start node, every link endpoint and
/// every port-attached link id resolves, and the link relation is acyclic.
/// The maps are ordered by id so iteration (and thus rendering) is
/// deterministic.
#[derive(Debug, Clone)]
pub struct QuestionGraph {
    nodes: BTreeMap<String, Node>,
    links: BTreeMap<String, Link>,
    start: String,
}

impl QuestionGraph {
    /// Build a graph from a raw stored diagram value.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, GraphError> {
        let payload: DiagramPayload = serde_json::from_value(value.clone())?;
        Self::from_payload(&payload)
    }

    /// Build a graph from a parsed diagram envelope.
    pub fn from_payload(payload: &DiagramPayload) -> Result<Self, GraphError> {
        let nodes = typed_layer::<Node>(&payload.payload.model.layers, NODES_LAYER)?;
        let links = typed_layer::<Link>(&payload.payload.model.layers, LINKS_LAYER)?;
        Self::from_parts(nodes, links)
    }

    fn from_parts(
        nodes: BTreeMap<String, Node>,
        links: BTreeMap<String, Link>,
    ) -> Result<Self, GraphError> {
        for link in links.values() {
            for endpoint in [&link.source, &link.target] {
                if !nodes.contains_key(endpoint) {
                    return Err(GraphError::DanglingLink {
                        link: link.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
        }

        for node in nodes.values() {
            for port in &node.ports {
                for link_id in &port.links {
                    if !links.contains_key(link_id) {
                        return Err(GraphError::UnknownPortLink {
                            node: node.id.clone(),
                            link: link_id.clone(),
                        });
                    }
                }
            }
        }

        let starts: Vec<&Node> = nodes
            .values()
            .filter(|n| n.has_no_inbound_links())
            .collect();
        let start = match starts.as_slice() {
            [] => return Err(GraphError::NoStartNode),
            [only] => only.id.clone(),
            many => return Err(GraphError::MultipleStartNodes(many.len())),
        };

        if let Some(node) = find_cycle(&nodes, &links) {
            return Err(GraphError::Cycle(node));
        }

        Ok(Self {
            nodes,
            links,
            start,
        })
    }

    /// The unique node with no inbound links.
    pub fn start(&self) -> &Node {
        &self.nodes[&self.start]
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// First node with the given display name, in id order.
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.name == name)
    }

    /// All answers directly reachable from a question: nodes at the target
    /// end of a link whose source is the question, in link-id order.
    pub fn answers_of(&self, question_id: &str) -> Vec<&Node> {
        self.links
            .values()
            .filter(|link| link.source == question_id)
            .filter_map(|link| self.nodes.get(&link.target))
            .collect()
    }

    /// Resolve the question that follows an answer, or `None` when the
    /// answer is terminal.
    ///
    /// Only the FIRST link attached to the answer's "Out" port is
    /// consulted; the next question is whichever link endpoint is not the
    /// answer itself. An answer without an "Out" port, or with an empty
    /// link list, ends the traversal.
    pub fn next_question(&self, answer_id: &str) -> Result<Option<&Node>, GraphError> {
        let answer = self
            .nodes
            .get(answer_id)
            .ok_or_else(|| GraphError::UnknownNode(answer_id.to_string()))?;

        let Some(link_id) = answer.port("Out").and_then(|p| p.links.first()) else {
            return Ok(None);
        };

        // Port links were validated at construction.
        let link = self
            .links
            .get(link_id)
            .ok_or_else(|| GraphError::UnknownPortLink {
                node: answer_id.to_string(),
                link: link_id.clone(),
            })?;

        let next_id = if link.target == answer.id {
            &link.source
        } else {
            &link.target
        };
        self.nodes
            .get(next_id)
            .map(Some)
            .ok_or_else(|| GraphError::DanglingLink {
                link: link.id.clone(),
                node: next_id.clone(),
            })
    }
}

/// Extract the models of the layer with the given type into typed values.
fn typed_layer<T: serde::de::DeserializeOwned>(
    layers: &[Layer],
    kind: &'static str,
) -> Result<BTreeMap<String, T>, GraphError> {
    let layer = layers
        .iter()
        .find(|l| l.kind == kind)
        .ok_or(GraphError::MissingLayer(kind))?;

    layer
        .models
        .iter()
        .map(|(id, value)| {
            let parsed: T = serde_json::from_value(value.clone())?;
            Ok((id.clone(), parsed))
        })
        .collect()
}

/// Depth-first search over the link relation (source → target). Returns a
/// node id on the first cycle found.
fn find_cycle(nodes: &BTreeMap<String, Node>, links: &BTreeMap<String, Link>) -> Option<String> {
    let mut adjacency: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for link in links.values() {
        adjacency
            .entry(link.source.as_str())
            .or_default()
            .push(link.target.as_str());
    }

    // 0 = unvisited, 1 = on the current path, 2 = done
    let mut state: BTreeMap<&str, u8> = BTreeMap::new();

    fn visit<'a>(
        node: &'a str,
        adjacency: &BTreeMap<&'a str, Vec<&'a str>>,
        state: &mut BTreeMap<&'a str, u8>,
    ) -> Option<String> {
        match state.get(node) {
            Some(1) => return Some(node.to_string()),
            Some(2) => return None,
            _ => {}
        }
        state.insert(node, 1);
        if let Some(next) = adjacency.get(node) {
            for &target in next {
                if let Some(found) = visit(target, adjacency, state) {
                    return Some(found);
                }
            }
        }
        state.insert(node, 2);
        None
    }

    for id in nodes.keys() {
        if let Some(found) = visit(id.as_str(), &adjacency, &mut state) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::test_support::{diagram, link, node};

    #[test]
    fn builds_a_valid_graph() {
        let payload = diagram(
            vec![
                node("q1", "Start?", &[], &["l1"]),
                node("a1", "Yes", &["l1"], &[]),
            ],
            vec![link("l1", "q1", "a1")],
        );

        let graph = QuestionGraph::from_value(&payload).unwrap();
        assert_eq!(graph.start().name, "Start?");
        let answers = graph.answers_of("q1");
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].name, "Yes");
    }

    #[test]
    fn rejects_a_diagram_without_a_start_node() {
        // Both nodes have inbound links.
        let payload = diagram(
            vec![
                node("a", "A", &["l2"], &["l1"]),
                node("b", "B", &["l1"], &["l2"]),
            ],
            vec![link("l1", "a", "b"), link("l2", "b", "a")],
        );

        // The cycle a -> b -> a leaves no start candidate.
        let err = QuestionGraph::from_value(&payload).unwrap_err();
        assert!(matches!(err, GraphError::NoStartNode));
    }

    #[test]
    fn rejects_multiple_start_nodes() {
        let payload = diagram(
            vec![node("a", "A", &[], &[]), node("b", "B", &[], &[])],
            vec![],
        );

        let err = QuestionGraph::from_value(&payload).unwrap_err();
        assert!(matches!(err, GraphError::MultipleStartNodes(2)));
    }

    #[test]
    fn rejects_a_dangling_link_endpoint() {
        let payload = diagram(
            vec![node("a", "A", &[], &["l1"])],
            vec![link("l1", "a", "missing")],
        );

        let err = QuestionGraph::from_value(&payload).unwrap_err();
        assert!(matches!(err, GraphError::DanglingLink { .. }));
    }

    #[test]
    fn rejects_a_port_referencing_an_unknown_link() {
        let payload = diagram(vec![node("a", "A", &[], &["ghost"])], vec![]);

        let err = QuestionGraph::from_value(&payload).unwrap_err();
        assert!(matches!(err, GraphError::UnknownPortLink { .. }));
    }

    #[test]
    fn rejects_a_cycle() {
        let payload = diagram(
            vec![
                node("start", "Start", &[], &["l1"]),
                node("a", "A", &["l1"], &["l2"]),
                node("b", "B", &["l2", "l3"], &["l3"]),
            ],
            vec![
                link("l1", "start", "a"),
                link("l2", "a", "b"),
                link("l3", "b", "b"),
            ],
        );

        let err = QuestionGraph::from_value(&payload).unwrap_err();
        assert!(matches!(err, GraphError::Cycle(_)));
    }

    #[test]
    fn next_question_follows_the_reverse_direction_of_a_link() {
        // The link is stored answer -> question; the walker still resolves
        // the opposite endpoint.
        let payload = diagram(
            vec![
                node("q1", "Q1", &[], &["l1"]),
                node("a1", "A1", &["l1"], &["l2"]),
                node("q2", "Q2", &["l2"], &[]),
            ],
            vec![link("l1", "q1", "a1"), link("l2", "a1", "q2")],
        );

        let graph = QuestionGraph::from_value(&payload).unwrap();
        let next = graph.next_question("a1").unwrap().unwrap();
        assert_eq!(next.id, "q2");
    }

    #[test]
    fn next_question_is_none_for_a_terminal_answer() {
        let payload = diagram(
            vec![
                node("q1", "Q1", &[], &["l1"]),
                node("a1", "A1", &["l1"], &[]),
            ],
            vec![link("l1", "q1", "a1")],
        );

        let graph = QuestionGraph::from_value(&payload).unwrap();
        assert!(graph.next_question("a1").unwrap().is_none());
    }
}
