//! The question walker: a state machine over a [`QuestionGraph`].
//!
//! A traversal starts at the graph's unique start node and advances one
//! answer at a time. Every transition records the chosen answer in the
//! session trail before moving on, so abandoning mid-traversal simply
//! leaves the trail at its last state. There is no back-navigation.

use super::model::{GraphError, Node, QuestionGraph};
use super::trail::AnswerTrail;

/// Where a traversal currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkerState {
    /// Showing the question with this node id.
    AtQuestion(String),
    /// The questionnaire is exhausted.
    Terminal,
}

#[derive(Debug)]
pub struct Walker<'g> {
    graph: &'g QuestionGraph,
    state: WalkerState,
}

impl<'g> Walker<'g> {
    /// Begin a traversal at the graph's start node.
    pub fn start(graph: &'g QuestionGraph) -> Self {
        Self {
            state: WalkerState::AtQuestion(graph.start().id.clone()),
            graph,
        }
    }

    /// Continue a traversal at the question with the given display name.
    pub fn resume(graph: &'g QuestionGraph, question_name: &str) -> Result<Self, GraphError> {
        let node = graph
            .node_by_name(question_name)
            .ok_or_else(|| GraphError::UnknownQuestion(question_name.to_string()))?;
        Ok(Self {
            state: WalkerState::AtQuestion(node.id.clone()),
            graph,
        })
    }

    pub fn state(&self) -> &WalkerState {
        &self.state
    }

    /// The question being shown, or `None` once terminal.
    pub fn current_question(&self) -> Option<&Node> {
        match &self.state {
            WalkerState::AtQuestion(id) => self.graph.node(id),
            WalkerState::Terminal => None,
        }
    }

    /// Apply one answer selection.
    ///
    /// Records `{question name: answer name}` in the trail, then follows
    /// the answer's outbound edge: to the next question, or to the
    /// terminal state when the answer has no outbound link.
    pub fn select(
        &mut self,
        answer_id: &str,
        trail: &mut AnswerTrail,
    ) -> Result<&WalkerState, GraphError> {
        let WalkerState::AtQuestion(question_id) = &self.state else {
            return Err(GraphError::TraversalComplete);
        };
        let question = self
            .graph
            .node(question_id)
            .ok_or_else(|| GraphError::UnknownNode(question_id.clone()))?;
        let answer = self
            .graph
            .node(answer_id)
            .ok_or_else(|| GraphError::UnknownNode(answer_id.to_string()))?;

        trail.record(&question.name, &answer.name);

        self.state = match self.graph.next_question(answer_id)? {
            Some(next) => WalkerState::AtQuestion(next.id.clone()),
            None => WalkerState::Terminal,
        };
        Ok(&self.state)
    }

    /// Render the current state as an HTML fragment: the question heading
    /// plus one button per reachable answer, or the thanks message once
    /// terminal. Rendering is idempotent for a given state and graph.
    pub fn render(&self) -> String {
        match self.current_question() {
            Some(question) => render_question(self.graph, question),
            None => render_terminal(),
        }
    }
}

/// HTML fragment for one question. Each button carries the question name
/// and the answer's node id as data attributes for the next selection.
pub fn render_question(graph: &QuestionGraph, question: &Node) -> String {
    let buttons: String = graph
        .answers_of(&question.id)
        .iter()
        .map(|answer| {
            format!(
                r#"<button class="btn btn-primary mr-2 answerbutton" data-question="{}" data-answer="{}">{}</button>"#,
                question.name, answer.id, answer.name
            )
        })
        .collect();

    format!(
        "<div class=\"py-3 mb-3\">\n  <h2>{}</h2>\n  {}\n</div>",
        question.name, buttons
    )
}

pub fn render_terminal() -> String {
    "<h2>Thanks</h2>".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::test_support::{chain_diagram, diagram, link, node};

    #[test]
    fn starts_at_the_node_without_inbound_links() {
        let payload = chain_diagram();
        let graph = QuestionGraph::from_value(&payload).unwrap();
        let walker = Walker::start(&graph);

        let html = walker.render();
        assert!(html.contains("<h2>Which track?</h2>"));
        assert!(html.contains("data-answer=\"a-web\""));
        assert!(html.contains(">Web Development</button>"));
    }

    #[test]
    fn walks_a_chain_to_the_terminal_state() {
        let payload = chain_diagram();
        let graph = QuestionGraph::from_value(&payload).unwrap();
        let mut walker = Walker::start(&graph);
        let mut trail = AnswerTrail::new();

        walker.select("a-web", &mut trail).unwrap();
        assert!(walker.render().contains("<h2>Full or part time?</h2>"));

        walker.select("a-full", &mut trail).unwrap();
        assert_eq!(walker.state(), &WalkerState::Terminal);
        assert_eq!(walker.render(), "<h2>Thanks</h2>");

        assert_eq!(trail.get("Which track?"), Some("Web Development"));
        assert_eq!(trail.get("Full or part time?"), Some("Full time"));
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn selecting_after_terminal_is_an_error() {
        let payload = chain_diagram();
        let graph = QuestionGraph::from_value(&payload).unwrap();
        let mut walker = Walker::start(&graph);
        let mut trail = AnswerTrail::new();

        walker.select("a-web", &mut trail).unwrap();
        walker.select("a-full", &mut trail).unwrap();

        let err = walker.select("a-full", &mut trail).unwrap_err();
        assert!(matches!(err, GraphError::TraversalComplete));
    }

    #[test]
    fn selecting_an_unknown_answer_is_an_error() {
        let payload = chain_diagram();
        let graph = QuestionGraph::from_value(&payload).unwrap();
        let mut walker = Walker::start(&graph);
        let mut trail = AnswerTrail::new();

        let err = walker.select("nope", &mut trail).unwrap_err();
        assert!(matches!(err, GraphError::UnknownNode(_)));
        assert!(trail.is_empty());
    }

    #[test]
    fn resume_finds_a_question_by_name() {
        let payload = chain_diagram();
        let graph = QuestionGraph::from_value(&payload).unwrap();

        let walker = Walker::resume(&graph, "Full or part time?").unwrap();
        assert!(walker.render().contains("<h2>Full or part time?</h2>"));

        let err = Walker::resume(&graph, "No such question").unwrap_err();
        assert!(matches!(err, GraphError::UnknownQuestion(_)));
    }

    #[test]
    fn rendering_is_idempotent() {
        let payload = diagram(
            vec![
                node("q", "Q", &[], &["l1"]),
                node("a", "A", &["l1"], &[]),
            ],
            vec![link("l1", "q", "a")],
        );
        let graph = QuestionGraph::from_value(&payload).unwrap();
        let walker = Walker::start(&graph);

        assert_eq!(walker.render(), walker.render());
    }
}
