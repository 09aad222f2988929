//! The branching-questionnaire subsystem.
//!
//! A diagram drawn in the admin back-office defines a directed graph of
//! question and answer nodes. [`QuestionGraph`] validates the stored
//! diagram, [`Walker`] drives a visitor through it one answer at a time,
//! and [`AnswerTrail`] is the client-persisted record of choices.

pub mod client;
pub mod model;
pub mod trail;
pub mod walker;

pub use client::{QuizClient, QuizClientError};
pub use model::{DiagramPayload, GraphError, Link, Node, Port, QuestionGraph};
pub use trail::AnswerTrail;
pub use walker::{render_question, render_terminal, Walker, WalkerState};
