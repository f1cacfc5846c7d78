pub(crate) mod ast;
pub(crate) mod converter;
pub mod error;
pub(crate) mod fragments;
pub mod metrics;
pub(crate) mod names;
pub(crate) mod namespace_tree;
pub mod options;
pub mod orchestrator;
pub(crate) mod printer;
pub(crate) mod walker;
