//! termquery
//!
//! Write a SQL query in your editor, run it against a Databricks SQL
//! warehouse, and browse the result table in the terminal.
//!
//! Pure Core / Impure Shell: `model` and `state` hold data and transitions
//! with no I/O; `view`, `query`, `history` and `config` talk to the
//! terminal, the network and the filesystem.

pub mod config;
pub mod history;
pub mod logging;
pub mod model;
pub mod query;
pub mod state;
pub mod view;
