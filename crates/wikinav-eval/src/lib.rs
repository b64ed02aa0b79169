//! Wikinav Eval - Drives models through benchmark games
//!
//! Provides the prompt contexts, the multi-hop and single-hop game loops,
//! result rows and their JSON/CSV rendering.

pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod report;
pub mod result;

pub use config::EvalConfig;
pub use context::ContextType;
pub use driver::EvaluationDriver;
pub use error::{EvalError, EvalResult};
pub use result::ResultRow;
