//! # Debate Core
//!
//! Domain logic for the debate gateway: the in-memory prompt template
//! store and the judgment-score parser. No I/O lives here.
//!
//! ## Quick Start
//!
//! ```rust
//! use debate_core::{PromptStore, parse_judgment};
//!
//! let store = PromptStore::builtin();
//! let prompt = store
//!     .render("opening_statement", &[("topic", "AI safety"), ("position", "PRO")])
//!     .unwrap();
//! assert!(prompt.contains("AI safety"));
//!
//! let judgment = parse_judgment("PRO: 8/10\nCON: 3/10\nWinner: PRO");
//! assert_eq!(judgment.pro_score, 8);
//! ```

pub mod judge;
pub mod prompts;

pub use judge::{parse_judgment, Judgment, DEFAULT_SCORE};
pub use prompts::{render, PromptStore, TemplateError};
