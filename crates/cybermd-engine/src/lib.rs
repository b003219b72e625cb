//! # CyberMD engine
//!
//! The Markdown pipeline behind the editor:
//!
//! ```text
//! edits ─▶ ReparseScheduler ─▶ parse ─▶ Ast ─▶ highlight ─▶ diff ─▶ ViewOps
//!            (debounce)         (off the UI thread)          (version-gated)
//! ```
//!
//! [`parsing`] and [`highlight`] are pure functions over text. The
//! [`schedule`] module decides when they run and [`session`] ties the
//! pieces together for a UI loop.

pub mod document;
pub mod error;
pub mod highlight;
pub mod outline;
pub mod parsing;
pub mod reconcile;
pub mod schedule;
pub mod session;
pub mod view;

pub use document::{Document, DocumentSnapshot};
pub use error::PassError;
pub use highlight::{HighlightRange, StyleTag, Theme, highlight};
pub use outline::{OutlineEntry, outline};
pub use parsing::{Ast, Node, NodeId, NodeKind, ParseOutcome, Span, parse, parse_with_diagnostics};
pub use reconcile::{HighlightState, ViewOp, diff};
pub use schedule::{
    BackgroundExecutor, DEFAULT_DEBOUNCE, InlineExecutor, PassExecutor, PassLimits,
    ReparseScheduler,
};
pub use session::{EditorSession, Status};
pub use view::StyleMap;
