pub mod app;
pub mod buffer;
pub mod config;
pub mod error;
pub mod highlight;
pub mod logging;
pub mod mode;
pub mod session;
pub mod terminal;
pub mod ui;

pub use buffer::{Cursor, Document, Position, Row};
pub use config::EditorConfig;
pub use error::{EditorError, Result};
pub use highlight::{Grammar, HighlightSpan, HighlightType, Highlighter};
pub use mode::Mode;
pub use session::EditorSession;
pub use terminal::{Key, Terminal};
