//! Server-side rendering helpers shared by pages: markdown, syntax
//! highlighting, and the display fallbacks for missing backend data.

pub mod display;
pub mod markdown;

pub use display::{avatar_color, avatar_initial, expires_label, relative_time};
pub use markdown::{highlight_code, markdown_to_html};
