mod input;
mod render;
mod summarize;

pub use input::load_props;
pub use render::{RenderArguments, handle_render};
pub use summarize::{format_summary, handle_summarize};
