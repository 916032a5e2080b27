pub mod clipboard;
pub mod menu;
pub mod results;
pub mod search;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use menu::{render_form, render_menu};
pub use results::{format_record, ResultsView, EMPTY_HINT, EMPTY_TITLE};
pub use search::SearchBar;
