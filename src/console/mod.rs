pub mod event;
pub mod runtime;
pub mod session;
pub mod terminal;

pub use event::ConsoleEvent;
pub use runtime::{Console, ConsoleSettings, Screen, HELP};
pub use session::ResultsSession;
pub use terminal::{parse_command, read_commands, TerminalScreen};
