//! Session and UI state machine.
//!
//! The session owns the file and everything rendered from it; the mode
//! machine around it is made of pure transitions testable without a TUI.

pub mod action_handler;
pub mod address;
pub mod app_state;
pub mod engine;
pub mod goto_input_handler;
pub mod session;

pub use action_handler::{handle_action, handle_resize, submit_goto_prompt};
pub use address::parse_address;
pub use app_state::{AppState, Mode};
pub use engine::Engine;
pub use session::HexSession;
