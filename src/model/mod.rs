//! Domain model: interval arithmetic, byte chunks, errors and key actions.

pub mod chunk;
pub mod error;
pub mod key_action;
pub mod window;

pub use chunk::ByteChunk;
pub use error::{
    AddressError, AppError, ColumnError, InputError, PluginError, SessionError, SurfaceError,
    WindowError,
};
pub use key_action::KeyAction;
pub use window::Window;
