//! Request handlers.

pub mod annotations;
pub mod health;
pub mod logs;
pub mod videos;

pub use annotations::*;
pub use health::*;
pub use logs::*;
pub use videos::*;
