pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
mod chat_session;
pub mod clipboard;
pub mod events;
mod scroll;
mod syntaxes;
mod themes;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use chat_session::*;
pub use scroll::*;
pub use syntaxes::*;
pub use themes::*;
