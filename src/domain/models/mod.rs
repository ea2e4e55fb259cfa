mod action;
mod attachment;
mod author;
mod backend;
mod event;
mod history;
mod loading;
mod message;
mod notice;
mod slash_commands;
mod template;
mod textarea;

pub use action::*;
pub use attachment::*;
pub use author::*;
pub use backend::*;
pub use event::*;
pub use history::*;
pub use loading::*;
pub use message::*;
pub use notice::*;
pub use slash_commands::*;
pub use template::*;
pub use textarea::*;
