use anyhow::Result;
use tui_textarea::Input;

use super::ChatResponse;
use super::Notice;

pub enum Event {
    BackendResponse(Result<ChatResponse>),
    Notice(Notice),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UITick(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
}
