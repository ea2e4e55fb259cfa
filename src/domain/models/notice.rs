use ratatui::style::Color;
use ratatui::style::Style;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// Short, non-blocking feedback shown above the prompt. Never part of the
/// transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: &str) -> Notice {
        return Notice {
            level: NoticeLevel::Info,
            text: text.to_string(),
        };
    }

    pub fn warning(text: &str) -> Notice {
        return Notice {
            level: NoticeLevel::Warning,
            text: text.to_string(),
        };
    }

    pub fn style(&self) -> Style {
        match self.level {
            NoticeLevel::Info => return Style::default().fg(Color::Cyan),
            NoticeLevel::Warning => return Style::default().fg(Color::Yellow),
        }
    }
}
