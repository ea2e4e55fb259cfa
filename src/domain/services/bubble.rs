#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::Theme;

use super::Syntaxes;
use super::SYNTAX_SET;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub scrollbar_gutter: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

fn repeat_from_subtractions(text: &str, subtractions: Vec<usize>) -> String {
    let mut iter = subtractions.into_iter();
    let first = iter.next().unwrap_or(0);
    let count = iter.fold(first, |acc, e| return acc.saturating_sub(e));

    return text.repeat(count);
}

fn heading_level(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|c| return *c == '#').count();
    if (1..=6).contains(&level) && trimmed[level..].starts_with(' ') {
        return Some(level);
    }

    return None;
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        window_max_width: usize,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Columns kept clear on the right of every row for the scrollbar.
            scrollbar_gutter: 4,
            // left border + left padding + (text, not counted) + right padding + right border +
            // scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    /// Flattens rendered lines into plain strings, dropping styles.
    pub fn plain_text(lines: &[Line]) -> String {
        return lines
            .iter()
            .map(|line| {
                return line
                    .spans
                    .iter()
                    .map(|span| return span.content.to_string())
                    .collect::<Vec<String>>()
                    .join("");
            })
            .collect::<Vec<String>>()
            .join("\n");
    }

    /// Attachments are listed beneath the message text.
    fn text_lines(&self) -> Vec<String> {
        let mut lines = self
            .message
            .text
            .lines()
            .map(|line| return line.to_string())
            .collect::<Vec<String>>();

        if !self.message.attachments.is_empty() {
            if !lines.is_empty() {
                lines.push("".to_string());
            }
            for attachment in self.message.attachments.iter() {
                lines.push(format!(
                    "[file] {} ({})",
                    attachment.name,
                    attachment.display_size()
                ));
            }
        }

        return lines;
    }

    pub fn as_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        // Lazy default
        let mut highlight = HighlightLines::new(Syntaxes::get("text"), theme);
        let mut in_codeblock = false;
        let mut lines: Vec<Line<'static>> = vec![];

        let text_lines = self.text_lines();
        let max_line_length = self.get_max_line_length(&text_lines);

        for line in text_lines.iter() {
            let mut spans: Vec<Span<'static>> = vec![];

            if line.trim().starts_with("```") {
                if !in_codeblock {
                    let lang = line.trim().replace("```", "");
                    highlight = HighlightLines::new(Syntaxes::get(&lang), theme);
                    in_codeblock = true;
                } else {
                    in_codeblock = false;
                }
            } else if in_codeblock {
                // Highlighting doesn't work accurately unless each line is postfixed with '\n',
                // especially when dealing with multi-line code comments.
                let line_nl = format!("{line}\n");
                let highlighted = highlight
                    .highlight_line(&line_nl, &SYNTAX_SET)
                    .unwrap_or_default();

                spans = highlighted
                    .iter()
                    .enumerate()
                    .map(|(idx, segment)| {
                        let (style, content) = segment;
                        let mut text = content.to_string();
                        if idx == highlighted.len() - 1 {
                            text = text.trim_end().to_string();
                        }

                        return Span::styled(
                            text,
                            Style {
                                fg: Syntaxes::translate_colour(style.foreground),
                                ..Style::default()
                            },
                        );
                    })
                    .collect();
            } else if heading_level(line).is_some() {
                spans = vec![Span::styled(
                    line.to_owned(),
                    Style::default().add_modifier(Modifier::BOLD),
                )];
            }

            if spans.is_empty() {
                spans = vec![Span::styled(line.to_owned(), Style::default())];
            }

            let mut split_spans = vec![];
            let mut line_char_count = 0;

            for span in spans {
                if span.content.len() + line_char_count <= max_line_length {
                    line_char_count += span.content.len();
                    split_spans.push(span);
                    continue;
                }

                let mut word_set: Vec<&str> = vec![];

                for word in span.content.split(' ') {
                    if word.len() + line_char_count > max_line_length && line_char_count > 0 {
                        split_spans.push(Span::styled(word_set.join(" "), span.style));
                        lines.push(self.spans_to_line(split_spans, max_line_length));

                        split_spans = vec![];
                        word_set = vec![];
                        line_char_count = 0;
                    }

                    word_set.push(word);
                    line_char_count += word.len() + 1;
                }

                split_spans.push(Span::styled(word_set.join(" "), span.style));
            }

            lines.push(self.spans_to_line(split_spans, max_line_length));
        }

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn spans_to_line(&self, mut spans: Vec<Span<'static>>, max_line_length: usize) -> Line<'static> {
        let line_str_len: usize = spans.iter().map(|e| return e.content.len()).sum();
        let fill = repeat_from_subtractions(" ", vec![max_line_length, line_str_len]);

        let mut wrapped_spans = vec![self.highlight_span("│ ".to_string())];
        wrapped_spans.append(&mut spans);
        wrapped_spans.push(self.highlight_span(format!("{fill} │")));

        let drawn_width: usize = wrapped_spans
            .iter()
            .map(|e| return e.content.chars().count())
            .sum();
        let outer_bubble_padding = self.outer_padding(drawn_width);

        if self.alignment == BubbleAlignment::Left {
            wrapped_spans.push(Span::from(outer_bubble_padding));
            return Line::from(wrapped_spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(wrapped_spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self, text_lines: &[String]) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;
        let available = self.window_max_width.saturating_sub(line_border_width).max(1);

        let mut max_line_length = text_lines
            .iter()
            .map(|line| return line.len())
            .max()
            .unwrap_or(0)
            .min(available);

        let username = self.message.author.to_string();
        if max_line_length < username.len() {
            max_line_length = username.len();
        }

        return max_line_length;
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        // Add 2 for the vertical bars.
        let inner_bar = "─".repeat(max_line_length + 2);
        let top_left_border = "╭";
        let mut top_bar = format!("{top_left_border}{inner_bar}╮");
        let bottom_bar = format!("╰{inner_bar}╯");
        let bar_bubble_padding = self.outer_padding(bottom_bar.chars().count());

        let username = self.message.author.to_string();
        let top_replace = "─".repeat(username.chars().count());
        top_bar = top_bar.replacen(
            format!("{top_left_border}{top_replace}").as_str(),
            format!("{top_left_border}{username}").as_str(),
            1,
        );

        let (top, bottom) = match self.alignment {
            BubbleAlignment::Left => (
                format!("{top_bar}{bar_bubble_padding}"),
                format!("{bottom_bar}{bar_bubble_padding}"),
            ),
            BubbleAlignment::Right => (
                format!("{bar_bubble_padding}{top_bar}"),
                format!("{bar_bubble_padding}{bottom_bar}"),
            ),
        };

        let mut res = vec![self.highlight_line(top)];
        res.extend(lines);
        res.push(self.highlight_line(bottom));
        return res;
    }

    /// Spaces that bring a row of `drawn_width` columns out to the usable
    /// window width.
    fn outer_padding(&self, drawn_width: usize) -> String {
        return repeat_from_subtractions(
            " ",
            vec![
                self.window_max_width,
                drawn_width,
                Bubble::style_config().scrollbar_gutter,
            ],
        );
    }

    fn highlight_span(&self, text: String) -> Span<'static> {
        if self.message.message_type() == MessageType::Error {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Red),
                    ..Style::default()
                },
            );
        } else if self.message.author == Author::Bot {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Rgb(92, 148, 190)), // Steel blue
                    ..Style::default()
                },
            );
        }

        return Span::from(text);
    }

    fn highlight_line(&self, text: String) -> Line<'static> {
        return Line::from(self.highlight_span(text));
    }
}
