use once_cell::sync::Lazy;
use ratatui::style::Color;
use syntect::parsing::SyntaxReference;
use syntect::parsing::SyntaxSet;

pub static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

pub struct Syntaxes {}

impl Syntaxes {
    /// Resolves a code fence info string to a syntax, falling back to plain
    /// text. Log analysis replies mostly carry SQL and JSON.
    pub fn get(name: &str) -> &'static SyntaxReference {
        let name = name.trim().to_lowercase();
        let alias = match name.as_str() {
            "postgres" | "postgresql" | "psql" | "mysql" | "sqlite" | "plpgsql" => "sql",
            "jsonl" | "ndjson" => "json",
            "shell" | "console" => "sh",
            other => other,
        };

        return SYNTAX_SET
            .find_syntax_by_token(alias)
            .unwrap_or_else(|| return SYNTAX_SET.find_syntax_plain_text());
    }

    pub fn translate_colour(colour: syntect::highlighting::Color) -> Option<Color> {
        if colour.a == 0 {
            return None;
        }

        return Some(Color::Rgb(colour.r, colour.g, colour.b));
    }
}
