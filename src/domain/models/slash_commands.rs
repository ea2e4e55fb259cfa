#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
    /// Everything after the command, untouched.
    pub raw_args: String,
}

/// Splits on whitespace, keeping quoted runs together. A backslash escapes
/// the next character outside of single quotes, so `my\ logs.json` and
/// `"my logs.json"` are both one argument.
fn split_args(text: &str) -> Vec<String> {
    let mut args = vec![];
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => {
                quote = None;
            }
            (Some('\''), c) => {
                current.push(c);
            }
            (_, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_arg = true;
            }
            (None, '"' | '\'') => {
                quote = Some(c);
                in_arg = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            (_, c) => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if in_arg {
        args.push(current);
    }

    return args;
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let (prefix, raw_args) = text
            .split_once(char::is_whitespace)
            .map(|(prefix, rest)| return (prefix, rest.trim()))
            .unwrap_or((text, ""));

        let cmd = SlashCommand {
            command: prefix.to_string(),
            args: split_args(raw_args),
            raw_args: raw_args.to_string(),
        };
        if cmd.is_quit()
            || cmd.is_attach()
            || cmd.is_detach()
            || cmd.is_copy()
            || cmd.is_template_toggle()
            || cmd.is_template_copy()
            || cmd.is_template_export()
            || cmd.is_help()
        {
            return Some(cmd);
        }

        return None;
    }

    fn is_template(&self) -> bool {
        return ["/t", "/template"].contains(&self.command.as_str());
    }

    fn first_arg(&self) -> Option<&str> {
        return self.args.first().map(|e| return e.as_str());
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_attach(&self) -> bool {
        return ["/f", "/attach"].contains(&self.command.as_str());
    }

    pub fn is_detach(&self) -> bool {
        return ["/d", "/detach"].contains(&self.command.as_str());
    }

    pub fn is_copy(&self) -> bool {
        return ["/c", "/copy"].contains(&self.command.as_str());
    }

    pub fn is_template_toggle(&self) -> bool {
        return self.is_template() && self.args.is_empty();
    }

    pub fn is_template_copy(&self) -> bool {
        return self.is_template() && self.first_arg() == Some("copy");
    }

    pub fn is_template_export(&self) -> bool {
        return self.is_template() && self.first_arg() == Some("export");
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }
}
