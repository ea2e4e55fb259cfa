use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    assert!(SlashCommand::parse("").is_none());
}

#[test]
fn it_parse_space_only() {
    assert!(SlashCommand::parse(" ").is_none());
}

#[test]
fn it_parse_single_slash() {
    assert!(SlashCommand::parse("/").is_none());
}

#[test]
fn it_parse_plain_text() {
    assert!(SlashCommand::parse("show slow queries").is_none());
}

#[test]
fn it_parse_valid_prefix() {
    let cmd = SlashCommand::parse("/q").unwrap();
    assert_eq!(cmd.command, "/q");
    assert!(cmd.args.is_empty());
}

#[test]
fn it_is_quit() {
    assert!(SlashCommand::parse("/q").unwrap().is_quit());
    assert!(SlashCommand::parse("/quit").unwrap().is_quit());
    assert!(SlashCommand::parse("/exit").unwrap().is_quit());
    assert!(!SlashCommand::parse("/help").unwrap().is_quit());
}

#[test]
fn it_is_attach_with_paths() {
    let cmd = SlashCommand::parse("/attach a.json  b.json").unwrap();
    assert!(cmd.is_attach());
    assert_eq!(cmd.args, vec!["a.json".to_string(), "b.json".to_string()]);

    assert!(SlashCommand::parse("/f a.json").unwrap().is_attach());
}

#[test]
fn it_is_detach() {
    let cmd = SlashCommand::parse("/d 2").unwrap();
    assert!(cmd.is_detach());
    assert_eq!(cmd.args, vec!["2".to_string()]);
}

#[test]
fn it_is_copy() {
    assert!(SlashCommand::parse("/c").unwrap().is_copy());
    assert!(SlashCommand::parse("/copy 3").unwrap().is_copy());
}

#[test]
fn it_is_template_toggle() {
    let cmd = SlashCommand::parse("/template").unwrap();
    assert!(cmd.is_template_toggle());
    assert!(!cmd.is_template_copy());
    assert!(!cmd.is_template_export());
}

#[test]
fn it_is_template_copy() {
    let cmd = SlashCommand::parse("/t copy").unwrap();
    assert!(cmd.is_template_copy());
    assert!(!cmd.is_template_toggle());
}

#[test]
fn it_is_template_export() {
    let cmd = SlashCommand::parse("/template export ./out.json").unwrap();
    assert!(cmd.is_template_export());
    assert_eq!(cmd.args[1], "./out.json");
}

#[test]
fn it_ignores_unknown_template_args() {
    assert!(SlashCommand::parse("/template frobnicate").is_none());
}

#[test]
fn it_is_help() {
    assert!(SlashCommand::parse("/h").unwrap().is_help());
    assert!(SlashCommand::parse("/help").unwrap().is_help());
}

#[test]
fn it_keeps_quoted_paths_together() {
    let cmd = SlashCommand::parse(r#"/attach "/tmp/my logs.json" 'other file.json' b.json"#).unwrap();
    assert_eq!(
        cmd.args,
        vec![
            "/tmp/my logs.json".to_string(),
            "other file.json".to_string(),
            "b.json".to_string()
        ]
    );
}

#[test]
fn it_keeps_escaped_spaces() {
    let cmd = SlashCommand::parse(r"/attach /tmp/my\ logs.json").unwrap();
    assert_eq!(cmd.args, vec!["/tmp/my logs.json".to_string()]);
}

#[test]
fn it_keeps_the_raw_remainder() {
    let cmd = SlashCommand::parse("/attach   /tmp/my logs.json  ").unwrap();
    assert_eq!(cmd.raw_args, "/tmp/my logs.json");
    assert_eq!(cmd.args.len(), 2);

    assert_eq!(SlashCommand::parse("/attach").unwrap().raw_args, "");
}
