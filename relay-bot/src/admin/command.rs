//! Admin command grammar.
//!
//! The leading `/word` token (an `@botname` suffix is ignored) is looked up in [`COMMANDS`].
//! A known command whose arguments do not fit answers with that command's usage. Anything
//! else, including unknown commands and plain text, is the relay-back action.

use crate::filter::WordListKind;

/// Whether a command must be sent as a reply to a forwarded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyContext {
    None,
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    AddWord { kind: WordListKind, word: String },
    Block,
    Unblock,
    CheckBlock,
    /// Copy the admin's message to the guest the replied-to message came from.
    RelayBack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Command {
        command: AdminCommand,
        context: ReplyContext,
    },
    /// Known command, unusable arguments.
    Usage(&'static str),
}

struct CommandSpec {
    name: &'static str,
    context: ReplyContext,
    usage: &'static str,
    build: fn(&str) -> Option<AdminCommand>,
}

fn add_word(kind: WordListKind, args: &str) -> Option<AdminCommand> {
    (!args.is_empty()).then(|| AdminCommand::AddWord {
        kind,
        word: args.to_string(),
    })
}

fn add_bad_word(args: &str) -> Option<AdminCommand> {
    add_word(WordListKind::Banned, args)
}

fn add_ad_word(args: &str) -> Option<AdminCommand> {
    add_word(WordListKind::Ad, args)
}

fn block(args: &str) -> Option<AdminCommand> {
    args.is_empty().then_some(AdminCommand::Block)
}

fn unblock(args: &str) -> Option<AdminCommand> {
    args.is_empty().then_some(AdminCommand::Unblock)
}

fn check_block(args: &str) -> Option<AdminCommand> {
    args.is_empty().then_some(AdminCommand::CheckBlock)
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "/addbadword",
        context: ReplyContext::None,
        usage: "使用方法: /addbadword <关键词>",
        build: add_bad_word,
    },
    CommandSpec {
        name: "/addadword",
        context: ReplyContext::None,
        usage: "使用方法: /addadword <关键词>",
        build: add_ad_word,
    },
    CommandSpec {
        name: "/block",
        context: ReplyContext::Required,
        usage: "使用方法: 回复转发的消息并发送 /block",
        build: block,
    },
    CommandSpec {
        name: "/unblock",
        context: ReplyContext::Required,
        usage: "使用方法: 回复转发的消息并发送 /unblock",
        build: unblock,
    },
    CommandSpec {
        name: "/checkblock",
        context: ReplyContext::Required,
        usage: "使用方法: 回复转发的消息并发送 /checkblock",
        build: check_block,
    },
];

pub fn parse(text: &str) -> ParsedCommand {
    let relay_back = ParsedCommand::Command {
        command: AdminCommand::RelayBack,
        context: ReplyContext::Required,
    };

    let text = text.trim();
    if !text.starts_with('/') {
        return relay_back;
    }
    let (token, args) = text
        .split_once(char::is_whitespace)
        .map_or((text, ""), |(t, a)| (t, a.trim()));
    let name = token.split('@').next().unwrap_or(token);

    match COMMANDS.iter().find(|spec| spec.name == name) {
        Some(spec) => match (spec.build)(args) {
            Some(command) => ParsedCommand::Command {
                command,
                context: spec.context,
            },
            None => ParsedCommand::Usage(spec.usage),
        },
        None => relay_back,
    }
}
