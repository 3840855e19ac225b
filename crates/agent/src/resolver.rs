//! Tool-call resolver — classifies raw model output.
//!
//! The model signals a tool invocation by replying with exactly
//! `ToolName(arg)`: the whole trimmed output must be a word-character name
//! followed by a parenthesized argument, where the argument runs to the
//! final closing parenthesis and may span multiple lines. Anything else is
//! a direct answer. Parsing is a structural classification only; whether
//! the named tool exists is decided at dispatch time.

/// The classified form of one raw model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelReply {
    /// The output is the final answer, whitespace-trimmed.
    DirectAnswer(String),

    /// The output is a single tool invocation. `argument` is the literal
    /// text between the parentheses; `None` means the zero-argument form
    /// `ToolName()`.
    ToolInvocation {
        name: String,
        argument: Option<String>,
    },
}

/// Parse one raw model reply against the call grammar.
///
/// Grammar (over the whitespace-trimmed output): `NAME(ARG)` where `NAME`
/// is one or more word characters (letters, digits, underscore) and `ARG`
/// is everything up to the final `)`, captured literally — embedded
/// newlines and nested parentheses included. Only one call is recognized
/// per reply.
pub fn parse_reply(raw: &str) -> ModelReply {
    let trimmed = raw.trim();

    let Some(body) = trimmed.strip_suffix(')') else {
        return ModelReply::DirectAnswer(trimmed.to_string());
    };
    let Some(open) = body.find('(') else {
        return ModelReply::DirectAnswer(trimmed.to_string());
    };

    let name = &body[..open];
    if name.is_empty() || !name.chars().all(is_word_char) {
        return ModelReply::DirectAnswer(trimmed.to_string());
    }

    let argument = &body[open + 1..];
    ModelReply::ToolInvocation {
        name: name.to_string(),
        argument: if argument.is_empty() {
            None
        } else {
            Some(argument.to_string())
        },
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
