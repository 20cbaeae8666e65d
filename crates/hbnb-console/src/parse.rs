//! Line parsing.
//!
//! Every input line is reduced to a canonical `<verb> <args>` form before
//! dispatch. The call form `<Kind>.<verb>(<args>)` is rewritten into the
//! same text the space-separated form would have produced, so both forms
//! share one code path and print identical output.

use serde_json::{Map, Value};

use crate::diagnostic::Diagnostic;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    Eof,
    All,
    Count,
    Create,
    Destroy,
    Help,
    Quit,
    Show,
    Update,
}

impl Verb {
    /// Every verb, in help-listing order.
    pub const ALL: [Verb; 9] = [
        Verb::Eof,
        Verb::All,
        Verb::Count,
        Verb::Create,
        Verb::Destroy,
        Verb::Help,
        Verb::Quit,
        Verb::Show,
        Verb::Update,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Verb::Eof => "EOF",
            Verb::All => "all",
            Verb::Count => "count",
            Verb::Create => "create",
            Verb::Destroy => "destroy",
            Verb::Help => "help",
            Verb::Quit => "quit",
            Verb::Show => "show",
            Verb::Update => "update",
        }
    }

    /// Look up a verb by its exact, case-sensitive name.
    pub fn from_word(word: &str) -> Option<Verb> {
        Verb::ALL.into_iter().find(|verb| verb.name() == word)
    }

    /// Whether `<Kind>.<verb>(...)` is accepted for this verb.
    pub fn accepts_call_form(&self) -> bool {
        matches!(
            self,
            Verb::All | Verb::Count | Verb::Create | Verb::Show | Verb::Destroy | Verb::Update
        )
    }

    pub fn usage(&self) -> &'static str {
        match self {
            Verb::Eof => "Exit the console at end of input.",
            Verb::All => "Print every instance, or every instance of one class.\n\
                          Usage: all [<class>] | <class>.all()",
            Verb::Count => "Print how many instances of a class exist.\n\
                            Usage: count <class> | <class>.count()",
            Verb::Create => "Create an instance, save it and print its id.\n\
                             Usage: create <class> | <class>.create()",
            Verb::Destroy => "Delete an instance by class and id.\n\
                              Usage: destroy <class> <id> | <class>.destroy(<id>)",
            Verb::Help => "List the commands, or describe one.\n\
                           Usage: help [<command>]",
            Verb::Quit => "Quit the console.",
            Verb::Show => "Print an instance by class and id.\n\
                           Usage: show <class> <id> | <class>.show(<id>)",
            Verb::Update => "Set one attribute, or several from a dictionary.\n\
                             Usage: update <class> <id> <attribute> <value>\n       \
                             update <class> <id> {\"<attribute>\": <value>, ...}\n       \
                             <class>.update(<id>, <attribute>, <value>)\n       \
                             <class>.update(<id>, {\"<attribute>\": <value>, ...})",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed line: the verb and the untouched remainder of the canonical text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub verb: Verb,
    pub args: String,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Invocation>, Diagnostic> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let canonical = rewrite_call(line).unwrap_or_else(|| line.to_string());
    let (word, args) = split_word(&canonical);
    let verb =
        Verb::from_word(word).ok_or_else(|| Diagnostic::UnknownSyntax(line.to_string()))?;
    Ok(Some(Invocation {
        verb,
        args: args.to_string(),
    }))
}

/// Rewrite `<Kind>.<verb>(<args>)` into `<verb> <Kind> <args>`.
///
/// Returns `None` when the line is not a well-formed call of a verb that
/// accepts the call form; such lines then fall through as unknown syntax.
pub fn rewrite_call(line: &str) -> Option<String> {
    let (kind, call) = line.split_once('.')?;
    if kind.is_empty() || kind.contains(char::is_whitespace) {
        return None;
    }
    let (method, rest) = call.split_once('(')?;
    let inner = rest.trim_end().strip_suffix(')')?;
    let verb = Verb::from_word(method)?;
    if !verb.accepts_call_form() {
        return None;
    }

    let args = call_arguments(inner);
    Some(if args.is_empty() {
        format!("{verb} {kind}")
    } else {
        format!("{verb} {kind} {args}")
    })
}

fn call_arguments(inner: &str) -> String {
    let inner = inner.trim();
    if inner.is_empty() {
        return String::new();
    }
    let (id, rest) = match inner.split_once(',') {
        Some((id, rest)) => (unquote(id.trim()), rest.trim()),
        None => (unquote(inner), ""),
    };
    if rest.is_empty() {
        return id.to_string();
    }
    if rest.starts_with('{') {
        return format!("{id} {rest}");
    }
    let (name, value) = match rest.split_once(',') {
        Some((name, value)) => (unquote(name.trim()), value.trim()),
        None => (unquote(rest), ""),
    };
    if value.is_empty() {
        format!("{id} {name}")
    } else {
        format!("{id} {name} {value}")
    }
}

/// Split off the first whitespace-delimited word; the remainder is trimmed.
pub fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

/// Strip one pair of matching surrounding quotes, if present.
pub fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|t| t.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

/// Interpret a raw value token: JSON literal if it parses as one, otherwise
/// the text itself with surrounding quotes removed.
///
/// Quoted text that contains its own quote character again is several
/// values, not one.
pub fn parse_value(raw: &str) -> Result<Value, Diagnostic> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Ok(value);
    }
    let inner = unquote(raw);
    let quoted = inner.len() < raw.len();
    if quoted && raw.chars().next().is_some_and(|quote| inner.contains(quote)) {
        return Err(Diagnostic::InvalidArgumentCount);
    }
    Ok(Value::String(inner.to_string()))
}

/// Parse a dictionary argument. Single-quoted keys and strings are accepted.
pub fn parse_dictionary(text: &str) -> Result<Map<String, Value>, Diagnostic> {
    serde_json::from_str::<Map<String, Value>>(text)
        .or_else(|_| serde_json::from_str(&text.replace('\'', "\"")))
        .map_err(|_| Diagnostic::InvalidDictionary)
}

/// The attribute change requested by the tail of an `update` line.
#[derive(Clone, Debug, PartialEq)]
pub enum Change {
    Attribute { name: String, value: Value },
    Attributes(Map<String, Value>),
}

/// Parse what follows `update <Kind> <id>`.
pub fn parse_change(args: &str) -> Result<Change, Diagnostic> {
    let args = args.trim();
    if args.is_empty() {
        return Err(Diagnostic::AttributeNameMissing);
    }
    if args.starts_with('{') {
        return parse_dictionary(args).map(Change::Attributes);
    }
    let (name, value) = split_word(args);
    if value.is_empty() {
        return Err(Diagnostic::ValueMissing);
    }
    Ok(Change::Attribute {
        name: unquote(name).to_string(),
        value: parse_value(value)?,
    })
}
