//! Built-in commands
//!
//! Recognises the first four steps of resolution:
//! 1. `$clear history`
//! 2. `$engine add`
//! 3. a single-word command key (`$font`, `$help`, `$engine`, `$history`,
//!    `open`, `search`, `history`, `bookmarks`)
//! 4. `tabs list|close|open`
//!
//! Keys and sub-commands are case-insensitive. Engine names and plain
//! searches are resolved by the interpreter, which needs the registry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKey {
    /// `$font <percent>`
    Font,
    /// `$help`
    Help,
    /// `$engine [name]`
    Engine,
    /// `$history <days>`: browser visits
    BrowsingHistory,
    /// `open <url>`
    Open,
    /// `search <query>`
    Search,
    /// `history`: lines typed into the popup
    History,
    /// `bookmarks <term>`
    Bookmarks,
}

impl CommandKey {
    pub const ALL: [CommandKey; 8] = [
        CommandKey::Font,
        CommandKey::Help,
        CommandKey::Engine,
        CommandKey::BrowsingHistory,
        CommandKey::Open,
        CommandKey::Search,
        CommandKey::History,
        CommandKey::Bookmarks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKey::Font => "$font",
            CommandKey::Help => "$help",
            CommandKey::Engine => "$engine",
            CommandKey::BrowsingHistory => "$history",
            CommandKey::Open => "open",
            CommandKey::Search => "search",
            CommandKey::History => "history",
            CommandKey::Bookmarks => "bookmarks",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        Self::ALL.into_iter().find(|key| key.as_str() == token)
    }

    /// Whether the handler refuses to run without arguments.
    pub fn requires_argument(&self) -> bool {
        matches!(
            self,
            CommandKey::Font
                | CommandKey::BrowsingHistory
                | CommandKey::Open
                | CommandKey::Search
                | CommandKey::Bookmarks
        )
    }

    pub fn usage(&self) -> &'static str {
        match self {
            CommandKey::Font => "Usage: $font <percent>",
            CommandKey::Help => "Usage: $help",
            CommandKey::Engine => "Usage: $engine [name]",
            CommandKey::BrowsingHistory => "Usage: $history <days>",
            CommandKey::Open => "Usage: open <url>",
            CommandKey::Search => "Usage: search <query>",
            CommandKey::History => "Usage: history",
            CommandKey::Bookmarks => "Usage: bookmarks <term>",
        }
    }
}

impl std::fmt::Display for CommandKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabsCommand {
    List,
    Close,
    Open,
}

impl TabsCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabsCommand::List => "list",
            TabsCommand::Close => "close",
            TabsCommand::Open => "open",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "list" => Some(TabsCommand::List),
            "close" => Some(TabsCommand::Close),
            "open" => Some(TabsCommand::Open),
            _ => None,
        }
    }

    pub fn requires_argument(&self) -> bool {
        !matches!(self, TabsCommand::List)
    }

    pub fn usage(&self) -> &'static str {
        match self {
            TabsCommand::List => "Usage: tabs list",
            TabsCommand::Close => "Usage: tabs close <id|keyword>",
            TabsCommand::Open => "Usage: tabs open <url>",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    ClearHistory,
    StartAddEngine,
    Builtin { key: CommandKey, args: Vec<String> },
    Tabs { sub: TabsCommand, args: Vec<String> },
}

impl Command {
    /// Parse a line into a built-in command, or `None` when the line must be
    /// tried as an engine name or a search.
    pub fn parse(input: &str) -> Option<Self> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let (first, rest) = tokens.split_first()?;

        if let [second] = rest {
            if first.eq_ignore_ascii_case("$clear") && second.eq_ignore_ascii_case("history") {
                return Some(Command::ClearHistory);
            }
        }

        if first.eq_ignore_ascii_case("$engine")
            && rest.first().is_some_and(|s| s.eq_ignore_ascii_case("add"))
        {
            return Some(Command::StartAddEngine);
        }

        if let Some(key) = CommandKey::from_token(first) {
            return Some(Command::Builtin {
                key,
                args: to_args(rest),
            });
        }

        if first.eq_ignore_ascii_case("tabs") {
            let (sub, args) = rest.split_first()?;
            let sub = TabsCommand::from_token(sub)?;
            return Some(Command::Tabs {
                sub,
                args: to_args(args),
            });
        }

        None
    }
}

fn to_args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

/// Lines printed by `$help`.
pub const HELP: &[(&str, &str)] = &[
    ("$clear history", "Clears the command history."),
    ("$font <number>", "Adjusts the font size to <number>%. Default is 100%."),
    ("$help", "Displays this help information."),
    ("$engine", "Lists the search engines."),
    ("$engine <name>", "Switches to the named search engine."),
    ("$engine add", "Adds a custom search engine."),
    ("$history <days>", "Shows browsing history for the past <days> days."),
    ("open <url>", "Opens <url> in a new tab."),
    ("search <query>", "Searches for <query> in a new tab."),
    ("history", "Lists the commands typed so far."),
    ("bookmarks <term>", "Searches bookmarks for <term>."),
    ("tabs list", "Lists open tabs."),
    ("tabs close <id|keyword>", "Closes the tab with that id or matching that keyword."),
    ("tabs open <url>", "Opens <url> in a new tab."),
    ("<engine name>", "Switches to that search engine."),
    ("Any other text", "Performs a search."),
];
