use crate::utils::find_telegram_link;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Stats,
    Unknown,
}

impl Command {
    /// Matches the first word case-insensitively, `/cmd@bot_username` included.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split_once('@').map_or(name, |(name, _)| name);

        Some(match name.to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "help" => Self::Help,
            "stats" => Self::Stats,
            _ => Self::Unknown,
        })
    }
}

/// What an inbound chat text asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRequest<'a> {
    Command(Command),
    Link(&'a str),
    Other,
}

impl<'a> ChatRequest<'a> {
    pub fn classify(text: &'a str) -> Self {
        let text = text.trim();
        if let Some(command) = Command::parse(text) {
            return Self::Command(command);
        }
        find_telegram_link(text).map_or(Self::Other, Self::Link)
    }
}
