//! Chat command recognition

/// A recognized slash command with its raw argument text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Help { fields: bool },
    Ping,
    Add(String),
    New,
    Cancel,
    Search(String),
    Get(String),
    Count,
    Recent(String),
    List(String),
    Brand(String),
    LowStock(String),
    Stats,
    Duplicates,
    Export(String),
    Backup,
    Unknown(String),
}

impl BotCommand {
    /// Parse a message. Returns `None` for text that is not a command.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let rest = text.strip_prefix('/')?;
        let (head, args) = match rest.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (rest, ""),
        };
        // `/get@inventory_bot` in group chats
        let name = head.split('@').next().unwrap_or(head).to_lowercase();
        let args = args.to_string();

        let command = match name.as_str() {
            "start" | "help" => BotCommand::Help {
                fields: args.eq_ignore_ascii_case("fields"),
            },
            "ping" => BotCommand::Ping,
            "add" => BotCommand::Add(args),
            "new" => BotCommand::New,
            "cancel" => BotCommand::Cancel,
            "search" => BotCommand::Search(args),
            "get" => BotCommand::Get(args),
            "count" | "c" => BotCommand::Count,
            "recent" | "ls" => BotCommand::Recent(args),
            "list" => BotCommand::List(args),
            "brand" => BotCommand::Brand(args),
            "lowstock" => BotCommand::LowStock(args),
            "stats" | "inv" => BotCommand::Stats,
            "duplicates" => BotCommand::Duplicates,
            "export" => BotCommand::Export(args),
            "backup" => BotCommand::Backup,
            _ => BotCommand::Unknown(name),
        };
        Some(command)
    }

    /// Command name for logging
    pub fn name(&self) -> &str {
        match self {
            BotCommand::Help { .. } => "help",
            BotCommand::Ping => "ping",
            BotCommand::Add(_) => "add",
            BotCommand::New => "new",
            BotCommand::Cancel => "cancel",
            BotCommand::Search(_) => "search",
            BotCommand::Get(_) => "get",
            BotCommand::Count => "count",
            BotCommand::Recent(_) => "recent",
            BotCommand::List(_) => "list",
            BotCommand::Brand(_) => "brand",
            BotCommand::LowStock(_) => "lowstock",
            BotCommand::Stats => "stats",
            BotCommand::Duplicates => "duplicates",
            BotCommand::Export(_) => "export",
            BotCommand::Backup => "backup",
            BotCommand::Unknown(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(BotCommand::parse("hello"), None);
        assert_eq!(BotCommand::parse(""), None);
    }

    #[test]
    fn test_args_and_bot_suffix() {
        assert_eq!(
            BotCommand::parse("/search@frames_bot  brand=ray  color=black "),
            Some(BotCommand::Search("brand=ray  color=black".to_string()))
        );
        assert_eq!(BotCommand::parse("/GET 5"), Some(BotCommand::Get("5".to_string())));
        assert_eq!(BotCommand::parse("/add"), Some(BotCommand::Add(String::new())));
    }

    #[test]
    fn test_aliases() {
        assert_eq!(BotCommand::parse("/ls 3"), Some(BotCommand::Recent("3".to_string())));
        assert_eq!(BotCommand::parse("/inv"), Some(BotCommand::Stats));
        assert_eq!(BotCommand::parse("/c"), Some(BotCommand::Count));
        assert_eq!(BotCommand::parse("/help fields"), Some(BotCommand::Help { fields: true }));
        assert_eq!(BotCommand::parse("/start"), Some(BotCommand::Help { fields: false }));
    }

    #[test]
    fn test_unknown_command() {
        let cmd = BotCommand::parse("/delete 4").unwrap();
        assert_eq!(cmd, BotCommand::Unknown("delete".to_string()));
        assert_eq!(cmd.name(), "delete");
    }
}
