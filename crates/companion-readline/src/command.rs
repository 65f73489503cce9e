//! REPL command parsing.

/// Slash commands offered for completion and hints.
pub const COMMANDS: &[&str] = &["/persona", "/personas", "/reset", "/history", "/save", "/help"];

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Plain text for the active persona.
    Chat(String),
    /// `/persona <name>`; `None` shows the active persona.
    Persona(Option<String>),
    Personas,
    Reset,
    History,
    Save,
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parses a trimmed, non-empty input line.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            return ReplCommand::Quit;
        }
        if !line.starts_with('/') {
            return ReplCommand::Chat(line.to_string());
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "/persona" => {
                ReplCommand::Persona((!rest.is_empty()).then(|| rest.to_string()))
            }
            "/personas" => ReplCommand::Personas,
            "/reset" => ReplCommand::Reset,
            "/history" => ReplCommand::History,
            "/save" => ReplCommand::Save,
            "/help" => ReplCommand::Help,
            "/quit" | "/exit" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(command.to_string()),
        }
    }
}

pub fn help_text() -> &'static str {
    "\
/persona <name>  switch persona (any name works; unknown names use the default replies)
/persona         show the active persona
/personas        list built-in and configured personas
/reset           clear the conversation
/history         show the conversation so far
/save            save the session now
/help            show this help
quit, exit       save and leave"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_chat() {
        assert_eq!(
            ReplCommand::parse("  오늘 정말 행복한 하루였어 "),
            ReplCommand::Chat("오늘 정말 행복한 하루였어".to_string())
        );
    }

    #[test]
    fn test_persona_with_name() {
        assert_eq!(
            ReplCommand::parse("/persona  my buddy"),
            ReplCommand::Persona(Some("my buddy".to_string()))
        );
        assert_eq!(ReplCommand::parse("/persona"), ReplCommand::Persona(None));
    }

    #[test]
    fn test_commands() {
        assert_eq!(ReplCommand::parse("/personas"), ReplCommand::Personas);
        assert_eq!(ReplCommand::parse("/reset"), ReplCommand::Reset);
        assert_eq!(ReplCommand::parse("/history"), ReplCommand::History);
        assert_eq!(ReplCommand::parse("/save"), ReplCommand::Save);
        assert_eq!(ReplCommand::parse("/help"), ReplCommand::Help);
    }

    #[test]
    fn test_quit_variants() {
        assert_eq!(ReplCommand::parse("quit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("EXIT"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/quit"), ReplCommand::Quit);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            ReplCommand::parse("/dance now"),
            ReplCommand::Unknown("/dance".to_string())
        );
    }

    #[test]
    fn test_every_listed_command_parses() {
        for command in COMMANDS {
            assert!(!matches!(
                ReplCommand::parse(command),
                ReplCommand::Unknown(_) | ReplCommand::Chat(_)
            ));
        }
    }
}
