//! Slash commands understood by the REPL.

/// Commands offered for completion, in display order.
pub const COMMANDS: &[&str] = &["/new", "/persona", "/personas", "/nickname", "/quit"];

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text for the active persona.
    Say(String),
    /// Start over with the current persona.
    NewChat,
    /// Switch to the persona matching the query.
    SwitchPersona(String),
    /// List available personas.
    ListPersonas,
    /// Change how personas address the user.
    SetNickname(String),
    Quit,
    /// A slash command that is missing its argument or does not exist.
    Invalid(String),
}

impl Command {
    /// Classifies a raw input line. Plain text is kept as typed.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed == "quit" || trimmed == "exit" {
            return Command::Quit;
        }
        if !trimmed.starts_with('/') {
            return Command::Say(line.to_string());
        }

        let (name, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (trimmed, ""),
        };

        match (name, arg.is_empty()) {
            ("/new", _) => Command::NewChat,
            ("/personas", _) => Command::ListPersonas,
            ("/quit" | "/exit", _) => Command::Quit,
            ("/persona", false) => Command::SwitchPersona(arg.to_string()),
            ("/nickname", false) => Command::SetNickname(arg.to_string()),
            ("/persona", true) => Command::Invalid("Usage: /persona <name>".to_string()),
            ("/nickname", true) => Command::Invalid("Usage: /nickname <name>".to_string()),
            _ => Command::Invalid(format!("Unknown command: {name}")),
        }
    }
}
