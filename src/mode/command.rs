/// Command-line mini-language entered after `:`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `q`: quit, refused while there are unsaved changes
    Quit,
    /// `q!`: quit without saving
    ForceQuit,
    /// `w` or `s`: save
    Write,
    /// `wq` or `sq`: save, then quit if the save worked
    WriteQuit,
}

impl Command {
    /// Parse a command line. Unknown input yields `None`.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        let line = line.strip_prefix(':').unwrap_or(line);
        match line {
            "q" => Some(Command::Quit),
            "q!" => Some(Command::ForceQuit),
            "w" | "s" => Some(Command::Write),
            "wq" | "sq" => Some(Command::WriteQuit),
            _ => None,
        }
    }
}
