use crate::client::state::EditField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Home,
    List,
    Add,
    Search(String),
    Page(usize),
    Edit(usize),
    Set(EditField, String),
    Save,
    Cancel,
    Delete(usize),
    Help,
    Quit,
}

fn position(arg: &str, usage: &str) -> Result<usize, String> {
    arg.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("Usage: {}", usage))
}

/// Parses one line of terminal input.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

    match word.to_lowercase().as_str() {
        "home" => Ok(Command::Home),
        "list" | "posts" => Ok(Command::List),
        "add" => Ok(Command::Add),
        "search" => Ok(Command::Search(rest.trim().to_string())),
        "page" => position(rest, "page <n>").map(Command::Page),
        "edit" => position(rest, "edit <n>").map(Command::Edit),
        "delete" => position(rest, "delete <n>").map(Command::Delete),
        "set" => {
            let (field, value) = rest.trim().split_once(' ').unwrap_or((rest.trim(), ""));
            let field = field.parse::<EditField>()?;
            Ok(Command::Set(field, value.trim().to_string()))
        }
        "save" => Ok(Command::Save),
        "cancel" => Ok(Command::Cancel),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err("Type 'help' to see the commands".to_string()),
        other => Err(format!("Unknown command '{}'; type 'help'", other)),
    }
}
