/// A line typed into the terminal adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Raw search-box content, debounced by the controller.
    Input(String),
    /// Search immediately, skipping the quiet period.
    Search(String),
    LoadMore,
    Retry,
    Quit,
    Help,
}

pub(crate) const HELP: &str =
    "type to search, :search <term>, :more, :retry, :help, :quit (empty line = popular)";

pub(crate) fn parse(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Input(line.to_string());
    };
    let (name, argument) = rest.split_once(' ').unwrap_or((rest, ""));
    match name {
        "search" | "s" => Command::Search(argument.trim().to_string()),
        "more" | "m" => Command::LoadMore,
        "retry" | "r" => Command::Retry,
        "quit" | "q" => Command::Quit,
        "help" | "h" => Command::Help,
        _ => Command::Input(line.to_string()),
    }
}
