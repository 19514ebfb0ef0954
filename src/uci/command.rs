#[derive(Debug, Clone)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position(Vec<String>),
    Go(Vec<String>),
    SetOption(Vec<String>),
    Stop,
    Quit,
    Unknown(String),
}

#[derive(Default, Debug, Clone, Copy)]
pub struct GoParams {
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movetime: Option<u64>,
    pub nodes: Option<u64>,
    pub infinite: bool,
}

#[inline]
fn parse_next<T: std::str::FromStr>(parts: &[&str], i: usize) -> Option<T> {
    parts.get(i + 1).and_then(|v| v.parse::<T>().ok())
}

pub fn parse_go_params(parts: &[&str]) -> GoParams {
    let mut params = GoParams::default();
    let mut i = 1;
    while i < parts.len() {
        let consumed = match parts[i] {
            "wtime" => {
                params.wtime = parse_next(parts, i);
                2
            }
            "btime" => {
                params.btime = parse_next(parts, i);
                2
            }
            "winc" => {
                params.winc = parse_next(parts, i);
                2
            }
            "binc" => {
                params.binc = parse_next(parts, i);
                2
            }
            "movetime" => {
                params.movetime = parse_next(parts, i);
                2
            }
            "nodes" => {
                params.nodes = parse_next(parts, i);
                2
            }
            "infinite" => {
                params.infinite = true;
                1
            }
            _ => 1,
        };
        i += consumed;
    }
    params
}

pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    if parts.is_empty() {
        return None;
    }

    let owned_parts = || parts.iter().map(|p| (*p).to_string()).collect::<Vec<String>>();

    let cmd = match parts[0] {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(owned_parts()),
        "go" => UciCommand::Go(owned_parts()),
        "setoption" => UciCommand::SetOption(owned_parts()),
        "stop" => UciCommand::Stop,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(trimmed.to_string()),
    };

    Some(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_go_with_time_controls() {
        let parts: Vec<&str> = "go wtime 1000 btime 2000 winc 10 binc 20".split_whitespace().collect();
        let params = parse_go_params(&parts);
        assert_eq!(params.wtime, Some(1000));
        assert_eq!(params.btime, Some(2000));
        assert_eq!(params.winc, Some(10));
        assert_eq!(params.binc, Some(20));
        assert!(!params.infinite);
    }

    #[test]
    fn parses_go_with_nodes() {
        let parts: Vec<&str> = "go nodes 500".split_whitespace().collect();
        let params = parse_go_params(&parts);
        assert_eq!(params.nodes, Some(500));
    }

    #[test]
    fn empty_line_parses_to_none() {
        assert!(parse_uci_command("   ").is_none());
    }

    #[test]
    fn unrecognized_token_becomes_unknown() {
        match parse_uci_command("wobble") {
            Some(UciCommand::Unknown(s)) => assert_eq!(s, "wobble"),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }
}
