use crate::error::Result;
use crate::search::SearchConfig;

fn print_spin(name: &str, default: impl std::fmt::Display, min: impl std::fmt::Display, max: impl std::fmt::Display) {
    println!("option name {name} type spin default {default} min {min} max {max}");
}

fn print_check(name: &str, default: bool) {
    println!("option name {name} type check default {}", if default { "true" } else { "false" });
}

pub fn print_id_and_options(config: &SearchConfig) {
    println!("id name zero_chess");
    println!("id author the zero_chess contributors");

    print_spin("playouts", config.num_rounds, 1, 100_000);
    print_check("noise", config.add_noise);

    println!("uciok");
}

/// Splits `setoption name <n...> value <v...>` into `(name, value)`, joining
/// multi-word names/values the way `go`/`position` joins multi-token fields.
pub fn parse_setoption(parts: &[&str]) -> Option<(String, Option<String>)> {
    if parts.is_empty() || parts[0] != "setoption" {
        return None;
    }

    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut mode = "";

    for part in parts.iter().skip(1) {
        match *part {
            "name" => mode = "name",
            "value" => mode = "value",
            _ => match mode {
                "name" => name_parts.push(part),
                "value" => value_parts.push(part),
                _ => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }

    let name = name_parts.join(" ").to_ascii_lowercase();
    let value = if value_parts.is_empty() { None } else { Some(value_parts.join(" ")) };
    Some((name, value))
}

pub fn apply_setoption(config: &mut SearchConfig, name: &str, value: Option<&str>) -> Result<()> {
    let value = value.unwrap_or("");
    config.set_option(name, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multi_word_value() {
        let parts: Vec<&str> = "setoption name playouts value 400".split_whitespace().collect();
        let (name, value) = parse_setoption(&parts).unwrap();
        assert_eq!(name, "playouts");
        assert_eq!(value.as_deref(), Some("400"));
    }

    #[test]
    fn missing_name_is_none() {
        let parts: Vec<&str> = "setoption value 400".split_whitespace().collect();
        assert!(parse_setoption(&parts).is_none());
    }

    #[test]
    fn apply_updates_round_budget() {
        let mut config = SearchConfig::default();
        apply_setoption(&mut config, "playouts", Some("123")).unwrap();
        assert_eq!(config.num_rounds, 123);
    }
}
