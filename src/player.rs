//! Player identity: launch commands and display names.

use std::sync::Arc;

/// A registered tournament entrant.
#[derive(Debug)]
pub struct Player {
    /// Short display name used in tables and log file names.
    pub name: String,
    /// Shell command that launches the player.
    pub command: String,
}

/// Derives a display name from a launch command: the basename of its first
/// whitespace-separated token.
fn command_name(command: &str) -> String {
    let token = command.split_whitespace().next().unwrap_or(command);
    let name = token.rsplit('/').next().unwrap_or(token);
    if name.is_empty() {
        command.to_owned()
    } else {
        name.to_owned()
    }
}

/// Builds the shared player list, disambiguating clashing names with
/// `-1`, `-2`, ... suffixes in registration order.
pub fn register_players(commands: &[String]) -> Vec<Arc<Player>> {
    let names: Vec<String> = commands.iter().map(|c| command_name(c)).collect();
    let mut players = Vec::with_capacity(commands.len());
    for (index, command) in commands.iter().enumerate() {
        let clashes = names.iter().filter(|n| **n == names[index]).count();
        let name = if clashes > 1 {
            let ordinal = 1 + names[..index].iter().filter(|n| **n == names[index]).count();
            format!("{}-{}", names[index], ordinal)
        } else {
            names[index].clone()
        };
        players.push(Arc::new(Player {
            name,
            command: command.clone(),
        }));
    }
    players
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(commands: &[&str]) -> Vec<String> {
        let commands: Vec<String> = commands.iter().map(|c| c.to_string()).collect();
        register_players(&commands)
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    #[test]
    fn name_is_basename_of_first_token() {
        assert_eq!(
            names(&["./bots/alpha --depth 3", "python3 beta.py"]),
            ["alpha", "python3"]
        );
    }

    #[test]
    fn clashing_names_get_ordinals() {
        assert_eq!(
            names(&["./a", "bots/a --fast", "./b"]),
            ["a-1", "a-2", "b"]
        );
    }

    #[test]
    fn command_is_kept_verbatim() {
        let players = register_players(&["./bots/alpha --depth 3".to_string()]);
        assert_eq!(players[0].command, "./bots/alpha --depth 3");
    }
}
