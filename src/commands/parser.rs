//! User command parsing
//!
//! Turns a line typed at the `ftp>` prompt into a `UserCommand`. Nothing here
//! knows FTP wire syntax; verbs map onto `FtpClient` operations.

/// A command typed by the user
#[derive(Debug, PartialEq)]
pub enum UserCommand {
    Empty,
    Open { host: String, port: Option<u16> },
    User(String),
    Pass(String),
    Dir(Option<String>),
    Cd(String),
    Get { remote: String, local: Option<String> },
    Put { local: String, remote: Option<String> },
    Close,
    Quit,
    /// Known verb with wrong arguments; carries the message to print
    Usage(&'static str),
    InvalidPort(String),
    Unknown(String),
}

/// What the REPL does after a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    Continue,
    Quit,
}

// Parse a raw input line into UserCommand
pub fn parse_command(raw: &str) -> UserCommand {
    let mut parts = raw.split_whitespace();
    let Some(verb) = parts.next() else {
        return UserCommand::Empty;
    };
    let args: Vec<String> = parts.map(str::to_string).collect();
    let arg = |i: usize| args.get(i).cloned();

    match verb.to_ascii_lowercase().as_str() {
        "open" => match args.as_slice() {
            [host] => UserCommand::Open {
                host: host.clone(),
                port: None,
            },
            [host, port, ..] => match port.parse::<u16>() {
                Ok(p) if p != 0 => UserCommand::Open {
                    host: host.clone(),
                    port: Some(p),
                },
                _ => UserCommand::InvalidPort(port.clone()),
            },
            [] => UserCommand::Usage("Usage: open <host> [port]"),
        },
        "user" => match args.as_slice() {
            [name] => UserCommand::User(name.clone()),
            _ => UserCommand::Usage("Usage: user <username>"),
        },
        "pass" => match args.as_slice() {
            [password] => UserCommand::Pass(password.clone()),
            _ => UserCommand::Usage("Usage: pass <password>"),
        },
        "dir" | "ls" => UserCommand::Dir(arg(0)),
        "cd" => match args.as_slice() {
            [path] => UserCommand::Cd(path.clone()),
            _ => UserCommand::Usage("Usage: cd <path>"),
        },
        "get" => match arg(0) {
            Some(remote) => UserCommand::Get {
                remote,
                local: arg(1),
            },
            None => UserCommand::Usage("Usage: get <remote> [local]"),
        },
        "put" => match arg(0) {
            Some(local) => UserCommand::Put {
                local,
                remote: arg(1),
            },
            None => UserCommand::Usage("Usage: put <local> [remote]"),
        },
        "close" => UserCommand::Close,
        "quit" | "bye" => UserCommand::Quit,
        other => UserCommand::Unknown(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command(""), UserCommand::Empty);
        assert_eq!(parse_command("   "), UserCommand::Empty);
        assert_eq!(parse_command("quit"), UserCommand::Quit);
        assert_eq!(parse_command("BYE"), UserCommand::Quit);
        assert_eq!(parse_command("close"), UserCommand::Close);
        assert_eq!(parse_command("dir"), UserCommand::Dir(None));
        assert_eq!(parse_command("ls /pub"), UserCommand::Dir(Some("/pub".into())));
    }

    #[test]
    fn test_parse_open() {
        assert_eq!(
            parse_command("open ftp.example.com"),
            UserCommand::Open {
                host: "ftp.example.com".into(),
                port: None
            }
        );
        assert_eq!(
            parse_command("OPEN localhost 2121"),
            UserCommand::Open {
                host: "localhost".into(),
                port: Some(2121)
            }
        );
        assert_eq!(
            parse_command("open localhost port"),
            UserCommand::InvalidPort("port".into())
        );
        assert!(matches!(parse_command("open"), UserCommand::Usage(_)));
    }

    #[test]
    fn test_parse_transfers() {
        assert_eq!(
            parse_command("get report.txt"),
            UserCommand::Get {
                remote: "report.txt".into(),
                local: None
            }
        );
        assert_eq!(
            parse_command("get /pub/a.bin b.bin"),
            UserCommand::Get {
                remote: "/pub/a.bin".into(),
                local: Some("b.bin".into())
            }
        );
        assert_eq!(
            parse_command("put notes.md remote.md"),
            UserCommand::Put {
                local: "notes.md".into(),
                remote: Some("remote.md".into())
            }
        );
        assert!(matches!(parse_command("get"), UserCommand::Usage(_)));
        assert!(matches!(parse_command("put"), UserCommand::Usage(_)));
    }

    #[test]
    fn test_parse_login_and_navigation() {
        assert_eq!(parse_command("user anonymous"), UserCommand::User("anonymous".into()));
        assert_eq!(parse_command("pass x"), UserCommand::Pass("x".into()));
        assert_eq!(parse_command("cd docs"), UserCommand::Cd("docs".into()));
        assert!(matches!(parse_command("user"), UserCommand::Usage(_)));
        assert!(matches!(parse_command("cd a b"), UserCommand::Usage(_)));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse_command("mget *"), UserCommand::Unknown("mget".into()));
    }
}
