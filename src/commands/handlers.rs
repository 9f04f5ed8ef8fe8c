//! User command handlers
//!
//! Dispatches parsed user commands to `FtpClient` and prints the outcome.
//! Errors are reported here and never end the session loop.

use log::{error, info};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::client::FtpClient;
use crate::commands::parser::{CommandResult, UserCommand, parse_command};
use crate::error::FtpClientError;
use crate::error::handlers::handle_error;
use crate::protocol::responses::READY;
use crate::protocol::{Command, Reply};

const PROMPT: &str = "ftp> ";

fn print_reply<W: Write>(out: &mut W, reply: &Reply) {
    let _ = writeln!(out, "{}", reply);
}

// Handle a single user command; errors are printed, not returned
pub async fn handle_command<W: Write>(
    client: &mut FtpClient,
    command: UserCommand,
    out: &mut W,
) -> CommandResult {
    match execute(client, command, out).await {
        Ok(result) => result,
        Err(e) => {
            handle_error(&e);
            let _ = writeln!(out, "Error: {}", e);
            CommandResult::Continue
        }
    }
}

async fn execute<W: Write>(
    client: &mut FtpClient,
    command: UserCommand,
    out: &mut W,
) -> Result<CommandResult, FtpClientError> {
    match command {
        UserCommand::Empty => {}
        UserCommand::Open { host, port } => {
            let port = port.unwrap_or(client.config().default_port);
            let greeting = client.connect(&host, port).await?;
            print_reply(out, &greeting);
            if greeting.code() != READY {
                let _ = writeln!(out, "Server is not ready (reply {}).", greeting.code());
            }
        }
        UserCommand::User(name) => {
            client.ensure_connected()?;
            let reply = client.send_command(&Command::USER(name).to_string()).await?;
            print_reply(out, &reply);
        }
        UserCommand::Pass(password) => {
            client.ensure_connected()?;
            let reply = client
                .send_command(&Command::PASS(password).to_string())
                .await?;
            print_reply(out, &reply);
        }
        UserCommand::Dir(path) => {
            client.ensure_connected()?;
            let result = client.list_directory(path.as_deref()).await?;
            if !result.listing.is_empty() {
                let _ = write!(out, "{}", result.listing);
                if !result.listing.ends_with('\n') {
                    let _ = writeln!(out);
                }
            }
            print_reply(out, &result.reply);
        }
        UserCommand::Cd(path) => {
            client.ensure_connected()?;
            let reply = client.change_directory(&path).await?;
            print_reply(out, &reply);
        }
        UserCommand::Get { remote, local } => {
            client.ensure_connected()?;
            let result = client
                .download(&remote, local.as_deref().map(Path::new))
                .await?;
            print_reply(out, &result.reply);
        }
        UserCommand::Put { local, remote } => {
            client.ensure_connected()?;
            let result = client.upload(Path::new(&local), remote.as_deref()).await?;
            print_reply(out, &result.reply);
        }
        UserCommand::Close => {
            client.ensure_connected()?;
            quit_and_report(client, out).await?;
        }
        UserCommand::Quit => {
            if let Err(e) = quit_and_report(client, out).await {
                handle_error(&e);
                let _ = writeln!(out, "Error: {}", e);
            }
            return Ok(CommandResult::Quit);
        }
        UserCommand::Usage(usage) => {
            let _ = writeln!(out, "{}", usage);
        }
        UserCommand::InvalidPort(port) => {
            let _ = writeln!(out, "Invalid port number: {}", port);
        }
        UserCommand::Unknown(verb) => {
            let _ = writeln!(out, "Unknown command: {}", verb);
        }
    }
    Ok(CommandResult::Continue)
}

async fn quit_and_report<W: Write>(
    client: &mut FtpClient,
    out: &mut W,
) -> Result<(), FtpClientError> {
    if let Some(reply) = client.quit().await? {
        print_reply(out, &reply);
        if reply.is_error() {
            let _ = writeln!(
                out,
                "QUIT command reported an error; closing connection anyway."
            );
        }
    }
    Ok(())
}

/// Reads commands from `input` until `quit` or end of input.
///
/// End of input quits the session the same way `quit` does.
pub async fn run_repl<R, W>(client: &mut FtpClient, input: R, out: &mut W)
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        let _ = write!(out, "{}", PROMPT);
        let _ = out.flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                let _ = writeln!(out);
                break;
            }
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        if handle_command(client, parse_command(&line), out).await == CommandResult::Quit {
            info!("Session ended by user");
            return;
        }
    }

    handle_command(client, UserCommand::Quit, out).await;
}
