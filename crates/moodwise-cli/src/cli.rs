//! Command-line parsing for the `moodwise` binary.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use moodwise_core::Session;

/// Environment variable read instead of prompting for a password
pub const PASSWORD_ENV: &str = "MOODWISE_PASSWORD";

#[derive(Parser, Debug)]
#[command(name = "moodwise", version, about = "Terminal client for MoodWise Notes")]
pub struct Cli {
    /// Server base URL, overriding the config file and MOODWISE_BASE_URL
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign in (password from prompt or MOODWISE_PASSWORD)
    Login {
        username: String,
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        username: String,
        email: String,
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show whether a token is stored
    Status,
    /// Show the signed-in account
    #[command(name = "whoami")]
    WhoAmI,
    /// Ask for a password reset link
    ForgotPassword { email: String },
    /// Set a new password with the token from a reset link
    ResetPassword {
        token: String,
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
    /// List notes
    #[command(alias = "ls")]
    Notes,
    /// Show one note
    Show { id: String },
    /// Print one note as HTML
    Export { id: String },
    /// Create a note
    Add { title: String, content: String },
    /// Change a note's title and/or content
    Edit {
        id: String,
        #[arg(long, required_unless_present = "content")]
        title: Option<String>,
        #[arg(long, required_unless_present = "title")]
        content: Option<String>,
    },
    /// Delete a note
    #[command(name = "rm", alias = "delete")]
    Remove { id: String },
    /// Talk to the mood assistant; reads further lines from stdin until EOF
    Chat {
        /// First message; read from stdin when omitted
        message: Option<String>,
        /// Save the conversation when it ends
        #[arg(long)]
        save: bool,
    },
    /// List saved chat conversations
    Conversations,
}

impl Command {
    /// Whether the command needs a stored token before it runs
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Command::Login { .. }
                | Command::Register { .. }
                | Command::Logout
                | Command::Status
                | Command::ForgotPassword { .. }
                | Command::ResetPassword { .. }
        )
    }

    /// Whether the command can run without a configured server
    pub fn is_offline(&self) -> bool {
        matches!(self, Command::Logout | Command::Status)
    }

    /// Fail unless the session may run this command.
    ///
    /// A missing token also sends the session to the login page.
    pub fn ensure_authorized(&self, session: &Session) -> Result<()> {
        if self.requires_auth() && !session.require_auth() {
            bail!("Authentication required");
        }
        Ok(())
    }
}
