//! Shell completions command handler

use crate::cli::{Cli, CompletionsArgs};
use crate::error::Result;
use clap::CommandFactory;
use std::io::{self, Write};

/// Handle the completions command
pub fn handle_completions(args: CompletionsArgs) -> Result<()> {
    write_completions(args, &mut io::stdout())
}

/// Generate the completion script for `args.shell` into `out`
fn write_completions(args: CompletionsArgs, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    clap_complete::generate(args.shell.to_clap_shell(), &mut cmd, name, out);
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Shell;

    #[test]
    fn test_bash_completions_mention_subcommands() {
        let mut buffer = Vec::new();
        write_completions(CompletionsArgs { shell: Shell::Bash }, &mut buffer).unwrap();

        let script = String::from_utf8(buffer).unwrap();
        assert!(script.contains("arloc"));
        assert!(script.contains("transform"));
        assert!(script.contains("completions"));
    }
}
