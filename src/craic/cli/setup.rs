use clap::{ArgAction, CommandFactory, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "craic",
    bin_name = "craic",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Annotate text and markdown documents from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Operate on the global store
    #[arg(short, long, global = true, help_heading = "Options")]
    pub global: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Print help
    #[arg(short, long, global = true, action = ArgAction::Help)]
    pub help: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Documents,
    Sets,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Documents => "Document Commands:",
            CommandGroup::Sets => "Annotation Set Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "upload" | "list" | "select" | "deselect" | "remove" | "view" => {
                Some(CommandGroup::Documents)
            }
            "sets" | "add-set" | "select-set" | "deselect-set" | "remove-set" => {
                Some(CommandGroup::Sets)
            }
            "doctor" | "config" | "init" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Documents, CommandGroup::Sets, CommandGroup::Misc]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("craic {version}\n"));
    output.push_str("Annotate text and markdown documents from the command line\n");
    output.push('\n');
    output.push_str("Usage: craic [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<14} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("  -g, --global     Operate on the global store\n");
    output.push_str("  -v, --verbose    Increase log verbosity\n");
    output.push_str("  -h, --help       Print help\n");
    output.push_str("  -V, --version    Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a command by name, falling back to the grouped help.
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            print!("{}", subcmd.render_help());
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Documents(DocumentCommands),

    #[command(flatten)]
    Sets(SetCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum DocumentCommands {
    /// Upload a text or markdown file and select it
    #[command(alias = "up", display_order = 1)]
    Upload {
        /// File to upload, or `-` to read stdin
        path: String,

        /// Document name (defaults to the file name; required for stdin)
        #[arg(short, long)]
        name: Option<String>,

        /// MIME type to report for the file
        #[arg(long)]
        mime: Option<String>,
    },

    /// List documents
    #[command(alias = "ls", display_order = 2)]
    List,

    /// Select a document by position or id
    #[command(display_order = 3)]
    Select {
        /// Position (as shown by `list`) or id
        reference: String,
    },

    /// Clear the document selection
    #[command(display_order = 4)]
    Deselect,

    /// Remove a document
    #[command(alias = "rm", display_order = 5)]
    Remove {
        /// Position (as shown by `list`) or id
        reference: String,
    },

    /// Show the annotator for the current selection
    #[command(display_order = 6)]
    View,
}

#[derive(Subcommand, Debug)]
pub enum SetCommands {
    /// List annotation sets of the current document
    #[command(display_order = 10)]
    Sets,

    /// Add an annotation set to the current document
    #[command(display_order = 11)]
    AddSet {
        /// Set name (defaults to "Set N")
        #[arg(trailing_var_arg = true)]
        name: Vec<String>,
    },

    /// Select an annotation set by position or id
    #[command(display_order = 12)]
    SelectSet {
        /// Position (as shown by `sets`) or id
        reference: String,
    },

    /// Clear the annotation set selection
    #[command(display_order = 13)]
    DeselectSet,

    /// Remove an annotation set (defaults to the selected one)
    #[command(display_order = 14)]
    RemoveSet {
        /// Position (as shown by `sets`) or id
        reference: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Find annotation sets whose document is gone
    #[command(display_order = 20)]
    Doctor {
        /// Remove the orphaned sets
        #[arg(long)]
        prune: bool,
    },

    /// Get or set configuration
    #[command(display_order = 21)]
    Config {
        /// Configuration key
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },

    /// Create the data directory with a default config
    #[command(display_order = 22)]
    Init,

    /// Print help for craic or a command
    #[command(display_order = 23)]
    Help {
        /// Command to show help for
        command: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("craic").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_command_is_allowed() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn upload_with_options_and_alias() {
        let cli = parse(&["up", "notes.md", "--name", "Notes", "--mime", "text/plain"]);
        match cli.command {
            Some(Commands::Documents(DocumentCommands::Upload { path, name, mime })) => {
                assert_eq!(path, "notes.md");
                assert_eq!(name.as_deref(), Some("Notes"));
                assert_eq!(mime.as_deref(), Some("text/plain"));
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn add_set_joins_words_later() {
        let cli = parse(&["add-set", "First", "pass"]);
        match cli.command {
            Some(Commands::Sets(SetCommands::AddSet { name })) => {
                assert_eq!(name, vec!["First", "pass"]);
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn remove_set_reference_is_optional() {
        let cli = parse(&["remove-set"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Sets(SetCommands::RemoveSet { reference: None }))
        ));
    }

    #[test]
    fn global_and_verbosity_after_subcommand() {
        let cli = parse(&["ls", "-g", "-vv"]);
        assert!(cli.global);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Some(Commands::Documents(DocumentCommands::List))
        ));
    }

    #[test]
    fn subcommand_help_skips_required_positionals() {
        let err = Cli::try_parse_from(["craic", "upload", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--mime"));
    }

    #[test]
    fn grouped_help_lists_every_command() {
        let help = get_grouped_help();
        for name in ["upload", "remove-set", "doctor", "select-set"] {
            assert!(help.contains(name), "missing {name}");
        }
        assert!(help.contains("Annotation Set Commands:"));
    }
}
