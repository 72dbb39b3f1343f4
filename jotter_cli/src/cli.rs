use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "jotter")]
#[command(about = "Jotter - Apple Notes from the terminal")]
#[command(version)]
#[command(arg_required_else_help = true)]
#[command(after_help = "\x1b[1;36mQuick Start:\x1b[0m
  jotter ls                               List notes, newest first
  jotter search \"standup\"                 Find notes by title or body
  jotter show <note-id>                   Print one note in full
  jotter new --title \"Ideas\"              Create a note (body from stdin)
  jotter folders                          List folders with note counts

\x1b[1;36mNote IDs:\x1b[0m
  Notes are addressed by the Core Data ids that `jotter ls` and
  `jotter search` print. Folders are addressed by name.

\x1b[1;36mMore Info:\x1b[0m
  jotter <command> --help                 Get help for any command
  https://github.com/jotter-sh/jotter     Full documentation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,

    /// Disable colors, tables and spinners (plain text output)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Active format after `--no-color` downgrades decorated output.
    pub fn effective_output(&self) -> OutputFormat {
        if self.no_color && self.output == OutputFormat::Pretty {
            OutputFormat::Text
        } else {
            self.output
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List notes, newest first
    #[command(alias = "list")]
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  jotter ls                     All notes, newest first
  jotter ls --folder Work       Notes in one folder
  jotter ls --limit 5           The five most recent notes")]
    Ls {
        /// Only list notes in this folder
        #[arg(short, long)]
        folder: Option<String>,
        /// Maximum number of notes to show
        #[arg(short, long)]
        limit: Option<u64>,
    },

    /// Search note titles and bodies (case-insensitive)
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  jotter search \"standup\"
  jotter search groceries --folder Personal
  jotter search meeting --limit 3 --output json")]
    Search {
        /// Text to look for
        query: String,
        /// Only search notes in this folder
        #[arg(short, long)]
        folder: Option<String>,
        /// Maximum number of hits to show
        #[arg(short, long)]
        limit: Option<u64>,
    },

    /// Show one note in full
    #[command(alias = "get", alias = "cat")]
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  jotter show x-coredata://.../ICNote/p42
  jotter show <note-id> --copy           Also copy the body to the clipboard
  jotter show <note-id> --output text    Body only, pipe-friendly")]
    Show {
        /// Note id from `jotter ls` or `jotter search`
        note_id: String,
        /// Copy the note body to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// Create a note
    #[command(alias = "create", alias = "add")]
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  jotter new --title \"Ideas\" --body \"First line\"
  jotter new --title \"Standup\" --folder Work
  pbpaste | jotter new --title \"From clipboard\"")]
    New {
        /// Note title (becomes the first line)
        #[arg(short, long)]
        title: String,
        /// Note body; omit to read it from stdin
        #[arg(short, long)]
        body: Option<String>,
        /// Target folder (account default folder when omitted)
        #[arg(short, long)]
        folder: Option<String>,
    },

    /// Replace a note's body, and optionally its title
    #[command(alias = "update")]
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  jotter edit <note-id> --body \"Rewritten\"
  jotter edit <note-id> --body \"New text\" --title \"New title\"
  cat draft.txt | jotter edit <note-id>")]
    Edit {
        /// Note id from `jotter ls` or `jotter search`
        note_id: String,
        /// New body; omit to read it from stdin
        #[arg(short, long)]
        body: Option<String>,
        /// New title (keeps the current one when omitted)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Append text to the end of a note
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  jotter append <note-id> \"- buy milk\"")]
    Append {
        /// Note id from `jotter ls` or `jotter search`
        note_id: String,
        /// Text to add
        text: String,
    },

    /// Delete a note
    #[command(alias = "delete")]
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  jotter rm <note-id>           Asks for confirmation
  jotter rm <note-id> --yes     No prompt, for scripts")]
    Rm {
        /// Note id from `jotter ls` or `jotter search`
        note_id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Move a note to another folder
    #[command(alias = "move")]
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  jotter mv <note-id> Archive")]
    Mv {
        /// Note id from `jotter ls` or `jotter search`
        note_id: String,
        /// Destination folder name
        folder: String,
    },

    /// List folders with note counts
    Folders,

    /// Create a folder in the default account
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  jotter mkdir Archive")]
    Mkdir {
        /// Folder name
        name: String,
    },

    /// Show the MCP tool catalog this CLI is built on
    Tools,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Pretty,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Plain text output (tab-separated lists, raw note bodies)
    Text,
}
