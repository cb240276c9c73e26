//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "swiftgodot",
    bin_name = "swiftgodot",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Create, extend and build SwiftGodot projects",
    long_about = "swiftgodot scaffolds Godot projects backed by a SwiftGodot \
                  extension, adds @Godot classes and registers them in the \
                  extension initializer, and installs built libraries into bin/.",
    after_help = "EXAMPLES:\n\
        \x20 swiftgodot init MyGame\n\
        \x20 cd MyGame/src && swiftgodot new class Player\n\
        \x20 swiftgodot --run-from-godot build\n\
        \x20 swiftgodot completions bash > /usr/share/bash-completion/completions/swiftgodot",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new SwiftGodot project from the project template.
    #[command(
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 swiftgodot init MyGame\n\
            \x20 swiftgodot init MyGame --dry-run\n\
            \x20 swiftgodot init MyGame --force --yes"
    )]
    Init(InitArgs),

    /// Add something to an existing project.
    #[command(
        visible_alias = "n",
        about = "Add a class to the project",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 swiftgodot new class Player\n\
            \x20 swiftgodot new class Enemies/Slime"
    )]
    New(NewCommands),

    /// Build the Swift package and install its libraries into `bin/`.
    #[command(
        visible_alias = "b",
        about = "Build and install the extension",
        after_help = "EXAMPLES:\n\
            \x20 swiftgodot build\n\
            \x20 swiftgodot build --configuration release"
    )]
    Build(BuildArgs),

    /// Print the project name declared in `Package.swift`.
    #[command(
        about = "Print the project name",
        after_help = "EXAMPLES:\n\
            \x20 swiftgodot name\n\
            \x20 swiftgodot name --format json\n\
            \x20 swiftgodot name --classes"
    )]
    Name(NameArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 swiftgodot completions bash > ~/.local/share/bash-completion/completions/swiftgodot\n\
            \x20 swiftgodot completions zsh  > ~/.zfunc/_swiftgodot\n\
            \x20 swiftgodot completions fish > ~/.config/fish/completions/swiftgodot.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the swiftgodot configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 swiftgodot config get build.configuration\n\
            \x20 swiftgodot config list\n\
            \x20 swiftgodot config init"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `swiftgodot init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project name.  Must be a valid Swift identifier; the project is
    /// created in `./NAME`.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Replace an existing directory of the same name.
    #[arg(short = 'f', long = "force", help = "Overwrite an existing directory")]
    pub force: bool,

    /// Skip the confirmation prompt of `--force`.
    #[arg(short = 'y', long = "yes", help = "Do not ask for confirmation")]
    pub yes: bool,

    /// Show what would be created without writing anything.
    #[arg(long = "dry-run", help = "Preview without creating files")]
    pub dry_run: bool,
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Subcommands for `swiftgodot new`.
#[derive(Debug, Subcommand)]
pub enum NewCommands {
    /// Create a `@Godot` class and register it with the extension.
    Class(NewClassArgs),
}

/// Arguments for `swiftgodot new class`.
#[derive(Debug, Args)]
pub struct NewClassArgs {
    /// Path of the class relative to `Sources/<Project>`, e.g.
    /// `Enemies/Slime`.  The last component is the class name.
    #[arg(value_name = "PATH", help = "Class path, e.g. Player or Enemies/Slime")]
    pub path: String,
}

// ── build ─────────────────────────────────────────────────────────────────────

/// Arguments for `swiftgodot build`.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Build configuration passed to `swift build`.
    #[arg(
        long = "configuration",
        value_name = "NAME",
        help = "Build configuration (default from config: debug)"
    )]
    pub configuration: Option<String>,

    /// Swift executable to run.
    #[arg(long = "swift", value_name = "PROGRAM", help = "Swift executable")]
    pub swift: Option<String>,
}

// ── name ──────────────────────────────────────────────────────────────────────

/// Arguments for `swiftgodot name`.
#[derive(Debug, Args)]
pub struct NameArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "text",
        help = "Output format"
    )]
    pub format: NameFormat,

    /// Also list the classes registered in the initializer file.
    #[arg(long = "classes", help = "List registered classes")]
    pub classes: bool,
}

/// Rendering of `swiftgodot name`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum NameFormat {
    #[default]
    Text,
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `swiftgodot completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `swiftgodot config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `build.configuration`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_new_class() {
        let cli = Cli::try_parse_from(["swiftgodot", "new", "class", "Enemies/Slime"]).unwrap();
        match cli.command {
            Commands::New(NewCommands::Class(args)) => assert_eq!(args.path, "Enemies/Slime"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn run_from_godot_is_global() {
        let cli = Cli::try_parse_from(["swiftgodot", "build", "--run-from-godot"]).unwrap();
        assert!(cli.global.run_from_godot);
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["swiftgodot", "-q", "-v", "name"]).is_err());
    }

    #[test]
    fn name_format_defaults_to_text() {
        let cli = Cli::try_parse_from(["swiftgodot", "name"]).unwrap();
        match cli.command {
            Commands::Name(args) => {
                assert_eq!(args.format, NameFormat::Text);
                assert!(!args.classes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
