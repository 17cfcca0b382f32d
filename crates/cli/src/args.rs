use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;

/// Default separator between a form name and its value in output
pub const DEFAULT_DELIMITER: &str = "=";

/// Subcommand selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// Generate a destination through the control channel and store it
    Generate {
        keyfile: Option<String>,
        control: Option<String>,
        force: bool,
        delimiter: String,
    },
    /// Print both forms of a stored destination
    Show {
        keyfile: Option<String>,
        delimiter: String,
    },
    /// Read destinations from stdin and print both forms of each
    Convert { delimiter: String },
    /// Resolve a name through the control channel
    Lookup {
        name: String,
        control: Option<String>,
        delimiter: String,
    },
    Help,
    Version,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub command: CommandLine,
}

impl Args {
    /// Parse arguments, excluding the program name
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = None;
        let mut keyfile = None;
        let mut control = None;
        let mut delimiter = DEFAULT_DELIMITER.to_string();
        let mut force = false;
        let mut help = false;
        let mut version = false;
        let mut positional = Vec::new();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-c" | "--config" => config = Some(PathBuf::from(value(&arg, args.next())?)),
                "-f" | "--file" | "--keyfile" => keyfile = Some(value(&arg, args.next())?),
                "-s" | "--control" | "--samaddress" => control = Some(value(&arg, args.next())?),
                "-d" | "--delimiter" => delimiter = value(&arg, args.next())?,
                "--force" => force = true,
                "-h" | "--help" => help = true,
                "-v" | "--version" => version = true,
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    bail!("Unknown option: {}", flag)
                }
                _ => positional.push(arg),
            }
        }

        // A help or version flag wins over whatever else was given.
        if help {
            return Ok(Self {
                config,
                command: CommandLine::Help,
            });
        }
        if version {
            return Ok(Self {
                config,
                command: CommandLine::Version,
            });
        }

        let mut positional = positional.into_iter();
        let command = match positional.next().as_deref() {
            None | Some("help") => CommandLine::Help,
            Some("version") => CommandLine::Version,
            Some("generate") => CommandLine::Generate {
                keyfile,
                control,
                force,
                delimiter,
            },
            Some("show") => CommandLine::Show { keyfile, delimiter },
            Some("convert") => CommandLine::Convert { delimiter },
            Some("lookup") => {
                let name = positional
                    .next()
                    .ok_or_else(|| anyhow!("lookup requires a NAME argument"))?;
                CommandLine::Lookup {
                    name,
                    control,
                    delimiter,
                }
            }
            Some(other) => bail!("Unknown command: {}", other),
        };

        if let Some(extra) = positional.next() {
            bail!("Unexpected argument: {}", extra);
        }

        Ok(Self { config, command })
    }
}

fn value(flag: &str, next: Option<String>) -> Result<String> {
    next.ok_or_else(|| anyhow!("{} requires a value", flag))
}
