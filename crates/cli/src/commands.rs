use crate::args::{Args, CommandLine};
use anyhow::{Context, Result};
use i2pkeys_common::config::keys::DEFAULT_CONFIG_FILE;
use i2pkeys_common::{AddressFormat, Config};
use i2pkeys_core::{ControlClient, Destination, DestinationHash, KeyBundle, KeyFile};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info};

/// Execute a parsed command line, writing results to `out`
pub fn run(args: Args, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    match args.command {
        CommandLine::Generate {
            keyfile,
            control,
            force,
            delimiter,
        } => {
            let config = apply_overrides(config, keyfile, control);
            let bundle = generate(&config, force)?;
            writeln!(out, "Keys saved to: {}", config.keys.path)?;
            write_forms(bundle.destination(), &delimiter, out)
        }
        CommandLine::Show { keyfile, delimiter } => {
            let config = apply_overrides(config, keyfile, None);
            show(&config, &delimiter, out)
        }
        CommandLine::Convert { delimiter } => convert(input, &delimiter, out),
        CommandLine::Lookup {
            name,
            control,
            delimiter,
        } => {
            let config = apply_overrides(config, None, control);
            lookup(&config, &name, &delimiter, out)
        }
        CommandLine::Help => {
            write!(out, "{}", help_text())?;
            Ok(())
        }
        CommandLine::Version => {
            writeln!(out, "i2pkeys v{}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
    }
}

/// Load the configuration from `path`, the default file, or built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        info!("Loading configuration from {:?}", path);
        return Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()));
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        info!("Loading configuration from {:?}", default_path);
        return Config::from_file(default_path).context("Failed to load default configuration");
    }

    debug!("No configuration file found, using defaults");
    Ok(Config::default())
}

fn apply_overrides(mut config: Config, keyfile: Option<String>, control: Option<String>) -> Config {
    if let Some(keyfile) = keyfile {
        config = config.with_keyfile(keyfile);
    }
    if let Some(control) = control {
        config = config.with_control_address(control);
    }
    config
}

/// Generate a destination and store it in the configured key file
pub fn generate(config: &Config, force: bool) -> Result<KeyBundle> {
    let file = KeyFile::new(&config.keys.path).with_format(config.keys.format);
    if file.exists() && !force {
        anyhow::bail!(
            "Key file {} already exists (use --force to replace it)",
            config.keys.path
        );
    }

    let client = ControlClient::new(config.control.clone());
    let bundle = client
        .generate_destination()
        .with_context(|| format!("Failed to generate keys via {}", config.control.address))?;

    if force {
        file.store_overwrite(&bundle)?;
    } else {
        file.store(&bundle)?;
    }

    info!("Stored new keys in {}", config.keys.path);
    Ok(bundle)
}

/// Print both forms of the destination in the configured key file
pub fn show(config: &Config, delimiter: &str, out: &mut impl Write) -> Result<()> {
    let bundle = KeyFile::new(&config.keys.path)
        .load()
        .with_context(|| format!("Failed to load keys from {}", config.keys.path))?;

    write_forms(bundle.destination(), delimiter, out)
}

/// Print both forms of every destination read from `input`, one per line
///
/// Short-form addresses are accepted too; only their base32 form is printed.
pub fn convert(input: impl BufRead, delimiter: &str, out: &mut impl Write) -> Result<()> {
    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if Destination::is_short_form(line) {
            let hash = DestinationHash::from_short_form(line)
                .with_context(|| format!("Line {}: invalid short-form address", index + 1))?;
            writeln!(out, "{}{}{}", AddressFormat::Base32, delimiter, hash)?;
            continue;
        }

        let destination = Destination::parse(line)
            .with_context(|| format!("Line {}: invalid destination", index + 1))?;
        write_forms(&destination, delimiter, out)?;
    }

    Ok(())
}

/// Resolve `name` and print both forms of the result
pub fn lookup(config: &Config, name: &str, delimiter: &str, out: &mut impl Write) -> Result<()> {
    let destination = ControlClient::new(config.control.clone())
        .lookup(name)
        .with_context(|| format!("Failed to look up {}", name))?;

    write_forms(&destination, delimiter, out)
}

fn write_forms(destination: &Destination, delimiter: &str, out: &mut impl Write) -> Result<()> {
    for format in [AddressFormat::Base32, AddressFormat::Base64] {
        let text = destination
            .to_string_as(format)
            .with_context(|| format!("Failed to render {} form", format))?;
        writeln!(out, "{}{}{}", format, delimiter, text)?;
    }
    Ok(())
}

fn help_text() -> String {
    format!(
        "\
i2pkeys - destination key tool

USAGE:
    i2pkeys [OPTIONS] <COMMAND>

COMMANDS:
    generate        Generate a destination via the control channel and save it
    show            Print the base32 and base64 forms of a saved destination
    convert         Read destinations from stdin, print both forms of each
    lookup NAME     Resolve a name via the control channel
    help            Show this help message
    version         Show version information

OPTIONS:
    -c, --config PATH       Configuration file (default: {config})
    -f, --keyfile PATH      Key file (default: {keyfile})
    -s, --control ADDR      Control endpoint (default: {control})
    -d, --delimiter TEXT    Separator between form name and value (default: =)
        --force             Replace an existing key file

ENVIRONMENT:
    DEBUG_I2P               Log level on stderr: debug, warn or error
",
        config = DEFAULT_CONFIG_FILE,
        keyfile = i2pkeys_common::config::keys::DEFAULT_KEYFILE,
        control = i2pkeys_common::config::protocol::DEFAULT_CONTROL_ADDR,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Cursor, Write as _};
    use std::net::TcpListener;
    use std::thread;

    fn destination(fill: u8) -> Destination {
        Destination::from_bytes(&[fill; 387]).unwrap()
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    /// Stub control endpoint answering a handshake and one command
    fn spawn_router(reply: String) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap().to_string();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut writer = stream;
            for answer in ["HELLO REPLY RESULT=OK VERSION=3.1\n".to_string(), reply] {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                writer.write_all(answer.as_bytes()).unwrap();
            }
        });
        (address, handle)
    }

    #[test]
    fn test_convert_prints_both_forms() {
        let dest = destination(1);
        let input = Cursor::new(format!("{}\n\n{}.i2p\n", dest.as_str(), dest.as_str()));

        let text = output(|out| convert(input, "=", out));
        let lines: Vec<&str> = text.lines().collect();

        let short = dest.to_short_form().unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], format!("base32={}", short));
        assert_eq!(lines[1], format!("base64={}", dest.as_str()));
        assert_eq!(lines[2], lines[0]);
    }

    #[test]
    fn test_convert_short_form_and_delimiter() {
        let short = destination(2).to_short_form().unwrap();
        let text = output(|out| convert(Cursor::new(short.clone()), ": ", out));
        assert_eq!(text, format!("base32: {}\n", short));
    }

    #[test]
    fn test_convert_reports_bad_line() {
        let mut out = Vec::new();
        let err = convert(Cursor::new("garbage\n"), "=", &mut out).unwrap_err();
        assert!(err.to_string().contains("Line 1"));
    }

    #[test]
    fn test_show_reads_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("show.i2pkeys");
        let dest = destination(3);
        let bundle = KeyBundle::new(dest.clone(), format!("{}AAAA", dest.as_str()));
        KeyFile::new(&path).store(&bundle).unwrap();

        let config = Config::new().with_keyfile(path.to_string_lossy());
        let text = output(|out| show(&config, "=", out));

        assert!(text.contains(&format!("base64={}", dest.as_str())));
        assert!(text.contains(&format!("base32={}", dest.to_short_form().unwrap())));
    }

    #[test]
    fn test_show_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new().with_keyfile(dir.path().join("none").to_string_lossy());

        let mut out = Vec::new();
        assert!(show(&config, "=", &mut out).is_err());
    }

    #[test]
    fn test_generate_stores_keys() {
        let public = destination(4);
        let private = destination(6).into_string();
        let (address, router) =
            spawn_router(format!("DEST REPLY PUB={} PRIV={}\n", public.as_str(), private));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated.i2pkeys");
        let config = Config::new()
            .with_keyfile(path.to_string_lossy())
            .with_control_address(address);

        let bundle = generate(&config, false).unwrap();
        router.join().unwrap();

        assert_eq!(bundle.destination(), &public);
        let loaded = KeyFile::new(&path).load().unwrap();
        assert_eq!(loaded, bundle);
        assert_eq!(loaded.combined_secret(), format!("{}{}", public.as_str(), private));
    }

    #[test]
    fn test_run_generate_uses_delimiter() {
        let public = destination(7);
        let private = destination(8).into_string();
        let (address, router) =
            spawn_router(format!("DEST REPLY PUB={} PRIV={}\n", public.as_str(), private));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delimited.i2pkeys");
        let args = Args::parse(
            [
                "generate",
                "-f",
                path.to_str().unwrap(),
                "-s",
                address.as_str(),
                "-d",
                ": ",
            ]
            .iter()
            .map(|s| s.to_string()),
        )
        .unwrap();

        let text = output(|out| run(args, Cursor::new(""), out));
        router.join().unwrap();

        assert!(text.contains(&format!("base64: {}\n", public.as_str())));
        assert!(text.contains(&format!("base32: {}\n", public.to_short_form().unwrap())));
    }

    #[test]
    fn test_generate_refuses_existing_file_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exists.i2pkeys");
        std::fs::write(&path, "a\nb").unwrap();

        // No endpoint is listening here; the check must happen first.
        let config = Config::new()
            .with_keyfile(path.to_string_lossy())
            .with_control_address("127.0.0.1:1");

        let err = generate(&config, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_lookup_prints_forms() {
        let dest = destination(5);
        let (address, router) =
            spawn_router(format!("NAMING REPLY RESULT=OK NAME=x.i2p VALUE={}\n", dest.as_str()));

        let config = Config::new().with_control_address(address);
        let text = output(|out| lookup(&config, "x.i2p", "=", out));
        router.join().unwrap();

        assert_eq!(
            text,
            format!(
                "base32={}\nbase64={}\n",
                dest.to_short_form().unwrap(),
                dest.as_str()
            )
        );
    }

    #[test]
    fn test_run_version_and_help() {
        let args = Args::parse(vec!["version".to_string()]).unwrap();
        let text = output(|out| run(args, Cursor::new(""), out));
        assert!(text.starts_with("i2pkeys v"));

        let args = Args::parse(Vec::<String>::new()).unwrap();
        let text = output(|out| run(args, Cursor::new(""), out));
        assert!(text.contains("USAGE:"));
        assert!(text.contains("DEBUG_I2P"));
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tool.toml");
        Config::new().with_keyfile("custom.i2pkeys").to_file(&path).unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.keys.path, "custom.i2pkeys");

        let missing = dir.path().join("missing.toml");
        assert!(load_config(Some(missing.as_path())).is_err());
    }
}
