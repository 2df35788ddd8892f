use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use confgen::config::Overrides;
use confgen::error::ConfGenError;
use confgen::logging::{self, LogLevel};
use confgen::output::{self, Rendering};
use confgen::GenerateOptions;

const BANNER_WIDTH: usize = 50;

#[derive(Parser)]
#[command(
    name = "confgen",
    about = "Generate an agent integration conf.yaml from a CSV file",
    version
)]
struct Cli {
    /// CSV file with a header line and one instance per row
    csv: Option<PathBuf>,

    /// Log level (debug, info, warn, error); anything else means info
    level: Option<String>,

    /// Config file path
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Column to split on commas into a list (repeatable, replaces the configured set)
    #[arg(long = "list-column", short = 'l', conflicts_with = "no_list_columns")]
    list_columns: Vec<String>,

    /// Coerce every column as a scalar
    #[arg(long)]
    no_list_columns: bool,

    /// Write the YAML to this file instead of conf.yaml
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(LogLevel::from_arg(cli.level.as_deref()));

    println!("\n{}", banner());

    match run(cli) {
        Ok(()) => finish(0),
        Err(e) => {
            tracing::error!("{}", e);
            finish(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), ConfGenError> {
    let csv_path = cli.csv.ok_or(ConfGenError::MissingArgument)?;

    let list_columns = if cli.no_list_columns {
        Some(BTreeSet::new())
    } else if !cli.list_columns.is_empty() {
        Some(cli.list_columns.into_iter().collect())
    } else {
        None
    };
    let options = GenerateOptions {
        config_path: cli.config,
        overrides: Overrides {
            list_columns,
            output_path: cli.output,
        },
    };

    let config = confgen::load_config(&options)?;
    let document = confgen::convert(&csv_path, &config.conversion)?;

    let json = output::render(&document, Rendering::Json)?;
    tracing::info!("Converted configuration content...\n{}\n", json);

    let preview = output::render(&document, Rendering::Preview)?;
    tracing::debug!("Generated {} content...\n{}", file_label(&config.output.path), preview);

    output::write_document(&document, &config.output.path)?;
    tracing::info!("{}", saved_message(&config.output.path));

    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn saved_message(path: &Path) -> String {
    let in_cwd = path
        .parent()
        .map(|p| p.as_os_str().is_empty())
        .unwrap_or(true);
    if in_cwd {
        format!("{} is saved in current directory", path.display())
    } else {
        format!("{} is saved", path.display())
    }
}

fn banner() -> String {
    "=".repeat(BANNER_WIDTH)
}

/// Print the closing banner and exit with `code`.
fn finish(code: i32) -> ! {
    println!("{}\n", banner());
    process::exit(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run the converter on a small CSV at `level` and return what it logged.
    fn run_logged(level: &str) -> String {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("hosts.csv");
        std::fs::write(&csv, "host,port,tags\nh1,80,\"on, off\"\n").unwrap();
        let output = dir.path().join("conf.yaml");
        let args: Vec<OsString> = vec![
            "confgen".into(),
            csv.into(),
            level.into(),
            "-c".into(),
            dir.path().join("none.toml").into(),
            "-o".into(),
            output.clone().into(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        let buffer = Buffer::default();
        let subscriber = logging::subscriber(LogLevel::from_arg(cli.level.as_deref()), buffer.clone());
        tracing::subscriber::with_default(subscriber, || run(cli)).unwrap();
        assert!(output.exists());

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn info_run_logs_json_but_not_preview() {
        let out = run_logged("info");
        assert!(out.contains("[INFO] Converted configuration content...\n{\n    \"init_config\": {}"));
        assert!(out.contains("conf.yaml is saved"));
        assert!(!out.contains("Generated conf.yaml content"));
        assert!(!out.contains("[DEBUG]"));
    }

    #[test]
    fn debug_run_logs_tab_indented_preview() {
        let out = run_logged("DEBUG");
        assert!(out.contains("[DEBUG] Generated conf.yaml content...\n\tinit_config: {}\n\tinstances:\n\t- host: h1\n"));
        assert!(out.contains("\t  - 'on'\n\t  - 'off'\n"));
        assert!(out.contains("[INFO] Converted configuration content..."));
    }

    #[test]
    fn positional_level_is_optional() {
        let cli = Cli::try_parse_from(["confgen", "hosts.csv"]).unwrap();
        assert_eq!(cli.csv, Some(PathBuf::from("hosts.csv")));
        assert!(cli.level.is_none());

        let cli = Cli::try_parse_from(["confgen", "hosts.csv", "DEBUG"]).unwrap();
        assert_eq!(LogLevel::from_arg(cli.level.as_deref()), LogLevel::Debug);
    }

    #[test]
    fn missing_csv_is_reported_by_run() {
        let cli = Cli::try_parse_from(["confgen"]).unwrap();
        let err = run(cli).unwrap_err();
        assert!(matches!(err, ConfGenError::MissingArgument));
        assert!(err.to_string().contains("enter the file name"));
    }

    #[test]
    fn list_flags_conflict() {
        assert!(
            Cli::try_parse_from(["confgen", "a.csv", "-l", "tags", "--no-list-columns"]).is_err()
        );
    }

    #[test]
    fn saved_message_mentions_current_directory() {
        assert_eq!(
            saved_message(Path::new("conf.yaml")),
            "conf.yaml is saved in current directory"
        );
        assert_eq!(saved_message(Path::new("out/conf.yaml")), "out/conf.yaml is saved");
    }
}
