use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfGenError>;

#[derive(Error, Debug)]
pub enum ConfGenError {
    #[error("Please enter the file name in the command for input.")]
    MissingArgument,

    #[error("Please check the file name and path, provided file '{0}' does not exist.")]
    FileNotFound(String),

    #[error("Row at line {line} has {found} value(s), header defines {expected} column(s)")]
    RowLength {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfGenError {
    /// Process exit status: 1 for input validation failures, 2 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingArgument | Self::FileNotFound(_) => 1,
            _ => 2,
        }
    }
}
