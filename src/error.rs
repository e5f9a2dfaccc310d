use std::{fmt::Display, io::Error as IOError};

#[derive(Debug)]
pub(crate) enum Error {
    Io(IOError),
    Config(String),
    InvalidTheme(String),
    Command(String),
}

pub(crate) type Result<T> = std::result::Result<T, Error>;

impl From<IOError> for Error {
    fn from(value: IOError) -> Self {
        Error::Io(value)
    }
}

impl From<xdg::BaseDirectoriesError> for Error {
    fn from(value: xdg::BaseDirectoriesError) -> Self {
        Error::Config(format!("Could not locate XDG directories: {value}"))
    }
}

impl From<toml::de::Error> for Error {
    fn from(value: toml::de::Error) -> Self {
        Error::Config(format!("Invalid config file: {value}"))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Config(msg) => write!(f, "{msg}"),
            Error::InvalidTheme(name) => write!(f, "Unknown theme '{name}'"),
            Error::Command(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}
