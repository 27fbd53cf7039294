//! Stores usernames and passwords in a flat text file, one `username:password`
//! pair per line.
//!
//! Registration always appends, so the same username may appear more than
//! once. Authentication scans the file from the top and the first line that
//! matches both the username and the password wins.

use std::{
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use crate::Error;

const SEPARATOR: char = ':';

/// Handle to the credential file.
///
/// The file is opened on every call, nothing is cached in memory.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file does not need to exist yet, it is created on the first registration.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The location of the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the credential `username:password` to the file.
    ///
    /// # Errors
    /// Returns a:
    /// - [Error::InvalidCredentialField] if the username contains a colon or
    ///   either field contains a line break,
    /// - or [Error::CredentialStoreError] if the file cannot be written.
    pub fn register(&self, username: &str, password: &str) -> Result<(), Error> {
        if username.contains(SEPARATOR) || contains_line_break(username) {
            return Err(Error::InvalidCredentialField("username"));
        }

        if contains_line_break(password) {
            return Err(Error::InvalidCredentialField("password"));
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|error| Error::CredentialStoreError(error.to_string()))?;

        file.write_all(format!("{username}{SEPARATOR}{password}\n").as_bytes())
            .map_err(|error| Error::CredentialStoreError(error.to_string()))
    }

    /// Check whether `username` and `password` match a registered credential.
    ///
    /// Returns `false` if the credential file does not exist.
    ///
    /// # Errors
    /// Returns a [Error::CredentialStoreError] if the file exists but cannot be read.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<bool, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(error) => return Err(Error::CredentialStoreError(error.to_string())),
        };

        for (line_number, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|error| Error::CredentialStoreError(error.to_string()))?;

            let Some((stored_username, stored_password)) = line.split_once(SEPARATOR) else {
                tracing::warn!(
                    "Skipping malformed line {} in {:?}",
                    line_number + 1,
                    self.path
                );
                continue;
            };

            if stored_username == username && stored_password == password {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

fn contains_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}
