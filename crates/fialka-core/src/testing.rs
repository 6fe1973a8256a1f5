//! In-memory collaborators for pipeline unit tests.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use secrecy::SecretString;

use crate::crypto::OsRandom;
use crate::error::{FialkaError, Result};
use crate::traits::{FileStore, RandomSource, SecretPrompt};

#[derive(Default)]
pub struct MemoryFileStore {
    pub files: HashMap<PathBuf, Vec<u8>>,
    pub writes: usize,
}

impl MemoryFileStore {
    pub fn with_file(mut self, path: &str, bytes: &[u8]) -> Self {
        self.files.insert(PathBuf::from(path), bytes.to_vec());
        self
    }

    pub fn get(&self, path: &str) -> Option<&Vec<u8>> {
        self.files.get(Path::new(path))
    }

    pub fn text(&self, path: &str) -> String {
        String::from_utf8(self.get(path).cloned().unwrap_or_default()).unwrap()
    }
}

impl FileStore for MemoryFileStore {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
            .into()
        })
    }

    fn write_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.writes += 1;
        self.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        String::from_utf8(self.read_bytes(path)?)
            .map_err(|e| FialkaError::InvalidInput(e.to_string()))
    }

    fn write_text(&mut self, path: &Path, text: &str) -> Result<()> {
        self.write_bytes(path, text.as_bytes())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

/// Answers prompts from a fixed script and records what was asked.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            asked: Vec::new(),
        }
    }
}

impl SecretPrompt for ScriptedPrompt {
    fn prompt_secret(&mut self, message: &str) -> Result<SecretString> {
        self.asked.push(message.to_string());
        self.answers
            .pop_front()
            .map(SecretString::from)
            .ok_or_else(|| FialkaError::InvalidInput("no scripted answer left".to_string()))
    }
}

/// Real randomness, counting how many bytes were drawn.
#[derive(Default)]
pub struct CountingRandom {
    pub bytes_drawn: usize,
}

impl RandomSource for CountingRandom {
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.bytes_drawn += buf.len();
        OsRandom.fill_bytes(buf)
    }
}

/// Always returns the same bytes. Only for asserting on exact output.
pub struct FixedRandom(pub u8);

impl RandomSource for FixedRandom {
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        buf.fill(self.0);
        Ok(())
    }
}
