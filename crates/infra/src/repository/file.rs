use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{check_quota, Repository, RepositoryError};

const TEMP_SUFFIX: &str = ".tmp";

/// One file per key under a directory.
///
/// Writes go to a temp file in the same directory and are renamed into
/// place, so a reader never observes a half-written value.
#[derive(Debug)]
pub struct FileRepository {
    dir: PathBuf,
    quota: Option<usize>,
    write_lock: Mutex<()>,
}

impl FileRepository {
    /// Open (creating if needed) a repository rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>, quota: Option<usize>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            quota,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(encode_key(key))
    }

    /// Bytes counted against the quota by every entry except `skip`.
    fn used_bytes_excluding(&self, skip: &str) -> io::Result<usize> {
        let mut used = 0;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with('.') {
                continue;
            }
            let Some(key) = decode_key(name) else { continue };
            if key == skip {
                continue;
            }
            let len = usize::try_from(entry.metadata()?.len()).unwrap_or(usize::MAX);
            used += key.len().saturating_add(len);
        }
        Ok(used)
    }
}

impl Repository for FileRepository {
    fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().map_err(|_| RepositoryError::Poisoned)?;
        check_quota(self.quota, self.used_bytes_excluding(key)?, key, value)?;

        let target = self.path_for(key);
        let temp = self.dir.join(format!(".{}{TEMP_SUFFIX}", encode_key(key)));
        let result = (|| {
            let mut file = fs::File::create(&temp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp, &target)
        })();
        if result.is_err() {
            let _ = fs::remove_file(&temp);
        }
        Ok(result?)
    }

    fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().map_err(|_| RepositoryError::Poisoned)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'-' => out.push(byte as char),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

fn decode_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
