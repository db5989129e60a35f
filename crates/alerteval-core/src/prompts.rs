//! Versioned prompt resources on disk.
//!
//! Layout: `<root>/analyzer_prompts/<version>.txt` and
//! `<root>/judge_prompts/<version>.txt`. A missing file is a fatal
//! precondition failure for the call that needed it.

use std::fs;
use std::path::PathBuf;

use crate::errors::EvalError;

#[derive(Debug, Clone)]
pub struct PromptStore {
    root: PathBuf,
}

impl PromptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn analyzer_prompt(&self, version: &str) -> Result<String, EvalError> {
        self.load("analyzer_prompts", version)
    }

    pub fn judge_prompt(&self, version: &str) -> Result<String, EvalError> {
        self.load("judge_prompts", version)
    }

    fn load(&self, dir: &str, version: &str) -> Result<String, EvalError> {
        let path = self.root.join(dir).join(format!("{version}.txt"));
        if !path.exists() {
            return Err(EvalError::PromptNotFound(path));
        }
        Ok(fs::read_to_string(&path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_existing_prompt_version() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("judge_prompts");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("v2.txt"), "judge carefully").unwrap();

        let store = PromptStore::new(tmp.path());
        assert_eq!(store.judge_prompt("v2").unwrap(), "judge carefully");
    }

    #[test]
    fn missing_version_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PromptStore::new(tmp.path());
        let err = store.analyzer_prompt("v9").unwrap_err();
        assert!(matches!(err, EvalError::PromptNotFound(_)));
    }
}
