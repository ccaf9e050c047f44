use std::path::Path;

use anyhow::{Context, Result};

/// Shared-secret admin credential, loaded once at startup. A missing or
/// unreadable credential file prevents the server from serving at all.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    code: String,
}

impl AdminAuth {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let code = std::fs::read_to_string(path).with_context(|| {
            format!("admin code file {} is missing or unreadable", path.display())
        })?;
        let code = code.trim().to_string();
        if code.is_empty() {
            anyhow::bail!("admin code file {} is empty", path.display());
        }
        Ok(Self { code })
    }

    pub fn from_code(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn verify(&self, code: &str) -> bool {
        self.code == code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_the_exact_code() {
        let auth = AdminAuth::from_code("FSQ2023");
        assert!(auth.verify("FSQ2023"));
        assert!(!auth.verify("fsq2023"));
        assert!(!auth.verify(""));
    }

    #[test]
    fn missing_file_fails_to_load() {
        assert!(AdminAuth::load("/definitely/not/here/admin_code.txt").is_err());
    }

    #[test]
    fn loaded_code_is_trimmed() {
        let path = std::env::temp_dir().join("wordly_admin_code_test.txt");
        std::fs::write(&path, "SECRET42\n").unwrap();
        let auth = AdminAuth::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(auth.verify("SECRET42"));
    }
}
