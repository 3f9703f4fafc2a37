use std::path::{Path, PathBuf};

use crate::process::{executable_name, scripts_dir_name};

/// Shell type for activation hints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Zsh,
    Bash,
    Fish,
    PowerShell,
}

impl Shell {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "zsh" => Some(Shell::Zsh),
            "bash" | "sh" => Some(Shell::Bash),
            "fish" => Some(Shell::Fish),
            "pwsh" | "powershell" => Some(Shell::PowerShell),
            _ => None,
        }
    }

    /// Detect from `$SHELL`, defaulting to bash
    pub fn detect() -> Self {
        std::env::var("SHELL")
            .ok()
            .and_then(|path| {
                Path::new(&path)
                    .file_name()
                    .and_then(|name| Shell::from_name(&name.to_string_lossy()))
            })
            .unwrap_or(Shell::Bash)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shell::Zsh => "zsh",
            Shell::Bash => "bash",
            Shell::Fish => "fish",
            Shell::PowerShell => "powershell",
        }
    }
}

/// A virtual environment living directly under the registry root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    name: String,
    path: PathBuf,
}

impl Environment {
    pub fn new(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the environment's executables
    pub fn scripts_dir(&self) -> PathBuf {
        self.path.join(scripts_dir_name())
    }

    /// The environment's interpreter
    pub fn python(&self) -> PathBuf {
        self.scripts_dir().join(executable_name("python"))
    }

    /// The environment's package manager
    pub fn pip(&self) -> PathBuf {
        self.scripts_dir().join(executable_name("pip"))
    }

    /// Command that activates this environment in an interactive shell
    pub fn activation_command(&self, shell: Shell) -> String {
        let scripts = self.scripts_dir();
        match shell {
            Shell::Zsh | Shell::Bash => {
                format!("source \"{}\"", scripts.join("activate").display())
            }
            Shell::Fish => format!("source \"{}\"", scripts.join("activate.fish").display()),
            Shell::PowerShell => format!("& \"{}\"", scripts.join("Activate.ps1").display()),
        }
    }
}
