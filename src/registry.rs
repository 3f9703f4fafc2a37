use crate::config::ConfigStore;
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::packages::{parse_freeze, PackageManager, PipTarget};
use crate::process::{default_python, Invocation, SystemRunner, ToolRunner};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Details about one environment, gathered by probing its interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentInfo {
    pub name: String,
    pub path: PathBuf,
    pub active: bool,
    /// Output of `python --version`, if the interpreter ran
    pub python_version: Option<String>,
    /// Number of packages in the freeze listing, if pip ran
    pub package_count: Option<usize>,
    pub size_bytes: u64,
}

/// Virtual environments under one root directory, plus the persisted
/// active selection
pub struct Registry {
    root: PathBuf,
    store: ConfigStore,
    runner: Box<dyn ToolRunner>,
}

impl Registry {
    /// Registry rooted at the configured `venv_dir`, or `default_root` when
    /// none is configured
    pub fn new(store: ConfigStore, default_root: PathBuf) -> Self {
        Self::with_runner(store, default_root, Box::new(SystemRunner))
    }

    pub fn with_runner(
        store: ConfigStore,
        default_root: PathBuf,
        runner: Box<dyn ToolRunner>,
    ) -> Self {
        let root = store
            .venv_dir()
            .map(Path::to_path_buf)
            .unwrap_or(default_root);

        Self {
            root,
            store,
            runner,
        }
    }

    /// Use `root` for this session without persisting it
    pub fn override_root(&mut self, root: PathBuf) {
        self.root = root;
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ConfigStore {
        &self.store
    }

    /// Interpreter used to build environments and for the system fallback
    pub fn python(&self) -> &str {
        self.store.python().unwrap_or(default_python())
    }

    /// Name of the persisted selection, whether or not it still exists
    pub fn active_name(&self) -> Option<&str> {
        self.store.active_venv()
    }

    /// Environments under the root, in directory enumeration order
    pub fn list(&self) -> Result<Vec<Environment>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(Error::io("Failed to read environment root", &self.root, err));
            }
        };

        let mut environments = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|err| Error::io("Failed to read environment root", &self.root, err))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            environments.push(Environment::new(name, path));
        }

        Ok(environments)
    }

    /// Look up an existing environment by name
    pub fn get(&self, name: &str) -> Result<Environment> {
        if !is_single_component(name) {
            return Err(Error::NotFound(name.to_string()));
        }

        let path = self.root.join(name);
        if path.is_dir() {
            Ok(Environment::new(name, path))
        } else {
            Err(Error::NotFound(name.to_string()))
        }
    }

    /// Create a new environment with pip, using `<python> -m venv`
    pub fn create(&mut self, name: &str) -> Result<Environment> {
        let creation_error = |reason: String| Error::Creation {
            name: name.to_string(),
            reason,
        };

        if !is_valid_name(name) {
            return Err(creation_error(
                "names may only contain letters, digits, '.', '-' and '_'".to_string(),
            ));
        }

        let path = self.root.join(name);
        if path.exists() {
            return Err(creation_error(format!("{} already exists", path.display())));
        }

        fs::create_dir_all(&self.root).map_err(|err| {
            creation_error(format!(
                "failed to create environment root {}: {err}",
                self.root.display()
            ))
        })?;

        let invocation = Invocation::new(self.python()).args(["-m", "venv"]).arg(&path);
        let outcome = self.runner.run(&invocation);

        let python = self.python();
        let failure = match outcome {
            Ok(output) if output.success() => None,
            Ok(output) => Some(match output.code {
                Some(code) => format!(
                    "{python} exited with status {code}: {}",
                    output.stderr.trim()
                ),
                None => format!("{python} was terminated"),
            }),
            Err(err) => Some(format!("failed to run {python}: {err}")),
        };

        if let Some(reason) = failure {
            if path.exists() {
                if let Err(err) = fs::remove_dir_all(&path) {
                    warn!(path = %path.display(), error = %err, "could not remove partial environment");
                }
            }
            return Err(creation_error(reason));
        }

        info!(name, path = %path.display(), "created environment");
        Ok(Environment::new(name, path))
    }

    /// Remove an environment, clearing the selection if it was active
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let environment = self.get(name)?;

        fs::remove_dir_all(environment.path())
            .map_err(|err| Error::io("Failed to remove environment", environment.path(), err))?;
        info!(name, "deleted environment");

        if self.store.active_venv() == Some(name) {
            self.store.set_active_venv(None)?;
            info!(name, "cleared active environment");
        }

        Ok(())
    }

    /// Mark an environment as active and persist the choice
    pub fn activate(&mut self, name: &str) -> Result<Environment> {
        let environment = self
            .list()?
            .into_iter()
            .find(|environment| environment.name() == name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        self.store.set_active_venv(Some(name.to_string()))?;
        info!(name, "activated environment");
        Ok(environment)
    }

    /// Clear the active selection so the system interpreter is used
    pub fn deactivate(&mut self) -> Result<()> {
        if self.store.active_venv().is_some() {
            self.store.set_active_venv(None)?;
            info!("cleared active environment");
        }
        Ok(())
    }

    /// Path of the active environment; `None` means the system fallback
    pub fn active_path(&self) -> Option<PathBuf> {
        self.active_environment().map(|env| env.path().to_path_buf())
    }

    /// The active environment, if the selection still resolves
    pub fn active_environment(&self) -> Option<Environment> {
        let name = self.store.active_venv()?;
        match self.get(name) {
            Ok(environment) => Some(environment),
            Err(_) => {
                warn!(
                    name,
                    root = %self.root.display(),
                    "active environment is missing, using system interpreter"
                );
                None
            }
        }
    }

    /// Change the environment root and persist it
    pub fn set_root(&mut self, root: PathBuf) -> Result<()> {
        self.store.set_venv_dir(root.clone())?;
        info!(root = %root.display(), "environment root changed");
        self.root = root;
        Ok(())
    }

    /// Where package operations go: the active environment's pip, or the
    /// system interpreter's
    pub fn pip_target(&self) -> PipTarget {
        match self.active_environment() {
            Some(environment) => PipTarget::Environment(environment.pip()),
            None => PipTarget::System(self.python().to_string()),
        }
    }

    pub fn package_manager(&self) -> PackageManager<'_> {
        PackageManager::new(self.pip_target(), self.runner.as_ref())
    }

    /// Gather an environment's interpreter, packages and disk usage
    pub fn info(&self, name: &str) -> Result<EnvironmentInfo> {
        let environment = self.get(name)?;

        let python_version = self
            .query(&Invocation::new(environment.python()).arg("--version"))
            .and_then(|output| {
                // Python 2 printed its version on stderr.
                let text = if output.stdout.trim().is_empty() {
                    output.stderr
                } else {
                    output.stdout
                };
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            });

        let package_count = self
            .query(&Invocation::new(environment.pip()).args(["list", "--format=freeze"]))
            .map(|output| parse_freeze(&output.stdout).len());

        Ok(EnvironmentInfo {
            name: environment.name().to_string(),
            active: self.store.active_venv() == Some(environment.name()),
            size_bytes: directory_size(environment.path()),
            path: environment.path().to_path_buf(),
            python_version,
            package_count,
        })
    }

    fn query(&self, invocation: &Invocation) -> Option<crate::process::ToolOutput> {
        match self.runner.run(invocation) {
            Ok(output) if output.success() => Some(output),
            Ok(output) => {
                debug!(command = %invocation.display(), code = ?output.code, "info query failed");
                None
            }
            Err(err) => {
                debug!(command = %invocation.display(), error = %err, "info query could not run");
                None
            }
        }
    }
}

/// Whether `name` is usable as a single directory under the root
pub fn is_valid_name(name: &str) -> bool {
    static NAME: OnceLock<Regex> = OnceLock::new();
    NAME.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex"))
        .is_match(name)
}

// Environments found on disk may use any directory name, so lookups only
// require a plain path component.
fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(component)), None) if component == name
    )
}

fn directory_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.metadata().ok())
        .filter(|metadata| metadata.is_file())
        .map(|metadata| metadata.len())
        .sum()
}
