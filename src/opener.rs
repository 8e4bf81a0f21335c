// src/opener.rs
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use log::{debug, warn};

/// Hands a file to whatever the desktop uses to open it without waiting on it.
pub trait Opener {
    fn open(&self, path: &Path);
}

pub struct SystemOpener {
    program: Option<PathBuf>,
    /// Launched openers not yet waited on.
    children: RefCell<Vec<Child>>,
}

impl SystemOpener {
    const CANDIDATES: [&'static str; 2] = ["xdg-open", "open"];

    /// Uses `program` if given, otherwise the first known opener on `PATH`.
    pub fn new(program: Option<PathBuf>) -> Self {
        let program = program.or_else(|| {
            Self::CANDIDATES
                .iter()
                .find_map(|name| which::which(name).ok())
        });
        if program.is_none() {
            warn!("no default opener found on PATH");
        }
        SystemOpener { program, children: RefCell::new(Vec::new()) }
    }

    pub fn program(&self) -> Option<&Path> {
        self.program.as_deref()
    }

    /// Waits on every opener that has exited. Never blocks.
    pub fn reap(&self) {
        self.children.borrow_mut().retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!("opener {} exited with {}", child.id(), status);
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!("cannot poll opener {}: {}", child.id(), e);
                false
            }
        });
    }

    pub fn pending(&self) -> usize {
        self.children.borrow().len()
    }
}

impl Opener for SystemOpener {
    fn open(&self, path: &Path) {
        let Some(program) = &self.program else {
            warn!("cannot open {}: no opener configured", path.display());
            return;
        };

        debug!("opening {} with {}", path.display(), program.display());
        let spawned = Command::new(program)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => self.children.borrow_mut().push(child),
            Err(e) => warn!("failed to launch {}: {}", program.display(), e),
        }
        self.reap();
    }
}
