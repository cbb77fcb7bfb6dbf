use std::cell::RefCell;
use std::collections::BTreeSet;

use super::engine::Runtime;
use super::types::{ResourceKind, RunCommand, RuntimeError};

/// Recorded runtime call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCall {
    List(ResourceKind),
    Create(ResourceKind, String),
    Run(Vec<String>),
}

/// In-memory runtime that tracks resources and records every call.
#[derive(Debug, Default)]
pub struct FakeRuntime {
    networks: RefCell<BTreeSet<String>>,
    volumes: RefCell<BTreeSet<String>>,
    calls: RefCell<Vec<RuntimeCall>>,
    fail_list: Option<ResourceKind>,
    fail_create: Option<String>,
    fail_run: Option<String>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_network(self, name: &str) -> Self {
        self.networks.borrow_mut().insert(name.to_string());
        self
    }

    pub fn with_volume(self, name: &str) -> Self {
        self.volumes.borrow_mut().insert(name.to_string());
        self
    }

    /// Make `ls` for `kind` exit non-zero.
    pub fn failing_list(mut self, kind: ResourceKind) -> Self {
        self.fail_list = Some(kind);
        self
    }

    /// Make creating a resource called `name` fail.
    pub fn failing_create(mut self, name: &str) -> Self {
        self.fail_create = Some(name.to_string());
        self
    }

    /// Make `run` fail with this stderr.
    pub fn failing_run(mut self, stderr: &str) -> Self {
        self.fail_run = Some(stderr.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RuntimeCall> {
        self.calls.borrow().clone()
    }

    pub fn creates(&self) -> Vec<RuntimeCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, RuntimeCall::Create(..)))
            .collect()
    }

    fn store(&self, kind: ResourceKind) -> &RefCell<BTreeSet<String>> {
        match kind {
            ResourceKind::Network => &self.networks,
            ResourceKind::Volume => &self.volumes,
        }
    }

    fn failed(stderr: &str) -> RuntimeError {
        RuntimeError::Failed {
            program: "docker".to_string(),
            code: Some(1),
            stderr: stderr.to_string(),
        }
    }
}

impl Runtime for FakeRuntime {
    fn list(&self, kind: ResourceKind) -> Result<Vec<String>, RuntimeError> {
        self.calls.borrow_mut().push(RuntimeCall::List(kind));
        if self.fail_list == Some(kind) {
            return Err(Self::failed("Cannot connect to the Docker daemon"));
        }
        Ok(self.store(kind).borrow().iter().cloned().collect())
    }

    fn create(&self, kind: ResourceKind, name: &str) -> Result<(), RuntimeError> {
        self.calls
            .borrow_mut()
            .push(RuntimeCall::Create(kind, name.to_string()));
        if self.fail_create.as_deref() == Some(name) {
            return Err(Self::failed("permission denied"));
        }
        self.store(kind).borrow_mut().insert(name.to_string());
        Ok(())
    }

    fn run(&self, cmd: &RunCommand) -> Result<String, RuntimeError> {
        self.calls.borrow_mut().push(RuntimeCall::Run(cmd.args.clone()));
        match &self.fail_run {
            Some(stderr) => Err(Self::failed(stderr)),
            None => Ok("f00dcafe".to_string()),
        }
    }

    fn program(&self) -> &str {
        "docker"
    }
}
