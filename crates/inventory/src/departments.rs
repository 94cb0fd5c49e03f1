//! Department registry.
//!
//! Issue records reference departments by name only; removing a department
//! never touches history.

use stockroom_core::{DomainError, DomainResult};

/// Non-empty, insertion-ordered set of department names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRegistry {
    names: Vec<String>,
}

impl DepartmentRegistry {
    /// Build from a list of names. Blank and duplicate names are rejected and
    /// the list must not be empty.
    pub fn new<I, S>(names: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self { names: Vec::new() };
        for name in names {
            registry.add(name.into())?;
        }
        if registry.names.is_empty() {
            return Err(DomainError::validation("at least one department is required"));
        }
        Ok(registry)
    }

    pub(crate) fn from_trusted(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Register a department (exact, case-sensitive uniqueness).
    pub fn add(&mut self, name: impl Into<String>) -> DomainResult<&str> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("department name cannot be empty"));
        }
        if self.contains(trimmed) {
            return Err(DomainError::duplicate(format!("department {trimmed}")));
        }
        self.names.push(trimmed.to_string());
        Ok(&self.names[self.names.len() - 1])
    }

    /// Unregister a department. The name is trimmed the same way `add` does.
    pub fn remove(&mut self, name: &str) -> DomainResult<String> {
        let name = name.trim();
        let idx = self
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| DomainError::not_found(format!("department {name}")))?;
        if self.names.len() == 1 {
            return Err(DomainError::last_department(name));
        }
        Ok(self.names.remove(idx))
    }
}
