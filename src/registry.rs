//! Ordered catalog of assessments
//!
//! Registry order is observable: results always come out in the order the
//! assessments were registered.

use crate::assessment::Assessment;
use crate::assessments::{self, Thresholds};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error modifying a registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate assessment id: {0}")]
    DuplicateId(String),

    #[error("Unknown assessment id: {0}")]
    UnknownAnchor(String),

    #[error("Position {index} out of range (registry has {len} assessments)")]
    OutOfRange { index: usize, len: usize },
}

/// Built-in assessment sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Regular posts and pages
    #[default]
    Seo,
    /// Long, central content with stricter thresholds
    Cornerstone,
}

impl Preset {
    pub fn registry(self) -> Registry {
        match self {
            Preset::Seo => Registry::seo(),
            Preset::Cornerstone => Registry::cornerstone(),
        }
    }

    pub fn thresholds(self) -> Thresholds {
        match self {
            Preset::Seo => Thresholds::seo(),
            Preset::Cornerstone => Thresholds::cornerstone(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Seo => write!(f, "seo"),
            Preset::Cornerstone => write!(f, "cornerstone"),
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "seo" | "default" => Ok(Preset::Seo),
            "cornerstone" => Ok(Preset::Cornerstone),
            _ => Err(format!("Unknown preset: {}", s)),
        }
    }
}

/// An ordered set of assessments with unique identifiers
#[derive(Clone, Default)]
pub struct Registry {
    name: String,
    assessments: Vec<Arc<dyn Assessment>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            assessments: Vec::new(),
        }
    }

    /// The standard page assessments
    pub fn seo() -> Self {
        Self::from_thresholds("seo", Thresholds::seo())
    }

    /// The standard assessments with cornerstone thresholds
    pub fn cornerstone() -> Self {
        Self::from_thresholds("cornerstone", Thresholds::cornerstone())
    }

    fn from_thresholds(name: &str, thresholds: Thresholds) -> Self {
        Self {
            name: name.to_string(),
            assessments: assessments::standard(&thresholds),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an assessment
    pub fn register(&mut self, assessment: Arc<dyn Assessment>) -> Result<(), RegistryError> {
        self.check_unique(assessment.id())?;
        self.assessments.push(assessment);
        Ok(())
    }

    /// Insert an assessment at a position
    pub fn register_at(
        &mut self,
        index: usize,
        assessment: Arc<dyn Assessment>,
    ) -> Result<(), RegistryError> {
        if index > self.assessments.len() {
            return Err(RegistryError::OutOfRange {
                index,
                len: self.assessments.len(),
            });
        }
        self.check_unique(assessment.id())?;
        self.assessments.insert(index, assessment);
        Ok(())
    }

    /// Insert an assessment directly after the one with id `anchor`
    pub fn register_after(
        &mut self,
        anchor: &str,
        assessment: Arc<dyn Assessment>,
    ) -> Result<(), RegistryError> {
        let index = self
            .position(anchor)
            .ok_or_else(|| RegistryError::UnknownAnchor(anchor.to_string()))?;
        self.register_at(index + 1, assessment)
    }

    /// Insert an assessment directly before the one with id `anchor`
    pub fn register_before(
        &mut self,
        anchor: &str,
        assessment: Arc<dyn Assessment>,
    ) -> Result<(), RegistryError> {
        let index = self
            .position(anchor)
            .ok_or_else(|| RegistryError::UnknownAnchor(anchor.to_string()))?;
        self.register_at(index, assessment)
    }

    /// Remove an assessment, returning it if present
    pub fn remove(&mut self, id: &str) -> Option<Arc<dyn Assessment>> {
        let index = self.position(id)?;
        Some(self.assessments.remove(index))
    }

    /// Keep only the assessments for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.assessments.retain(|a| keep(a.id()));
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn Assessment>> {
        self.assessments.iter().find(|a| a.id() == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.assessments.iter().position(|a| a.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.assessments.iter().map(|a| a.id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Assessment>> {
        self.assessments.iter()
    }

    pub fn assessments(&self) -> &[Arc<dyn Assessment>] {
        &self.assessments
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }

    fn check_unique(&self, id: &str) -> Result<(), RegistryError> {
        if self.contains(id) {
            return Err(RegistryError::DuplicateId(id.to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("assessments", &self.ids())
            .finish()
    }
}
