//! Construction and repair projects tracked across ticks

use crate::core::types::{Cell, EntityId};
use crate::model::entity::{Entity, EntityKind};
use crate::model::properties::PropertyTable;
use crate::spatial::occupancy::Occupancy;
use crate::world::index::WorldIndex;

/// A construction goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Project {
    /// A real owned entity still below full health
    Real(Entity),
    /// An ordered structure whose construction has not started
    Planned { kind: EntityKind, position: Cell },
}

impl Project {
    pub fn kind(&self) -> EntityKind {
        match self {
            Project::Real(entity) => entity.kind,
            Project::Planned { kind, .. } => *kind,
        }
    }

    pub fn position(&self) -> Cell {
        match self {
            Project::Real(entity) => entity.position,
            Project::Planned { position, .. } => *position,
        }
    }

    /// Id of the real entity, `None` while only planned
    pub fn entity_id(&self) -> Option<EntityId> {
        match self {
            Project::Real(entity) => Some(entity.id),
            Project::Planned { .. } => None,
        }
    }

    pub fn health(&self) -> i32 {
        match self {
            Project::Real(entity) => entity.health,
            Project::Planned { .. } => 0,
        }
    }

    pub fn is_planned(&self) -> bool {
        matches!(self, Project::Planned { .. })
    }
}

/// Open projects, in the order they were opened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectList {
    projects: Vec<Project>,
}

impl ProjectList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn as_slice(&self) -> &[Project] {
        &self.projects
    }

    pub fn exists_at(&self, position: Cell) -> bool {
        self.projects.iter().any(|p| p.position() == position)
    }

    /// Open a project unless one already sits at the same position
    pub fn open(&mut self, project: Project) -> bool {
        if self.exists_at(project.position()) {
            return false;
        }
        self.projects.push(project);
        true
    }

    /// Bring projects up to date with this tick's snapshot
    ///
    /// Planned projects turn real once an owned entity of the same kind stands
    /// at the exact position; real projects are refreshed by id. Projects are
    /// dropped when complete, when their entity is gone, or (planned only)
    /// when an immovable entity blocks the footprint.
    pub fn reconcile(&mut self, index: &WorldIndex, properties: &PropertyTable) {
        let before = self.projects.len();

        self.projects = std::mem::take(&mut self.projects)
            .into_iter()
            .filter_map(|project| match project {
                Project::Planned { kind, position } => {
                    if !properties.is_repairable(kind) {
                        return Some(Project::Planned { kind, position });
                    }
                    let started = index
                        .mine_of(kind)
                        .iter()
                        .find(|e| e.position == position)
                        .cloned();
                    Some(match started {
                        Some(entity) => Project::Real(entity),
                        None => Project::Planned { kind, position },
                    })
                }
                Project::Real(entity) => match index.find_mine(entity.id) {
                    Some(current) => Some(Project::Real(current.clone())),
                    None => {
                        tracing::debug!("Project entity {} no longer present", entity.id);
                        None
                    }
                },
            })
            .filter(|project| {
                let Ok(props) = properties.get(project.kind()) else {
                    return false;
                };
                if project.health() >= props.max_health {
                    return false;
                }
                !(project.is_planned()
                    && index.grid.footprint_level(project.position(), props.size)
                        == Occupancy::Immovable)
            })
            .collect();

        if self.projects.len() != before {
            tracing::debug!(
                "Retired {} project(s), {} open",
                before - self.projects.len(),
                self.projects.len()
            );
        }
    }
}
