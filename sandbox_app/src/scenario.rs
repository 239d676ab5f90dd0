//! Scenario files: shapes to spawn and steps to run against them

use collision_engine::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while loading or running a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Collision error: {0}")]
    Collision(#[from] CollisionError),

    #[error("No shape owned by entity {0}")]
    UnknownOwner(u32),
}

/// A shape declaration
#[derive(Debug, Clone, Deserialize)]
pub enum ShapeSpec {
    Rectangle { owner: u32, center: [f32; 3], size: [f32; 3] },
    Circle { owner: u32, center: [f32; 3], radius: f32 },
    Group { owner: u32, center: [f32; 3], size: [f32; 3], children: Vec<ShapeSpec> },
}

impl ShapeSpec {
    fn owner(&self) -> u32 {
        match self {
            Self::Rectangle { owner, .. } | Self::Circle { owner, .. } | Self::Group { owner, .. } => *owner,
        }
    }

    fn build(&self) -> Result<Shape, GeometryError> {
        let owner = Entity::new(self.owner());
        match self {
            Self::Rectangle { center, size, .. } => {
                Shape::rectangle(owner, Vec3::from(*center), Vec3::from(*size))
            }
            Self::Circle { center, radius, .. } => Shape::circle(owner, Vec3::from(*center), *radius),
            Self::Group { center, size, children, .. } => {
                let children = children.iter().map(Self::build).collect::<Result<Vec<_>, _>>()?;
                Shape::group(owner, Vec3::from(*center), Vec3::from(*size), children)
            }
        }
    }
}

/// One scripted action, addressed by owning entity id
#[derive(Debug, Clone, Deserialize)]
pub enum Step {
    Move { owner: u32, dx: f32, dy: f32 },
    Force { owner: u32, dx: f32, dy: f32 },
    Register { owner: u32 },
    Remove { owner: u32 },
    Relation { a: u32, b: u32 },
}

/// A full scenario file
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: CollisionConfig,
    pub shapes: Vec<ShapeSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Tally of step outcomes
#[derive(Debug, Default)]
pub struct Report {
    pub blocked_spawns: usize,
    pub moves_accepted: usize,
    pub moves_rejected: usize,
}

impl Scenario {
    /// Parse a RON scenario file
    pub fn load(path: &str) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }

    /// Spawn every shape, then run the steps in order
    pub fn run(&self) -> Result<Report, ScenarioError> {
        let mut scene = CollisionScene::new(self.config.clone())?;
        let mut report = Report::default();
        let mut by_owner = HashMap::new();

        for spec in &self.shapes {
            let handle = scene.insert_shape(spec.build()?);
            by_owner.insert(spec.owner(), handle);
            if !scene.register(handle)? {
                log::warn!("Entity {} spawned overlapping another shape", spec.owner());
                report.blocked_spawns += 1;
            }
        }

        let lookup = |owner: u32| by_owner.get(&owner).copied().ok_or(ScenarioError::UnknownOwner(owner));

        for step in &self.steps {
            match *step {
                Step::Move { owner, dx, dy } => {
                    if scene.try_move(lookup(owner)?, dx, dy)? {
                        log::info!("Entity {owner} moved by ({dx}, {dy})");
                        report.moves_accepted += 1;
                    } else {
                        log::info!("Entity {owner} blocked moving by ({dx}, {dy})");
                        report.moves_rejected += 1;
                    }
                }
                Step::Force { owner, dx, dy } => {
                    scene.force_move(lookup(owner)?, dx, dy)?;
                    log::info!("Entity {owner} forced by ({dx}, {dy})");
                }
                Step::Register { owner } => {
                    let clear = scene.register(lookup(owner)?)?;
                    log::info!("Entity {owner} re-registered, clear: {clear}");
                }
                Step::Remove { owner } => {
                    scene.remove_shape(lookup(owner)?)?;
                    log::info!("Entity {owner} removed");
                }
                Step::Relation { a, b } => {
                    let relation = scene.relation(lookup(a)?, lookup(b)?, false)?;
                    log::info!("Relation of {a} to {b}: {relation:?}");
                }
            }
        }

        Ok(report)
    }
}
