use glam::Vec2;
use rapier2d::control::{CharacterLength, EffectiveCharacterMovement, KinematicCharacterController};
use rapier2d::parry::query::ShapeCastOptions;
use rapier2d::parry::shape::Shape;
use rapier2d::prelude::*;

use super::mover::{CharacterMover, GroundContact};
use crate::engine::game_loop::FIXED_TIMESTEP;

/// Gap kept between a character and the geometry it slides along
const CHARACTER_OFFSET: Real = 0.01;

/// How far below a character's feet ground still counts as contact
const GROUND_CHECK_DISTANCE: Real = 2.0 * CHARACTER_OFFSET;

/// Minimum upward component of a surface normal for it to be ground
const MIN_GROUND_NORMAL_Y: Real = 0.7;

/// Static level geometry, queried by kinematic characters
pub struct PhysicsWorld {
    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for character shape casts
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,
}

impl PhysicsWorld {
    /// Create an empty level
    pub fn new() -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = FIXED_TIMESTEP;

        Self {
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
        }
    }

    /// Add a fixed rectangular platform
    pub fn add_platform(&mut self, center: Vec2, half_extents: Vec2) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .translation(vector![center.x, center.y])
            .build();
        self.collider_set.insert(collider)
    }

    /// Step the world so the query pipeline sees every platform
    pub fn step(&mut self) {
        let gravity: Vector<Real> = Vector::zeros();
        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Sweep a character shape through the level
    pub fn move_character(
        &self,
        controller: &KinematicCharacterController,
        shape: &dyn Shape,
        position: &Isometry<Real>,
        desired_translation: Vector<Real>,
    ) -> EffectiveCharacterMovement {
        controller.move_shape(
            self.integration_parameters.dt,
            &self.rigid_body_set,
            &self.collider_set,
            &self.query_pipeline,
            shape,
            position,
            desired_translation,
            QueryFilter::default(),
            |_| {},
        )
    }

    /// Check for walkable ground within `distance` below `shape`.
    ///
    /// Works for a shape that is not moving, which rapier's controller
    /// does not report as grounded.
    pub fn ground_below(&self, shape: &dyn Shape, position: &Isometry<Real>, distance: Real) -> bool {
        let options = ShapeCastOptions {
            max_time_of_impact: distance,
            target_distance: 0.0,
            stop_at_penetration: true,
            compute_impact_geometry_on_penetration: true,
        };
        let down: Vector<Real> = vector![0.0, -1.0];

        self.query_pipeline
            .cast_shape(
                &self.rigid_body_set,
                &self.collider_set,
                position,
                &down,
                shape,
                options,
                QueryFilter::default(),
            )
            // Normal 1 belongs to the level collider, in world space
            .is_some_and(|(_, hit)| hit.normal1.y >= MIN_GROUND_NORMAL_Y)
    }

    /// Get the number of platforms
    pub fn platform_count(&self) -> usize {
        self.collider_set.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// A box-shaped character moved by rapier's kinematic character controller
pub struct KinematicBody {
    world: PhysicsWorld,
    controller: KinematicCharacterController,
    shape: SharedShape,
    half_extents: Vec2,
    /// Center of the character box
    position: Isometry<Real>,
}

impl KinematicBody {
    /// Place a character box of `half_extents` with its feet at `feet`
    pub fn new(mut world: PhysicsWorld, feet: Vec2, half_extents: Vec2) -> Self {
        world.step();

        let controller = KinematicCharacterController {
            offset: CharacterLength::Absolute(CHARACTER_OFFSET),
            ..KinematicCharacterController::default()
        };

        Self {
            world,
            controller,
            shape: SharedShape::cuboid(half_extents.x, half_extents.y),
            half_extents,
            position: Isometry::translation(feet.x, feet.y + half_extents.y),
        }
    }

    /// Get the level the character moves through
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }
}

impl CharacterMover for KinematicBody {
    fn move_by(&mut self, delta: Vec2) -> GroundContact {
        let movement = self.world.move_character(
            &self.controller,
            &*self.shape,
            &self.position,
            vector![delta.x, delta.y],
        );
        self.position.translation.vector += movement.translation;

        // Moving up never lands; otherwise also look just below the feet
        let grounded = movement.grounded
            || (delta.y <= 0.0
                && self
                    .world
                    .ground_below(&*self.shape, &self.position, GROUND_CHECK_DISTANCE));

        GroundContact { grounded }
    }

    fn position(&self) -> Vec2 {
        let center = self.position.translation.vector;
        Vec2::new(center.x, center.y - self.half_extents.y)
    }
}
