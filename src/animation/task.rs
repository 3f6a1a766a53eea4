use glam::{Mat4, Vec3};

use crate::errors::{MarrowError, Result};
use crate::scene::{BoneKey, NodeKey, Scene};

/// What a task mutates and at what rate.
///
/// A flat enumeration keeps the scheduler homogeneous; adding a
/// variant means adding an arm to [`AnimationTask::tick`]'s apply
/// rule, nothing else.
#[derive(Debug, Clone)]
pub enum AnimationKind {
    /// Adds to the target node's Euler orientation each tick.
    NodeRotation {
        node: NodeKey,
        degrees_per_second: Vec3,
    },
    /// Adds to the target node's translation each tick.
    NodeTranslation {
        node: NodeKey,
        units_per_second: Vec3,
    },
    /// Left-multiplies an incremental rotation about a fixed axis
    /// into the target bone's final transformation each tick.
    BoneRotation {
        bone: BoneKey,
        axis: Vec3,
        degrees_per_second: f32,
    },
}

/// A duration-bounded per-tick mutation of one node or one bone.
///
/// Constructors take the total displacement and the time budget, in
/// the shape animations are usually authored ("a full turn over ten
/// seconds"), and derive the per-second rate.
///
/// # Lifecycle
///
/// The task applies `rate × dt` on every [`tick`](Self::tick) until
/// its elapsed time reaches the total duration, after which ticks are
/// permanent no-ops — it never restarts by itself. [`Self::start`]
/// rewinds the elapsed time for an explicit restart. A non-positive
/// duration is terminal from the first call.
///
/// # Cumulative bone rotation
///
/// The bone variant composes matrices: each tick's rotation is
/// multiplied onto whatever the bone's final transformation already
/// is, so rotation compounds across ticks (and across tasks) instead
/// of being recomputed from the bind pose. Long-running tasks drift
/// from the bind pose permanently unless the caller resets it — see
/// [`BoneBinding::reset_to_bind_pose`](crate::scene::BoneBinding::reset_to_bind_pose).
#[derive(Debug, Clone)]
pub struct AnimationTask {
    kind: AnimationKind,
    total_duration: f32,
    elapsed: f32,
}

impl AnimationTask {
    #[must_use]
    pub fn new(kind: AnimationKind, total_duration: f32) -> Self {
        Self {
            kind,
            total_duration,
            elapsed: 0.0,
        }
    }

    /// Rotates a node by `total_degrees` (per axis) over `duration`
    /// seconds.
    #[must_use]
    pub fn node_rotation(node: NodeKey, duration: f32, total_degrees: Vec3) -> Self {
        Self::new(
            AnimationKind::NodeRotation {
                node,
                degrees_per_second: per_second(total_degrees, duration),
            },
            duration,
        )
    }

    /// Translates a node by `total_offset` over `duration` seconds.
    #[must_use]
    pub fn node_translation(node: NodeKey, duration: f32, total_offset: Vec3) -> Self {
        Self::new(
            AnimationKind::NodeTranslation {
                node,
                units_per_second: per_second(total_offset, duration),
            },
            duration,
        )
    }

    /// Rotates a bone by `total_degrees` about `axis` over `duration`
    /// seconds.
    #[must_use]
    pub fn bone_rotation(bone: BoneKey, duration: f32, total_degrees: f32, axis: Vec3) -> Self {
        let rate = if duration > 0.0 {
            total_degrees / duration
        } else {
            0.0
        };
        Self::new(
            AnimationKind::BoneRotation {
                bone,
                axis,
                degrees_per_second: rate,
            },
            duration,
        )
    }

    /// Like [`bone_rotation`](Self::bone_rotation), resolving the
    /// bone by name among the bindings reachable from `node`.
    pub fn bone_rotation_named(
        scene: &Scene,
        node: NodeKey,
        bone_name: &str,
        duration: f32,
        total_degrees: f32,
        axis: Vec3,
    ) -> Result<Self> {
        let bone = scene
            .find_bone(node, bone_name)
            .ok_or_else(|| MarrowError::BoneNotFound(bone_name.to_owned()))?;
        Ok(Self::bone_rotation(bone, duration, total_degrees, axis))
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> &AnimationKind {
        &self.kind
    }

    #[inline]
    #[must_use]
    pub fn total_duration(&self) -> f32 {
        self.total_duration
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether the time budget is spent; further ticks are no-ops.
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total_duration
    }

    /// Rewinds the elapsed time to zero, (re)activating the task.
    pub fn start(&mut self) {
        self.elapsed = 0.0;
    }

    /// Advances the task by `dt` seconds, applying this tick's
    /// incremental mutation to its target in `scene`.
    ///
    /// A task whose target no longer exists logs a warning and leaves
    /// the scene untouched; the frame loop is never at risk from a
    /// stale target.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) {
        if self.is_finished() {
            return;
        }
        self.apply(dt, scene);
        self.elapsed += dt;
    }

    fn apply(&self, dt: f32, scene: &mut Scene) {
        match &self.kind {
            AnimationKind::NodeRotation {
                node,
                degrees_per_second,
            } => {
                let Some(target) = scene.get_node_mut(*node) else {
                    log::warn!("animation: target node no longer exists");
                    return;
                };
                let tick_degrees = *degrees_per_second * dt;
                target.rotate(tick_degrees * (std::f32::consts::PI / 180.0));
            }
            AnimationKind::NodeTranslation {
                node,
                units_per_second,
            } => {
                let Some(target) = scene.get_node_mut(*node) else {
                    log::warn!("animation: target node no longer exists");
                    return;
                };
                target.translate(*units_per_second * dt);
            }
            AnimationKind::BoneRotation {
                bone,
                axis,
                degrees_per_second,
            } => {
                let Some(binding) = scene.bones.get_mut(*bone) else {
                    log::warn!("animation: bone not found");
                    return;
                };
                let Some(axis) = axis.try_normalize() else {
                    return;
                };
                let angle = (degrees_per_second * dt).to_radians();
                binding.final_transformation =
                    Mat4::from_axis_angle(axis, angle) * binding.final_transformation;
            }
        }
    }
}

fn per_second(total: Vec3, duration: f32) -> Vec3 {
    if duration > 0.0 {
        total / duration
    } else {
        Vec3::ZERO
    }
}
