use crate::animation::task::AnimationTask;
use crate::scene::Scene;

/// Owns an ordered collection of animation tasks and advances them
/// uniformly.
///
/// Tasks tick in insertion order; when two tasks target the same
/// entity, the later-added task's mutation lands after the earlier
/// one's within a frame. Finished tasks are kept and keep receiving
/// (no-op) ticks — callers that want them gone remove them
/// externally.
#[derive(Debug, Default)]
pub struct Animator {
    tasks: Vec<AnimationTask>,
}

impl Animator {
    #[must_use]
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Takes ownership of a task, appending it to the schedule.
    pub fn add_task(&mut self, task: AnimationTask) {
        self.tasks.push(task);
    }

    /// Restarts every owned task, in insertion order.
    pub fn start_all(&mut self) {
        for task in &mut self.tasks {
            task.start();
        }
    }

    /// Advances every owned task by the same delta. Call once per
    /// frame.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) {
        for task in &mut self.tasks {
            task.tick(dt, scene);
        }
    }

    #[must_use]
    pub fn tasks(&self) -> &[AnimationTask] {
        &self.tasks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
