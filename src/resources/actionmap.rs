//! Input router resource.
//!
//! The [`ActionMap`] maps [`InputBinding`]s to the entities and directions
//! that want them. Controllers register through the [`InputRouter`] trait on
//! attach and unregister on detach; the
//! [`route_input_observer`](crate::systems::controls::route_input_observer)
//! reads [`ActionMap::routes`] to deliver each
//! [`InputEvent`](crate::events::input::InputEvent).
//!
//! The map is a plain resource inserted by the host. Its absence from the
//! world means input routing is unavailable.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::components::movementcontrols::Direction;
use crate::resources::input::InputBinding;

/// Routes registered for one binding.
pub type Routes = SmallVec<[(Entity, Direction); 4]>;

/// Registration interface of an input router.
pub trait InputRouter {
    /// Route `binding` to `direction` on `target`.
    fn bind(&mut self, binding: &InputBinding, direction: Direction, target: Entity);
    /// Drop every route of `binding` to `target`. Unknown pairs are ignored.
    fn unbind(&mut self, binding: &InputBinding, target: Entity);
}

/// Binding-to-target routing table shared by all controllers.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActionMap {
    routes: FxHashMap<InputBinding, Routes>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes for a binding, empty when nothing is bound to it.
    pub fn routes(&self, binding: &InputBinding) -> &[(Entity, Direction)] {
        self.routes.get(binding).map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Whether `binding` routes to `target` in any direction.
    pub fn is_bound(&self, binding: &InputBinding, target: Entity) -> bool {
        self.routes(binding).iter().any(|(e, _)| *e == target)
    }

    /// Total number of `(binding, target, direction)` routes.
    pub fn binding_count(&self) -> usize {
        self.routes.values().map(|r| r.len()).sum()
    }

    /// All bindings with at least one route.
    pub fn bindings(&self) -> impl Iterator<Item = &InputBinding> {
        self.routes.keys()
    }

    /// Drop every route to `target`, whatever the binding.
    pub fn unbind_target(&mut self, target: Entity) {
        self.routes.retain(|_, routes| {
            routes.retain(|(e, _)| *e != target);
            !routes.is_empty()
        });
    }
}

impl InputRouter for ActionMap {
    fn bind(&mut self, binding: &InputBinding, direction: Direction, target: Entity) {
        let routes = self.routes.entry(binding.clone()).or_default();
        if !routes.contains(&(target, direction)) {
            routes.push((target, direction));
        }
    }

    fn unbind(&mut self, binding: &InputBinding, target: Entity) {
        let Some(routes) = self.routes.get_mut(binding) else {
            return;
        };
        routes.retain(|(e, _)| *e != target);
        if routes.is_empty() {
            self.routes.remove(binding);
        }
    }
}
