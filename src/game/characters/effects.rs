// Hooks for jump and landing effects (dust, sounds)

use super::events::{EventBus, MotionEvent, SubscriptionId};

type EffectHandler = Box<dyn FnMut()>;

/// Routes movement events to effect callbacks. State changes are ignored;
/// animation already reacts to those.
#[derive(Default)]
pub struct HeroEffects {
    on_jump: Vec<EffectHandler>,
    on_land: Vec<EffectHandler>,
    on_hard_land: Vec<EffectHandler>,
}

impl HeroEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_jump(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_jump.push(Box::new(handler));
        self
    }

    pub fn on_land(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_land.push(Box::new(handler));
        self
    }

    pub fn on_hard_land(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_hard_land.push(Box::new(handler));
        self
    }

    /// Run the handlers registered for `event`
    pub fn handle(&mut self, event: &MotionEvent) {
        let handlers = match event {
            MotionEvent::Jump => &mut self.on_jump,
            MotionEvent::Land => &mut self.on_land,
            MotionEvent::HardLand => &mut self.on_hard_land,
            MotionEvent::StateChanged(_) => return,
        };
        for handler in handlers.iter_mut() {
            handler();
        }
    }

    /// Subscribe to `bus`, taking ownership of the handlers
    pub fn attach(mut self, bus: &mut EventBus) -> SubscriptionId {
        log::debug!(
            "Attaching effects: {} jump, {} land, {} hard land",
            self.on_jump.len(),
            self.on_land.len(),
            self.on_hard_land.len()
        );
        bus.subscribe(move |event| self.handle(event))
    }
}

impl std::fmt::Debug for HeroEffects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeroEffects")
            .field("on_jump", &self.on_jump.len())
            .field("on_land", &self.on_land.len())
            .field("on_hard_land", &self.on_hard_land.len())
            .finish()
    }
}
