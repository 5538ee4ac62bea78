// Table-driven finite state machine
//
// The machine itself only knows the current state id and the transition table.
// State objects are owned by the caller and handed in on every call through a
// `StateSet`, together with the shared context the states read and write.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, trace};

use crate::engine::renderer::DrawSurface;

/// A pure predicate over the shared context and an event
pub type Guard<C, E> = fn(&C, &E) -> bool;

/// Errors raised while assembling a state machine
#[derive(Debug, thiserror::Error)]
pub enum FsmError {
    #[error("No state registered for {0}")]
    UnknownState(String),

    #[error("Transition table has no rules for {0}")]
    EmptyState(String),
}

/// Behaviour of a single state
///
/// `C` is the shared context (the owning entity's fields), `E` the event type.
pub trait State<C, E> {
    /// Called when the machine switches into this state
    fn enter(&mut self, ctx: &mut C, event: &E);

    /// Called when the machine leaves this state
    fn exit(&mut self, _ctx: &mut C, _event: &E) {}

    /// Per-frame logic. A returned event is dispatched before the frame is drawn.
    fn update(&mut self, ctx: &mut C) -> Option<E>;

    /// Render the state
    fn draw(&self, ctx: &C, surface: &mut dyn DrawSurface);
}

/// Lookup from state id to state object
pub trait StateSet {
    type Key;
    type Context;
    type Event;

    fn state(&self, key: Self::Key) -> &dyn State<Self::Context, Self::Event>;
    fn state_mut(&mut self, key: Self::Key) -> &mut dyn State<Self::Context, Self::Event>;

    /// Whether `key` has a state object behind it
    fn contains(&self, key: Self::Key) -> bool;
}

/// A single rule: when `guard` matches, go to `target`
struct Transition<K, C, E> {
    guard: Guard<C, E>,
    target: K,
}

/// Ordered guard lists per source state
pub struct TransitionTable<K, C, E> {
    rules: HashMap<K, Vec<Transition<K, C, E>>>,
}

impl<K: Copy + Eq + Hash + Debug, C, E> TransitionTable<K, C, E> {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Add a rule. Rules for the same source are evaluated in insertion order.
    pub fn on(mut self, from: K, guard: Guard<C, E>, to: K) -> Self {
        self.rules
            .entry(from)
            .or_default()
            .push(Transition { guard, target: to });
        self
    }

    /// Find the target for `event` while in `from`. First matching guard wins.
    pub fn resolve(&self, from: K, ctx: &C, event: &E) -> Option<K> {
        let rules = self.rules.get(&from)?;
        let mut matching = rules.iter().filter(|rule| (rule.guard)(ctx, event));
        let first = matching.next()?;

        debug_assert!(
            matching.next().is_none(),
            "guards for {:?} are not mutually exclusive",
            from
        );

        Some(first.target)
    }

    /// Every state id mentioned in the table, sources and targets
    fn states(&self) -> impl Iterator<Item = K> + '_ {
        self.rules
            .iter()
            .flat_map(|(from, rules)| {
                std::iter::once(*from).chain(rules.iter().map(|rule| rule.target))
            })
    }

    /// Number of rules registered for `from`
    pub fn rule_count(&self, from: K) -> usize {
        self.rules.get(&from).map_or(0, Vec::len)
    }
}

impl<K: Copy + Eq + Hash + Debug, C, E> Default for TransitionTable<K, C, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Event-driven state machine over state ids of type `K`
pub struct StateMachine<K, C, E> {
    current: K,
    table: TransitionTable<K, C, E>,
}

impl<K: Copy + Eq + Hash + Debug, C, E: Debug> StateMachine<K, C, E> {
    /// Create a machine and check that every state in the table exists in `states`
    pub fn new<S: StateSet<Key = K, Context = C, Event = E>>(
        initial: K,
        table: TransitionTable<K, C, E>,
        states: &S,
    ) -> Result<Self, FsmError> {
        if let Some(missing) = std::iter::once(initial)
            .chain(table.states())
            .find(|key| !states.contains(*key))
        {
            return Err(FsmError::UnknownState(format!("{:?}", missing)));
        }

        if table.rule_count(initial) == 0 {
            return Err(FsmError::EmptyState(format!("{:?}", initial)));
        }

        Ok(Self {
            current: initial,
            table,
        })
    }

    /// Enter the initial state
    pub fn start<S: StateSet<Key = K, Context = C, Event = E>>(
        &mut self,
        states: &mut S,
        ctx: &mut C,
        event: E,
    ) {
        debug!("{:?} entered on {:?}", self.current, event);
        states.state_mut(self.current).enter(ctx, &event);
    }

    /// Get the current state id
    pub fn current(&self) -> K {
        self.current
    }

    /// Dispatch an event. Returns whether a transition happened.
    pub fn handle_event<S: StateSet<Key = K, Context = C, Event = E>>(
        &mut self,
        states: &mut S,
        ctx: &mut C,
        event: E,
    ) -> bool {
        let Some(next) = self.table.resolve(self.current, ctx, &event) else {
            trace!("{:?} ignored {:?}", self.current, event);
            return false;
        };

        states.state_mut(self.current).exit(ctx, &event);
        debug!("{:?} --{:?}--> {:?}", self.current, event, next);
        self.current = next;
        states.state_mut(next).enter(ctx, &event);
        true
    }

    /// Run the current state's frame logic, then apply any event it raised
    pub fn update<S: StateSet<Key = K, Context = C, Event = E>>(
        &mut self,
        states: &mut S,
        ctx: &mut C,
    ) {
        if let Some(event) = states.state_mut(self.current).update(ctx) {
            self.handle_event(states, ctx, event);
        }
    }

    /// Draw the current state
    pub fn draw<S: StateSet<Key = K, Context = C, Event = E>>(
        &self,
        states: &S,
        ctx: &C,
        surface: &mut dyn DrawSurface,
    ) {
        states.state(self.current).draw(ctx, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::{Blit, Rect};
    use glam::Vec2;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Light {
        Off,
        On,
        Broken,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Signal {
        Flip,
        Surge,
        Noise,
    }

    type Log = Vec<String>;

    fn is_flip(_: &Log, e: &Signal) -> bool {
        *e == Signal::Flip
    }

    fn is_surge(_: &Log, e: &Signal) -> bool {
        *e == Signal::Surge
    }

    fn always(_: &Log, _: &Signal) -> bool {
        true
    }

    /// Only flips before anything has been logged
    fn is_first_flip(log: &Log, e: &Signal) -> bool {
        log.is_empty() && *e == Signal::Flip
    }

    /// Records callbacks into the context so tests can inspect ordering
    struct Probe {
        name: &'static str,
        rect: Rect,
        raise: Option<Signal>,
    }

    impl State<Vec<String>, Signal> for Probe {
        fn enter(&mut self, ctx: &mut Vec<String>, _event: &Signal) {
            ctx.push(format!("enter {}", self.name));
        }

        fn exit(&mut self, ctx: &mut Vec<String>, _event: &Signal) {
            ctx.push(format!("exit {}", self.name));
        }

        fn update(&mut self, ctx: &mut Vec<String>) -> Option<Signal> {
            ctx.push(format!("do {}", self.name));
            self.raise.take()
        }

        fn draw(&self, _ctx: &Vec<String>, surface: &mut dyn DrawSurface) {
            surface.blit(Blit::new(self.rect, Vec2::ZERO));
        }
    }

    struct Lamp {
        off: Probe,
        on: Probe,
    }

    impl StateSet for Lamp {
        type Key = Light;
        type Context = Vec<String>;
        type Event = Signal;

        fn state(&self, key: Light) -> &dyn State<Vec<String>, Signal> {
            match key {
                Light::Off | Light::Broken => &self.off,
                Light::On => &self.on,
            }
        }

        fn state_mut(&mut self, key: Light) -> &mut dyn State<Vec<String>, Signal> {
            match key {
                Light::Off | Light::Broken => &mut self.off,
                Light::On => &mut self.on,
            }
        }

        fn contains(&self, key: Light) -> bool {
            key != Light::Broken
        }
    }

    const OFF_RECT: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);
    const ON_RECT: Rect = Rect::new(1.0, 0.0, 1.0, 1.0);

    fn lamp() -> Lamp {
        Lamp {
            off: Probe {
                name: "off",
                rect: OFF_RECT,
                raise: None,
            },
            on: Probe {
                name: "on",
                rect: ON_RECT,
                raise: None,
            },
        }
    }

    fn table() -> TransitionTable<Light, Log, Signal> {
        TransitionTable::new()
            .on(Light::Off, is_flip, Light::On)
            .on(Light::On, is_flip, Light::Off)
    }

    #[test]
    fn test_transition_calls_exit_then_enter() {
        let mut states = lamp();
        let mut log = Vec::new();
        let mut sm = StateMachine::new(Light::Off, table(), &states).unwrap();

        assert!(sm.handle_event(&mut states, &mut log, Signal::Flip));
        assert_eq!(sm.current(), Light::On);
        assert_eq!(log, vec!["exit off", "enter on"]);
    }

    #[test]
    fn test_unmatched_event_is_noop() {
        let mut states = lamp();
        let mut log = Vec::new();
        let mut sm = StateMachine::new(Light::Off, table(), &states).unwrap();

        assert!(!sm.handle_event(&mut states, &mut log, Signal::Noise));
        assert_eq!(sm.current(), Light::Off);
        assert!(log.is_empty());
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let table = TransitionTable::new()
            .on(Light::Off, is_surge, Light::On)
            .on(Light::Off, is_flip, Light::Off);

        let log = Log::new();
        assert_eq!(table.resolve(Light::Off, &log, &Signal::Surge), Some(Light::On));
        assert_eq!(table.resolve(Light::Off, &log, &Signal::Flip), Some(Light::Off));
        assert_eq!(table.resolve(Light::Off, &log, &Signal::Noise), None);
        assert_eq!(table.resolve(Light::On, &log, &Signal::Flip), None);
    }

    #[test]
    fn test_guard_reads_context() {
        let table = TransitionTable::new().on(Light::Off, is_first_flip, Light::On);

        assert_eq!(table.resolve(Light::Off, &Log::new(), &Signal::Flip), Some(Light::On));
        assert_eq!(table.resolve(Light::Off, &vec!["x".to_string()], &Signal::Flip), None);
    }

    #[test]
    #[should_panic(expected = "not mutually exclusive")]
    #[cfg(debug_assertions)]
    fn test_overlapping_guards_are_caught() {
        let table = TransitionTable::new()
            .on(Light::Off, is_flip, Light::On)
            .on(Light::Off, always, Light::Off);

        table.resolve(Light::Off, &Log::new(), &Signal::Flip);
    }

    #[test]
    fn test_unknown_state_rejected() {
        let states = lamp();
        let table = table().on(Light::On, is_surge, Light::Broken);

        let err = StateMachine::new(Light::Off, table, &states).err().unwrap();
        assert_eq!(err.to_string(), "No state registered for Broken");
    }

    #[test]
    fn test_initial_state_without_rules_rejected() {
        let states = lamp();
        let table = TransitionTable::new().on(Light::On, is_flip, Light::Off);

        assert!(matches!(
            StateMachine::new(Light::Off, table, &states),
            Err(FsmError::EmptyState(_))
        ));
    }

    #[test]
    fn test_event_raised_in_update_applies_before_draw() {
        let mut states = lamp();
        states.off.raise = Some(Signal::Flip);
        let mut log = Vec::new();
        let mut sm = StateMachine::new(Light::Off, table(), &states).unwrap();

        sm.update(&mut states, &mut log);
        assert_eq!(sm.current(), Light::On);
        assert_eq!(log, vec!["do off", "exit off", "enter on"]);

        let mut blits: Vec<Blit> = Vec::new();
        sm.draw(&states, &log, &mut blits);
        assert_eq!(blits.len(), 1);
        assert_eq!(blits[0].src, ON_RECT);
    }

    #[test]
    fn test_start_enters_initial_state() {
        let mut states = lamp();
        let mut log = Vec::new();
        let mut sm = StateMachine::new(Light::Off, table(), &states).unwrap();

        sm.start(&mut states, &mut log, Signal::Noise);
        assert_eq!(log, vec!["enter off"]);
        assert_eq!(sm.current(), Light::Off);
    }
}
