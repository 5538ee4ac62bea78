// Boy states, events and the transition table

use super::context::BoyContext;
use crate::engine::fsm::TransitionTable;
use crate::engine::input::{Key, KeyInput};

/// Which behaviour the boy is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoyState {
    /// Standing still, falls asleep after a while
    Idle,
    /// Moving while a direction is held
    Run,
    /// Lying down until woken
    Sleep,
    /// Running on its own, speeding up and growing
    AutoRun,
}

impl BoyState {
    pub const ALL: [BoyState; 4] = [Self::Idle, Self::Run, Self::Sleep, Self::AutoRun];
}

/// Everything the state machine reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Delivered once to the initial state
    Start,
    /// A key going down or up
    Input(KeyInput),
    /// Idle waited long enough
    TimeOut,
    /// Auto-run ran long enough
    AutoRunTimeOut,
}

impl Event {
    fn input(&self) -> Option<&KeyInput> {
        match self {
            Self::Input(input) => Some(input),
            _ => None,
        }
    }

    /// `key` went down
    pub fn is_down(&self, key: Key) -> bool {
        self.input().is_some_and(|i| i.is_down(key))
    }

    /// `key` went up
    pub fn is_up(&self, key: Key) -> bool {
        self.input().is_some_and(|i| i.is_up(key))
    }
}

/// Arrow keys along and against the current movement, if moving
fn run_arrows(ctx: &BoyContext) -> Option<(Key, Key)> {
    match ctx.dir.signum() {
        1 => Some((Key::Right, Key::Left)),
        -1 => Some((Key::Left, Key::Right)),
        _ => None,
    }
}

pub fn right_down(_: &BoyContext, e: &Event) -> bool {
    e.is_down(Key::Right)
}

pub fn right_up(_: &BoyContext, e: &Event) -> bool {
    e.is_up(Key::Right)
}

pub fn left_down(_: &BoyContext, e: &Event) -> bool {
    e.is_down(Key::Left)
}

pub fn left_up(_: &BoyContext, e: &Event) -> bool {
    e.is_up(Key::Left)
}

pub fn space_down(_: &BoyContext, e: &Event) -> bool {
    e.is_down(Key::Space)
}

pub fn trigger_down(_: &BoyContext, e: &Event) -> bool {
    e.is_down(Key::Trigger)
}

pub fn time_out(_: &BoyContext, e: &Event) -> bool {
    *e == Event::TimeOut
}

pub fn auto_run_time_out(_: &BoyContext, e: &Event) -> bool {
    *e == Event::AutoRunTimeOut
}

/// The arrow driving the current run was released
pub fn run_key_up(ctx: &BoyContext, e: &Event) -> bool {
    run_arrows(ctx).is_some_and(|(along, _)| e.is_up(along))
}

/// The arrow against the current run went down
pub fn reverse_key_down(ctx: &BoyContext, e: &Event) -> bool {
    run_arrows(ctx).is_some_and(|(_, against)| e.is_down(against))
}

/// The boy's transitions. Initial state is `Idle`.
pub fn transition_table() -> TransitionTable<BoyState, BoyContext, Event> {
    use BoyState::*;

    TransitionTable::new()
        .on(Idle, time_out, Sleep)
        .on(Idle, right_down, Run)
        .on(Idle, left_down, Run)
        .on(Idle, right_up, Run)
        .on(Idle, left_up, Run)
        .on(Idle, trigger_down, AutoRun)
        .on(Sleep, space_down, Idle)
        .on(Sleep, right_down, Run)
        .on(Sleep, left_down, Run)
        .on(Sleep, right_up, Run)
        .on(Sleep, left_up, Run)
        .on(Run, run_key_up, Idle)
        .on(Run, reverse_key_down, Idle)
        .on(AutoRun, auto_run_time_out, Idle)
        .on(AutoRun, right_down, Run)
        .on(AutoRun, left_down, Run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::boy::states::testing::context;
    use crate::game::boy::tuning::BoyTuning;

    fn every_event() -> Vec<Event> {
        let mut events = vec![Event::Start, Event::TimeOut, Event::AutoRunTimeOut];
        for key in [Key::Left, Key::Right, Key::Trigger, Key::Space] {
            events.push(Event::Input(KeyInput::down(key)));
            events.push(Event::Input(KeyInput::up(key)));
        }
        events
    }

    fn moving(dir: i32) -> BoyContext {
        let (mut ctx, _clock) = context(BoyTuning::default());
        ctx.dir = dir;
        ctx
    }

    fn down(key: Key) -> Event {
        Event::Input(KeyInput::down(key))
    }

    fn up(key: Key) -> Event {
        Event::Input(KeyInput::up(key))
    }

    #[test]
    fn test_guards_match_only_their_event() {
        let ctx = moving(0);
        assert!(right_down(&ctx, &down(Key::Right)));
        assert!(!right_down(&ctx, &up(Key::Right)));
        assert!(!right_down(&ctx, &down(Key::Left)));
        assert!(!right_down(&ctx, &Event::TimeOut));
        assert!(time_out(&ctx, &Event::TimeOut));
        assert!(!time_out(&ctx, &Event::AutoRunTimeOut));
    }

    #[test]
    fn test_run_guards_follow_direction() {
        let right = moving(1);
        assert!(run_key_up(&right, &up(Key::Right)));
        assert!(!run_key_up(&right, &up(Key::Left)));
        assert!(reverse_key_down(&right, &down(Key::Left)));
        assert!(!reverse_key_down(&right, &down(Key::Right)));

        let left = moving(-1);
        assert!(run_key_up(&left, &up(Key::Left)));
        assert!(reverse_key_down(&left, &down(Key::Right)));

        let still = moving(0);
        assert!(!run_key_up(&still, &up(Key::Right)));
        assert!(!reverse_key_down(&still, &down(Key::Left)));
    }

    #[test]
    fn test_table_resolves_every_event_without_overlap() {
        // resolve() debug-asserts exclusivity, so walking every pair covers it
        let table = transition_table();
        for dir in [-1, 0, 1] {
            let ctx = moving(dir);
            for state in BoyState::ALL {
                for event in every_event() {
                    table.resolve(state, &ctx, &event);
                }
            }
        }
    }

    #[test]
    fn test_topology() {
        let table = transition_table();
        let ctx = moving(0);
        let resolve = |state, event| table.resolve(state, &ctx, &event);

        assert_eq!(resolve(BoyState::Idle, Event::TimeOut), Some(BoyState::Sleep));
        assert_eq!(resolve(BoyState::Idle, up(Key::Left)), Some(BoyState::Run));
        assert_eq!(resolve(BoyState::Idle, down(Key::Trigger)), Some(BoyState::AutoRun));
        assert_eq!(resolve(BoyState::Idle, down(Key::Space)), None);

        assert_eq!(resolve(BoyState::Sleep, down(Key::Space)), Some(BoyState::Idle));
        assert_eq!(resolve(BoyState::Sleep, up(Key::Right)), Some(BoyState::Run));
        assert_eq!(resolve(BoyState::Sleep, Event::TimeOut), None);
        assert_eq!(resolve(BoyState::Sleep, down(Key::Trigger)), None);

        assert_eq!(resolve(BoyState::AutoRun, Event::AutoRunTimeOut), Some(BoyState::Idle));
        assert_eq!(resolve(BoyState::AutoRun, Event::TimeOut), None);
        assert_eq!(resolve(BoyState::AutoRun, down(Key::Right)), Some(BoyState::Run));
        // Releasing a key does not interrupt auto-run
        assert_eq!(resolve(BoyState::AutoRun, up(Key::Right)), None);
    }

    #[test]
    fn test_run_exits_on_release_or_reverse_only() {
        let table = transition_table();
        let ctx = moving(1);
        let resolve = |event| table.resolve(BoyState::Run, &ctx, &event);

        assert_eq!(resolve(up(Key::Right)), Some(BoyState::Idle));
        assert_eq!(resolve(down(Key::Left)), Some(BoyState::Idle));
        assert_eq!(resolve(up(Key::Left)), None);
        assert_eq!(resolve(down(Key::Right)), None);
        assert_eq!(resolve(down(Key::Trigger)), None);
    }
}
