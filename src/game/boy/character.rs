// The boy: shared fields, four states and the machine that switches between them

use glam::Vec2;
use log::info;

use super::context::{BoyContext, Facing};
use super::state::{transition_table, BoyState, Event};
use super::states::{AutoRun, Idle, Run, Sleep};
use super::tuning::BoyTuning;
use crate::engine::clock::Clock;
use crate::engine::fsm::{FsmError, State, StateMachine, StateSet};
use crate::engine::input::KeyInput;
use crate::engine::renderer::DrawSurface;

/// One object per state, owned by the boy
pub struct BoyStates {
    idle: Idle,
    run: Run,
    sleep: Sleep,
    auto_run: AutoRun,
}

impl BoyStates {
    fn new(tuning: &BoyTuning) -> Self {
        Self {
            idle: Idle::new(),
            run: Run::new(),
            sleep: Sleep::new(),
            auto_run: AutoRun::new(tuning),
        }
    }
}

impl StateSet for BoyStates {
    type Key = BoyState;
    type Context = BoyContext;
    type Event = Event;

    fn state(&self, key: BoyState) -> &dyn State<BoyContext, Event> {
        match key {
            BoyState::Idle => &self.idle,
            BoyState::Run => &self.run,
            BoyState::Sleep => &self.sleep,
            BoyState::AutoRun => &self.auto_run,
        }
    }

    fn state_mut(&mut self, key: BoyState) -> &mut dyn State<BoyContext, Event> {
        match key {
            BoyState::Idle => &mut self.idle,
            BoyState::Run => &mut self.run,
            BoyState::Sleep => &mut self.sleep,
            BoyState::AutoRun => &mut self.auto_run,
        }
    }

    fn contains(&self, _key: BoyState) -> bool {
        true
    }
}

/// The animated character
pub struct Boy {
    ctx: BoyContext,
    states: BoyStates,
    state_machine: StateMachine<BoyState, BoyContext, Event>,
}

impl Boy {
    /// Spawn the boy in `Idle`
    pub fn new(clock: Box<dyn Clock>, tuning: BoyTuning) -> Result<Self, FsmError> {
        let mut ctx = BoyContext::new(tuning, clock);
        let mut states = BoyStates::new(&tuning);
        let mut state_machine = StateMachine::new(BoyState::Idle, transition_table(), &states)?;
        state_machine.start(&mut states, &mut ctx, Event::Start);

        info!("Boy spawned at ({}, {})", ctx.position.x, ctx.position.y);

        Ok(Self {
            ctx,
            states,
            state_machine,
        })
    }

    /// Feed a key event from the host
    pub fn handle_input(&mut self, input: KeyInput) {
        self.handle_event(Event::Input(input));
    }

    /// Dispatch any event. Returns whether the state changed.
    pub fn handle_event(&mut self, event: Event) -> bool {
        self.state_machine
            .handle_event(&mut self.states, &mut self.ctx, event)
    }

    /// Run one frame of the active state
    pub fn update(&mut self) {
        self.state_machine.update(&mut self.states, &mut self.ctx);
    }

    /// Draw the active state
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        self.state_machine.draw(&self.states, &self.ctx, surface);
    }

    /// Get the current state
    pub fn state(&self) -> BoyState {
        self.state_machine.current()
    }

    pub fn position(&self) -> Vec2 {
        self.ctx.position
    }

    pub fn facing(&self) -> Facing {
        self.ctx.facing
    }

    /// Movement direction: -1, 0 or 1
    pub fn dir(&self) -> i32 {
        self.ctx.dir
    }

    pub fn frame(&self) -> u32 {
        self.ctx.frame
    }

    /// The auto-run state, for its speed and scale
    pub fn auto_run(&self) -> &AutoRun {
        &self.states.auto_run
    }
}
