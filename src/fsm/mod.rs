//! Function-pointer finite state machine engine for the wake cycle.
//!
//! Classic embedded FSM pattern in Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StateTable                                                  │
//! │  ┌──────────────┬──────────┬──────────┬───────────────────┐  │
//! │  │ StateId      │ on_enter │ on_exit  │ on_update         │  │
//! │  ├──────────────┼──────────┼──────────┼───────────────────┤  │
//! │  │ Booting      │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  │ Measuring    │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  │ Encoding     │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  │ Transmitting │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  │ Sleeping     │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  └──────────────┴──────────┴──────────┴───────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service performs the current state's I/O, writes the result into
//! [`CycleContext`], then calls [`Fsm::tick`].  `on_update` inspects the
//! context and returns the next state; the engine runs `on_exit` for the
//! current state and `on_enter` for the next.  `Sleeping` is terminal.

pub mod context;
pub mod states;

use context::CycleContext;
use log::{info, warn};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Every state of one wake cycle, in pipeline order.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Booting = 0,
    Measuring = 1,
    Encoding = 2,
    Transmitting = 3,
    Sleeping = 4,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 5;

    /// Convert a table index back to `StateId`.  Out-of-range indices map
    /// to `Sleeping` so a corrupted index still ends the cycle.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Booting,
            1 => Self::Measuring,
            2 => Self::Encoding,
            3 => Self::Transmitting,
            4 => Self::Sleeping,
            _ => {
                warn!("invalid state index {idx}, forcing Sleeping");
                Self::Sleeping
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type StateActionFn = fn(&mut CycleContext);

/// Signature for the update handler.
/// Returns `Some(next)` to transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut CycleContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single state.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The state machine engine for one pass of the pipeline.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Transitions taken since `start`.
    transitions: u8,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
            transitions: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut CycleContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Evaluate the current state's `on_update` and take the transition it
    /// asks for, if any.  Returns the state after the call.
    pub fn tick(&mut self, ctx: &mut CycleContext) -> StateId {
        if let Some(next_id) = (self.table[self.current].on_update)(ctx) {
            if next_id as usize != self.current {
                self.transition(next_id, ctx);
            }
        }
        self.current_state()
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// `true` once the cycle has reached `Sleeping`.
    pub fn is_finished(&self) -> bool {
        self.current_state() == StateId::Sleeping
    }

    /// Number of transitions taken since construction.
    pub fn transitions(&self) -> u8 {
        self.transitions
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut CycleContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.transitions = self.transitions.saturating_add(1);

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
