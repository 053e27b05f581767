//! Concrete state handler functions and table builder.
//!
//! Each state is three plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!  BOOTING ──▶ MEASURING ──▶ ENCODING ──[frame]──▶ TRANSMITTING
//!                               │                      │
//!                          [capacity error]     [Sent | SendFailed]
//!                               ▼                      ▼
//!                            SLEEPING ◀────────────────┘
//! ```
//!
//! Every edge is unconditional except the one out of ENCODING.  No state
//! can skip SLEEPING.

use super::context::CycleContext;
use super::{StateDescriptor, StateId};
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the state table.  Called once per boot.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        StateDescriptor {
            id: StateId::Booting,
            name: "Booting",
            on_enter: None,
            on_exit: Some(booting_exit),
            on_update: booting_update,
        },
        StateDescriptor {
            id: StateId::Measuring,
            name: "Measuring",
            on_enter: None,
            on_exit: None,
            on_update: measuring_update,
        },
        StateDescriptor {
            id: StateId::Encoding,
            name: "Encoding",
            on_enter: None,
            on_exit: None,
            on_update: encoding_update,
        },
        StateDescriptor {
            id: StateId::Transmitting,
            name: "Transmitting",
            on_enter: None,
            on_exit: None,
            on_update: transmitting_update,
        },
        StateDescriptor {
            id: StateId::Sleeping,
            name: "Sleeping",
            on_enter: Some(sleeping_enter),
            on_exit: None,
            on_update: sleeping_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  BOOTING
// ═══════════════════════════════════════════════════════════════════════════

fn booting_exit(ctx: &mut CycleContext) {
    if ctx.init_failures > 0 {
        warn!(
            "BOOTING: {} subsystem(s) failed to initialise, continuing",
            ctx.init_failures
        );
    }
}

fn booting_update(_ctx: &mut CycleContext) -> Option<StateId> {
    Some(StateId::Measuring)
}

// ═══════════════════════════════════════════════════════════════════════════
//  MEASURING
// ═══════════════════════════════════════════════════════════════════════════

fn measuring_update(_ctx: &mut CycleContext) -> Option<StateId> {
    Some(StateId::Encoding)
}

// ═══════════════════════════════════════════════════════════════════════════
//  ENCODING
// ═══════════════════════════════════════════════════════════════════════════

fn encoding_update(ctx: &mut CycleContext) -> Option<StateId> {
    if ctx.frame_len.is_some() {
        Some(StateId::Transmitting)
    } else {
        warn!("ENCODING: no frame built, skipping transmission");
        Some(StateId::Sleeping)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  TRANSMITTING — outcome never changes the next state
// ═══════════════════════════════════════════════════════════════════════════

fn transmitting_update(_ctx: &mut CycleContext) -> Option<StateId> {
    Some(StateId::Sleeping)
}

// ═══════════════════════════════════════════════════════════════════════════
//  SLEEPING (terminal)
// ═══════════════════════════════════════════════════════════════════════════

fn sleeping_enter(ctx: &mut CycleContext) {
    ctx.sleep_secs = Some(ctx.config.sleep_secs);
    info!("SLEEPING: requesting {}s", ctx.config.sleep_secs);
}

fn sleeping_update(_ctx: &mut CycleContext) -> Option<StateId> {
    None
}
