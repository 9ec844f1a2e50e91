//! The dispatch engine.
//!
//! [`Keyboard`] owns the key registry, the layer stack and the keyboard state
//! for the lifetime of the firmware. It detects press/release transitions,
//! resolves the winning layer independently on each edge, and executes the
//! bound action. The async [`Keyboard::run`] loop is the input context of the
//! firmware: it is the sole writer of keyboard state and publishes a fresh
//! snapshot after every event for the transport context to read.

use crate::action::Action;
use crate::channel::{self, KEY_EVENT_CHANNEL};
use crate::error::Error;
use crate::layer::LayerStack;
use crate::registry::KeyRegistry;
use crate::state::{KeyboardState, StateSnapshot};

pub struct Keyboard<const CAP: usize> {
    registry: KeyRegistry<CAP>,
    layers: LayerStack,
    state: KeyboardState,
}

impl<const CAP: usize> Keyboard<CAP> {
    /// Configure a keyboard with `key_count` keys, all bindings transparent.
    pub fn new(key_count: usize) -> Result<Self, Error> {
        Ok(Self {
            registry: KeyRegistry::configure(key_count)?,
            layers: LayerStack::new(),
            state: KeyboardState::new(),
        })
    }

    /// Replace the binding at one `(key, layer)` slot. This is the contract
    /// the keymap tooling calls at configuration time.
    pub fn bind(&mut self, key_index: usize, layer: u8, action: Action) -> Result<(), Error> {
        self.registry.bind(key_index, layer, action)
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn state(&self) -> &KeyboardState {
        &self.state
    }

    /// Current state plus layer bitmask as one immutable value.
    pub fn snapshot(&self) -> StateSnapshot {
        self.state.snapshot(self.layers.bitmask())
    }

    /// Feed one stable sample of a key's physical state.
    ///
    /// Only a state change produces an event; repeated samples of the same
    /// state are no-ops. On a transition the winning layer is re-resolved
    /// against the current layer flags, so a momentary-layer key releasing
    /// reverts its own layer even if another key changed the stack meanwhile.
    pub fn update_key(&mut self, key_index: usize, pressed: bool) -> Result<(), Error> {
        if self.registry.is_pressed(key_index)? == pressed {
            return Ok(());
        }
        self.registry.set_pressed(key_index, pressed)?;
        let layer = self.layers.resolve();
        self.dispatch(key_index, layer, pressed)
    }

    /// Execute the binding at `(key_index, layer)`, chaining transparent
    /// entries down the stack. The default layer's binding is always
    /// reachable; a transparent binding there is a no-op.
    fn dispatch(&mut self, key_index: usize, layer: u8, pressed: bool) -> Result<(), Error> {
        let mut layer = layer;
        loop {
            match self.registry.binding(key_index, layer)? {
                Action::Transparent => match self.layers.resolve_below(layer) {
                    Some(below) => layer = below,
                    None => return Ok(()),
                },
                action => return self.execute(action, pressed),
            }
        }
    }

    fn execute(&mut self, action: Action, pressed: bool) -> Result<(), Error> {
        match action {
            Action::No => Err(Error::InvalidBinding),
            Action::Transparent => Ok(()),
            Action::Key(code) => {
                self.state.set_key(code, pressed);
                Ok(())
            }
            Action::Modifier(mask) => {
                self.state.set_modifier_bits(mask, pressed);
                Ok(())
            }
            Action::Consumer(code) => {
                if pressed {
                    self.state.set_consumer(code);
                } else {
                    self.state.clear_consumer(code);
                }
                Ok(())
            }
            Action::MomentaryLayer(target) => self.layers.set_active(target, pressed),
            Action::ToggleLayer(target) => {
                if pressed {
                    // Release back toward the default layer when the target
                    // already won resolution, otherwise bring it up.
                    let resolved = self.layers.resolve();
                    self.layers.set_active(target, resolved != target)
                } else {
                    Ok(())
                }
            }
            Action::LayerOnExclusive(target) => {
                if pressed {
                    self.layers.turn_on_exclusive(target)
                } else {
                    Ok(())
                }
            }
            Action::DefaultLayer(target) => {
                if pressed {
                    self.layers.set_default_layer(target)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// The input context: receive key transitions, dispatch, publish.
    ///
    /// Dispatch errors are contained within the event that caused them; the
    /// loop logs and keeps going.
    pub async fn run(&mut self) {
        loop {
            let event = KEY_EVENT_CHANNEL.receive().await;
            if let Err(e) = self.update_key(event.key as usize, event.pressed) {
                error!("key {} dispatch error: {:?}", event.key, e);
            }
            channel::publish_snapshot(self.snapshot());
        }
    }

    /// Explicit teardown, for tests; the firmware itself never shuts down.
    pub fn release(self) {
        self.registry.release();
    }
}
