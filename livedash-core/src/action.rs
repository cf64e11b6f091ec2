//! Button actions
//!
//! Every configured button carries an action identifier. Handlers are bound
//! by identifier after the dashboard is loaded; a command line naming the
//! identifier (or a press on the button) invokes the handler.

use alloc::rc::Rc;
use heapless::Vec;

use crate::config::{ButtonConfig, Id, MAX_BUTTONS};

/// Something that reacts to an action
///
/// Any `Fn(&str)` closure is a handler; whatever it captures is its context.
pub trait ActionHandler {
    fn invoke(&self, action_id: &str);
}

impl<F> ActionHandler for F
where
    F: Fn(&str),
{
    fn invoke(&self, action_id: &str) {
        self(action_id)
    }
}

/// Dispatch outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Handler ran
    Invoked,
    /// A button matched but has no handler
    Unbound,
    /// No button carries this action
    Unknown,
}

struct Slot {
    action_id: Id,
    handler: Option<Rc<dyn ActionHandler>>,
}

/// Action identifier to handler table, one slot per button
#[derive(Default)]
pub struct ActionDispatcher {
    slots: Vec<Slot, MAX_BUTTONS>,
}

impl core::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(
                self.slots
                    .iter()
                    .map(|s| (s.action_id.as_str(), s.handler.is_some())),
            )
            .finish()
    }
}

impl ActionDispatcher {
    /// One unbound slot per configured button
    pub fn new(buttons: &[ButtonConfig]) -> Self {
        let mut slots = Vec::new();
        for button in buttons.iter().take(MAX_BUTTONS) {
            let _ = slots.push(Slot {
                action_id: button.action_id.clone(),
                handler: None,
            });
        }
        Self { slots }
    }

    /// Bind `handler` to every slot with this action identifier
    ///
    /// Replaces any previous binding. Returns whether any slot matched.
    pub fn bind(&mut self, action_id: &str, handler: Rc<dyn ActionHandler>) -> bool {
        let mut matched = false;
        for slot in self.slots.iter_mut().filter(|s| s.action_id == action_id) {
            slot.handler = Some(handler.clone());
            matched = true;
        }
        matched
    }

    /// Invoke the handler of the first slot with this action identifier
    pub fn dispatch(&self, action_id: &str) -> Dispatch {
        let Some(slot) = self.slots.iter().find(|s| s.action_id == action_id) else {
            return Dispatch::Unknown;
        };
        match &slot.handler {
            Some(handler) => {
                handler.invoke(action_id);
                Dispatch::Invoked
            }
            None => Dispatch::Unbound,
        }
    }
}
