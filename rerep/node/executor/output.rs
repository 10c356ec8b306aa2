use super::error::{ExecutorError, ExecutorResult};
use crate::node::operations::error::{OperationError, OperationResult};
use rerep_lib::core::plan::stage::Slot;
use std::collections::HashMap;

/// Results of completed stages, by slot
#[derive(Default, Debug)]
pub struct StageOutput(HashMap<Slot, String>);

impl StageOutput {
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.0.get(&slot).map(String::as_str)
    }

    /// Get a slot that an earlier stage must have filled
    pub fn require(&self, slot: Slot) -> OperationResult<&str> {
        self.get(slot).ok_or(OperationError::MissingSlot(slot))
    }

    /// Record a stage result. Every slot is written once.
    pub fn record(&mut self, slot: Slot, value: String) -> ExecutorResult<()> {
        if self.0.contains_key(&slot) {
            return Err(ExecutorError::SlotOverwrite(slot));
        }

        self.0.insert(slot, value);
        Ok(())
    }
}
