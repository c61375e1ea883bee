// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-plugin outcomes of a broadcast invocation.

use plugrack_core::PlugrackError;
use serde_json::Value;

/// What one plugin did with the broadcast argument.
#[derive(Debug)]
pub struct InvocationOutcome {
    /// Qualified name of the plugin.
    pub plugin: String,
    pub description: String,
    pub argument: Value,
    pub result: Result<Value, PlugrackError>,
}

impl InvocationOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of one broadcast, one per plugin, in discovery order.
#[derive(Debug)]
pub struct BroadcastReport {
    argument: Value,
    outcomes: Vec<InvocationOutcome>,
}

impl BroadcastReport {
    pub(crate) fn new(argument: Value, outcomes: Vec<InvocationOutcome>) -> Self {
        Self { argument, outcomes }
    }

    /// The value every plugin was invoked with.
    pub fn argument(&self) -> &Value {
        &self.argument
    }

    pub fn outcomes(&self) -> &[InvocationOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<InvocationOutcome> {
        self.outcomes
    }

    /// Outcomes whose plugin returned an error or panicked.
    pub fn failures(&self) -> impl Iterator<Item = &InvocationOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn successes(&self) -> impl Iterator<Item = &InvocationOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(InvocationOutcome::is_success)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
