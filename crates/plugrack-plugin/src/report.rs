// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reporting sinks for discovery and invocation events.
//!
//! Sinks are presentation only: the registry reports every discovered plugin
//! and every invocation outcome to its sink, and the sink decides how (or
//! whether) to display them.

use std::sync::{Mutex, PoisonError};

use plugrack_core::NamespacePath;
use serde_json::Value;
use tracing::{info, warn};

use crate::discovery::PluginInstance;
use crate::outcome::InvocationOutcome;

/// Receives discovery and invocation events.
///
/// All methods default to doing nothing.
pub trait ReportSink: Send + Sync {
    fn discovery_started(&self, _root: &NamespacePath) {}

    fn plugin_discovered(&self, _plugin: &PluginInstance) {}

    /// A type already instantiated earlier in the same run was seen again.
    fn duplicate_skipped(&self, _qualified_name: &str) {}

    fn discovery_finished(&self, _count: usize) {}

    fn broadcast_started(&self, _argument: &Value, _count: usize) {}

    fn invocation_completed(&self, _outcome: &InvocationOutcome) {}
}

/// Emits every event as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn discovery_started(&self, root: &NamespacePath) {
        info!(namespace = %root, "looking for plugins");
    }

    fn plugin_discovered(&self, plugin: &PluginInstance) {
        info!(
            plugin = plugin.qualified_name(),
            description = plugin.description(),
            "found plugin"
        );
    }

    fn duplicate_skipped(&self, qualified_name: &str) {
        info!(plugin = qualified_name, "skipped re-exported plugin");
    }

    fn discovery_finished(&self, count: usize) {
        info!(count, "plugin discovery complete");
    }

    fn broadcast_started(&self, argument: &Value, count: usize) {
        info!(argument = %argument, count, "applying argument to all plugins");
    }

    fn invocation_completed(&self, outcome: &InvocationOutcome) {
        match &outcome.result {
            Ok(value) => info!(
                plugin = %outcome.plugin,
                description = %outcome.description,
                argument = %outcome.argument,
                result = %value,
                "plugin applied"
            ),
            Err(error) => warn!(
                plugin = %outcome.plugin,
                description = %outcome.description,
                argument = %outcome.argument,
                error = %error,
                "plugin failed"
            ),
        }
    }
}

/// A recorded sink event.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    DiscoveryStarted {
        root: String,
    },
    PluginDiscovered {
        plugin: String,
        description: String,
    },
    DuplicateSkipped {
        plugin: String,
    },
    DiscoveryFinished {
        count: usize,
    },
    BroadcastStarted {
        argument: Value,
        count: usize,
    },
    InvocationCompleted {
        plugin: String,
        description: String,
        argument: Value,
        /// The result value, or the error rendered as a string.
        result: Result<Value, String>,
    },
}

/// Records every event in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<ReportEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns all recorded events.
    pub fn drain(&self) -> Vec<ReportEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn push(&self, event: ReportEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl ReportSink for CollectingSink {
    fn discovery_started(&self, root: &NamespacePath) {
        self.push(ReportEvent::DiscoveryStarted {
            root: root.to_string(),
        });
    }

    fn plugin_discovered(&self, plugin: &PluginInstance) {
        self.push(ReportEvent::PluginDiscovered {
            plugin: plugin.qualified_name().to_string(),
            description: plugin.description().to_string(),
        });
    }

    fn duplicate_skipped(&self, qualified_name: &str) {
        self.push(ReportEvent::DuplicateSkipped {
            plugin: qualified_name.to_string(),
        });
    }

    fn discovery_finished(&self, count: usize) {
        self.push(ReportEvent::DiscoveryFinished { count });
    }

    fn broadcast_started(&self, argument: &Value, count: usize) {
        self.push(ReportEvent::BroadcastStarted {
            argument: argument.clone(),
            count,
        });
    }

    fn invocation_completed(&self, outcome: &InvocationOutcome) {
        self.push(ReportEvent::InvocationCompleted {
            plugin: outcome.plugin.clone(),
            description: outcome.description.clone(),
            argument: outcome.argument.clone(),
            result: outcome
                .result
                .as_ref()
                .map(Clone::clone)
                .map_err(ToString::to_string),
        });
    }
}
