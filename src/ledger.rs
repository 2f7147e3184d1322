//! Resource ledger.
//!
//! Tracks the node's available capacity. CPU and RAM are fractions of
//! node capacity in `[0, 1]`; storage is in MB; energy is a level in
//! `[0, 1]`. Reservation and release are the only mutations, and they are
//! always paired: one `reserve` per admitted task, one `release` when that
//! task completes.

use crate::types::{ResourceCosts, TaskType};

const INITIAL_STORAGE_MB: f64 = 1000.0;

/// Per-task-type default costs, applied when an inbound task leaves a cost
/// field at its zero default (meaning "unspecified").
pub fn defaults_for(task_type: &TaskType) -> ResourceCosts {
    match task_type {
        TaskType::DataAggregation => ResourceCosts {
            cpu_cost: 0.20,
            ram_cost: 0.15,
            storage_cost: 50.0,
            energy_cost: 0.10,
        },
        TaskType::EdgeAnalytics => ResourceCosts {
            cpu_cost: 0.40,
            ram_cost: 0.30,
            storage_cost: 100.0,
            energy_cost: 0.20,
        },
        TaskType::Preprocessing => ResourceCosts {
            cpu_cost: 0.10,
            ram_cost: 0.10,
            storage_cost: 25.0,
            energy_cost: 0.05,
        },
        TaskType::Caching => ResourceCosts {
            cpu_cost: 0.05,
            ram_cost: 0.05,
            storage_cost: 10.0,
            energy_cost: 0.025,
        },
        TaskType::Other => ResourceCosts {
            cpu_cost: 0.20,
            ram_cost: 0.15,
            storage_cost: 50.0,
            energy_cost: 0.10,
        },
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Ledger {
    pub available_cpu: f64,
    pub available_ram: f64,
    pub available_storage: f64,
    pub energy_level: f64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            available_cpu: 1.0,
            available_ram: 1.0,
            available_storage: INITIAL_STORAGE_MB,
            energy_level: 1.0,
        }
    }
}

impl Ledger {
    /// `None` if the node cannot currently afford the costs, naming why not.
    pub fn can_afford(&self, costs: &ResourceCosts) -> Result<(), String> {
        if costs.cpu_cost > self.available_cpu {
            return Err(format!(
                "cpu: need {:.3}, have {:.3}",
                costs.cpu_cost, self.available_cpu
            ));
        }
        if costs.ram_cost > self.available_ram {
            return Err(format!(
                "ram: need {:.3}, have {:.3}",
                costs.ram_cost, self.available_ram
            ));
        }
        if costs.storage_cost > self.available_storage {
            return Err(format!(
                "storage: need {:.1}MB, have {:.1}MB",
                costs.storage_cost, self.available_storage
            ));
        }
        Ok(())
    }

    pub fn reserve(&mut self, costs: &ResourceCosts) {
        self.available_cpu -= costs.cpu_cost;
        self.available_ram -= costs.ram_cost;
        self.available_storage -= costs.storage_cost;
        self.energy_level = (self.energy_level - costs.energy_cost).max(0.0);
    }

    pub fn release(&mut self, costs: &ResourceCosts) {
        self.available_cpu = (self.available_cpu + costs.cpu_cost).min(1.0);
        self.available_ram = (self.available_ram + costs.ram_cost).min(1.0);
        self.available_storage =
            (self.available_storage + costs.storage_cost).min(INITIAL_STORAGE_MB);
        self.energy_level = (self.energy_level + costs.energy_cost).min(1.0);
    }
}
