//! Widget registry
//!
//! Built once from a compiled [`DashboardModel`]; afterwards only widget
//! values change. Lookups are linear scans over at most a couple of dozen
//! entries.

use heapless::Vec;

use crate::config::{DashboardModel, MAX_GAUGES, MAX_RATE_ROWS};
use crate::traits::WidgetChange;
use crate::widget::{Gauge, RateRow};

/// Which widget an identifier resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WidgetRef {
    Gauge(usize),
    RateRow(usize),
}

/// Owns every live gauge and rate row
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    gauges: Vec<Gauge, MAX_GAUGES>,
    rows: Vec<RateRow, MAX_RATE_ROWS>,
}

impl WidgetRegistry {
    /// Instantiate widgets from a compiled model
    pub fn build(model: &DashboardModel) -> Self {
        let config = &model.config;
        let mut registry = Self::default();

        // Capacities match the validator's limits
        for gauge in &config.gauges {
            let _ = registry.gauges.push(Gauge::new(gauge.clone()));
        }
        for row in config.rate_lists.iter().flat_map(|l| l.rows.iter()) {
            let _ = registry
                .rows
                .push(RateRow::new(row.clone(), config.ui.stale_timeout_ms));
        }

        registry
    }

    pub fn gauges(&self) -> &[Gauge] {
        &self.gauges
    }

    pub fn rate_rows(&self) -> &[RateRow] {
        &self.rows
    }

    pub fn gauge(&self, id: &str) -> Option<&Gauge> {
        self.gauges.iter().find(|g| g.id() == id)
    }

    pub fn rate_row(&self, id: &str) -> Option<&RateRow> {
        self.rows.iter().find(|r| r.id() == id)
    }

    /// Resolve an identifier, gauges first
    pub fn lookup(&self, id: &str) -> Option<WidgetRef> {
        if let Some(index) = self.gauges.iter().position(|g| g.id() == id) {
            return Some(WidgetRef::Gauge(index));
        }
        self.rows
            .iter()
            .position(|r| r.id() == id)
            .map(WidgetRef::RateRow)
    }

    /// Apply a value; returns the resulting change, or `None` if unknown
    pub fn publish(&mut self, id: &str, value: i32, text: &str, now_ms: u32) -> Option<WidgetChange> {
        match self.lookup(id)? {
            WidgetRef::Gauge(index) => {
                let gauge = &mut self.gauges[index];
                gauge.publish(value, text, now_ms);
                Some(WidgetChange::Gauge(gauge.view(index)))
            }
            WidgetRef::RateRow(index) => {
                let row = &mut self.rows[index];
                row.publish(value, text, now_ms);
                Some(WidgetChange::RateRow(row.view(index)))
            }
        }
    }

    /// Publish configured initial gauge values
    pub fn publish_initial(&mut self, now_ms: u32, mut notify: impl FnMut(WidgetChange)) {
        for (index, gauge) in self.gauges.iter_mut().enumerate() {
            if gauge.publish_initial(now_ms) {
                notify(WidgetChange::Gauge(gauge.view(index)));
            }
        }
    }

    /// Evaluate staleness of every widget
    ///
    /// `notify` is called once for each widget that just went stale.
    /// Returns the number of such widgets.
    pub fn tick(&mut self, now_ms: u32, mut notify: impl FnMut(WidgetChange)) -> usize {
        let mut changed = 0;
        for (index, gauge) in self.gauges.iter_mut().enumerate() {
            if gauge.tick(now_ms) {
                changed += 1;
                notify(WidgetChange::Gauge(gauge.view(index)));
            }
        }
        for (index, row) in self.rows.iter_mut().enumerate() {
            if row.tick(now_ms) {
                changed += 1;
                notify(WidgetChange::RateRow(row.view(index)));
            }
        }
        changed
    }
}
