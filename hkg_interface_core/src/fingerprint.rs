use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

// Message ids used to infer installed hardware.
pub const MSG_MDPS12: u32 = 593;
pub const MSG_SAS11: u32 = 688;
pub const MSG_SCC11: u32 = 1056;
pub const MSG_SCC13: u32 = 1290;
pub const MSG_SCC14: u32 = 905;
pub const MSG_EMS11: u32 = 608;
pub const MSG_EMS16: u32 = 809;
pub const MSG_LFAHDA_MFC: u32 = 1157;
pub const MSG_LCA11: u32 = 0x58b;
pub const MSG_ESP11: u32 = 1151;
/// Present on bus 1 when the L-CAN shares the bus, which masks harness aliasing.
pub const MSG_LCAN_MARKER: u32 = 1296;

/// Message ids observed per bus during startup discovery.
///
/// Captured once per session and never mutated afterwards; the builder
/// methods consume `self` so a resolved fingerprint is just a value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    buses: BTreeMap<u8, BTreeSet<u32>>,
}

impl Fingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `ids` as observed on `bus`.
    pub fn with_bus<I>(mut self, bus: u8, ids: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        self.buses.entry(bus).or_default().extend(ids);
        self
    }

    #[inline]
    pub fn has(&self, bus: u8, id: u32) -> bool {
        self.buses.get(&bus).map_or(false, |ids| ids.contains(&id))
    }

    pub fn ids(&self, bus: u8) -> impl Iterator<Item = u32> + '_ {
        self.buses.get(&bus).into_iter().flat_map(|ids| ids.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.buses.values().all(|ids| ids.is_empty())
    }
}

impl FromIterator<(u8, u32)> for Fingerprint {
    fn from_iter<T: IntoIterator<Item = (u8, u32)>>(iter: T) -> Self {
        let mut fp = Fingerprint::default();
        for (bus, id) in iter {
            fp.buses.entry(bus).or_default().insert(id);
        }
        fp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bus_reads_empty() {
        let fp = Fingerprint::new().with_bus(0, [MSG_SCC11]);
        assert!(fp.has(0, MSG_SCC11));
        assert!(!fp.has(1, MSG_SCC11));
        assert_eq!(fp.ids(2).count(), 0);
    }

    #[test]
    fn collects_from_pairs() {
        let fp: Fingerprint = [(1, MSG_MDPS12), (1, MSG_MDPS12), (0, MSG_EMS11)].into_iter().collect();
        assert_eq!(fp.ids(1).collect::<Vec<_>>(), vec![MSG_MDPS12]);
        assert!(!fp.is_empty());
        assert!(Fingerprint::new().is_empty());
    }
}
