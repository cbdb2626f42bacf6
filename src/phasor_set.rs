//! The host's list of phasor records.
//!
//! Edits are whole-record replacements; adding and removing keep the set
//! between [`MIN_PHASORS`] and [`MAX_PHASORS`] records.

use crate::color::Color;
use crate::error::PhasorError;
use crate::phasor::{PhasorConfig, DEFAULT_AMPLITUDE};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use tracing::{debug, info};

pub const MAX_PHASORS: usize = 6;
pub const MIN_PHASORS: usize = 1;
/// Frequency given to the default and newly added phasors
pub const STARTING_FREQUENCY: f64 = 3.14 / 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PhasorSet {
    phasors: Vec<PhasorConfig>,
}

impl Default for PhasorSet {
    /// Voltage with the inductor and capacitor currents a quarter turn either side
    fn default() -> Self {
        PhasorSet {
            phasors: vec![
                PhasorConfig::new(
                    "Voltage",
                    DEFAULT_AMPLITUDE,
                    STARTING_FREQUENCY,
                    0.0,
                    Color::WHITE,
                ),
                PhasorConfig::new(
                    "Inductor Current",
                    DEFAULT_AMPLITUDE,
                    STARTING_FREQUENCY,
                    -FRAC_PI_2,
                    Color::rgb8(255, 0, 255),
                ),
                PhasorConfig::new(
                    "Capacitor Current",
                    DEFAULT_AMPLITUDE,
                    STARTING_FREQUENCY,
                    FRAC_PI_2,
                    Color::rgb8(0, 255, 255),
                ),
            ],
        }
    }
}

impl PhasorSet {
    /// Builds a set from explicit records, checking size and name uniqueness
    pub fn from_configs(phasors: Vec<PhasorConfig>) -> Result<Self, PhasorError> {
        if !(MIN_PHASORS..=MAX_PHASORS).contains(&phasors.len()) {
            return Err(PhasorError::InvalidCount {
                count: phasors.len(),
                min: MIN_PHASORS,
                max: MAX_PHASORS,
            });
        }
        for (i, phasor) in phasors.iter().enumerate() {
            if phasors[..i].iter().any(|p| p.name == phasor.name) {
                return Err(PhasorError::DuplicateName(phasor.name.clone()));
            }
        }
        Ok(PhasorSet { phasors })
    }

    pub fn len(&self) -> usize {
        self.phasors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phasors.is_empty()
    }

    pub fn as_slice(&self) -> &[PhasorConfig] {
        &self.phasors
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhasorConfig> {
        self.phasors.iter()
    }

    pub fn get(&self, name: &str) -> Option<&PhasorConfig> {
        self.phasors.iter().find(|p| p.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.phasors.iter().position(|p| p.name == name)
    }

    /// Appends a phasor a quarter turn ahead of the last one
    pub fn add(&mut self) -> Result<&PhasorConfig, PhasorError> {
        if self.phasors.len() >= MAX_PHASORS {
            return Err(PhasorError::SetFull { max: MAX_PHASORS });
        }

        let mut n = self.phasors.len() + 1;
        while self.get(&format!("phasor {n}")).is_some() {
            n += 1;
        }
        let last_phase = self.phasors.last().map_or(0.0, |p| p.phase);
        let config = PhasorConfig::new(
            format!("phasor {n}"),
            DEFAULT_AMPLITUDE,
            STARTING_FREQUENCY,
            last_phase + FRAC_PI_4,
            Color::WHITE,
        );
        info!(name = %config.name, phase = config.phase, "Added phasor");
        self.phasors.push(config);
        Ok(&self.phasors[self.phasors.len() - 1])
    }

    /// Deletes the named phasor, refusing to empty the set
    pub fn remove(&mut self, name: &str) -> Result<PhasorConfig, PhasorError> {
        let index = self
            .position(name)
            .ok_or_else(|| PhasorError::NotFound(name.to_string()))?;
        if self.phasors.len() <= MIN_PHASORS {
            return Err(PhasorError::LastPhasor);
        }
        let removed = self.phasors.remove(index);
        info!(name = %removed.name, "Removed phasor");
        Ok(removed)
    }

    /// Replaces the whole record stored under `name`
    pub fn replace(&mut self, name: &str, config: PhasorConfig) -> Result<(), PhasorError> {
        let index = self
            .position(name)
            .ok_or_else(|| PhasorError::NotFound(name.to_string()))?;
        if config.name != name && self.get(&config.name).is_some() {
            return Err(PhasorError::DuplicateName(config.name));
        }
        debug!(name, ?config, "Replaced phasor");
        self.phasors[index] = config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set() {
        let set = PhasorSet::default();
        let names: Vec<&str> = set.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Voltage", "Inductor Current", "Capacitor Current"]);
        assert_eq!(set.get("Inductor Current").unwrap().phase, -FRAC_PI_2);
        assert_eq!(set.get("Capacitor Current").unwrap().phase, FRAC_PI_2);
    }

    #[test]
    fn test_add_offsets_phase_and_caps_at_six() {
        let mut set = PhasorSet::default();
        let added = set.add().unwrap();
        assert_eq!(added.name, "phasor 4");
        assert!((added.phase - (FRAC_PI_2 + FRAC_PI_4)).abs() < 1e-12);

        set.add().unwrap();
        set.add().unwrap();
        assert_eq!(set.len(), MAX_PHASORS);
        assert_eq!(set.add().unwrap_err(), PhasorError::SetFull { max: MAX_PHASORS });
        assert_eq!(set.len(), MAX_PHASORS);
    }

    #[test]
    fn test_added_names_stay_unique() {
        let mut set = PhasorSet::default();
        set.add().unwrap();
        set.remove("Voltage").unwrap();
        let added = set.add().unwrap().name.clone();
        assert_eq!(added, "phasor 5");
    }

    #[test]
    fn test_remove_keeps_last_phasor() {
        let mut set = PhasorSet::default();
        set.remove("Voltage").unwrap();
        set.remove("Inductor Current").unwrap();
        assert_eq!(set.remove("Capacitor Current"), Err(PhasorError::LastPhasor));
        assert_eq!(set.len(), 1);
        assert!(matches!(set.remove("Voltage"), Err(PhasorError::NotFound(_))));
    }

    #[test]
    fn test_replace_is_whole_record() {
        let mut set = PhasorSet::default();
        let mut edited = set.get("Voltage").unwrap().clone();
        edited.amplitude = 30.0;
        edited.name = "V".into();
        set.replace("Voltage", edited.clone()).unwrap();
        assert_eq!(set.as_slice()[0], edited);
        assert!(set.get("Voltage").is_none());

        let clash = PhasorConfig::new("Capacitor Current", 1.0, 0.0, 0.0, Color::WHITE);
        assert_eq!(
            set.replace("V", clash),
            Err(PhasorError::DuplicateName("Capacitor Current".into()))
        );
    }

    #[test]
    fn test_from_configs_validates() {
        assert!(matches!(
            PhasorSet::from_configs(vec![]),
            Err(PhasorError::InvalidCount { count: 0, .. })
        ));
        let twin = PhasorConfig::new("A", 1.0, 0.0, 0.0, Color::WHITE);
        assert_eq!(
            PhasorSet::from_configs(vec![twin.clone(), twin.clone()]),
            Err(PhasorError::DuplicateName("A".into()))
        );
        assert_eq!(PhasorSet::from_configs(vec![twin]).unwrap().len(), 1);
    }
}
