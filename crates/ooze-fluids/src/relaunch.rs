use crate::params::RelaunchParams;

/// Whether the fluid was in contact with the floor during the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Airborne,
    Grounded,
}

/// Bookkeeping for the relaunch effect.
///
/// Every step the collision pass counts the particles that hit the floor. A step with no
/// floor contact puts the fluid back in the air, re-arms the relaunch, and (once per
/// airborne stretch) increases the energy loss. A grounded step whose floor contact count
/// falls inside the configured band fires the relaunch once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelaunchState {
    floor_contacts: usize,
    phase: Phase,
    fired: bool,
    energy_loss: u32,
    latched: bool,
}

impl RelaunchState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn floor_contacts(&self) -> usize {
        self.floor_contacts
    }

    #[inline(always)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline(always)]
    pub fn fired(&self) -> bool {
        self.fired
    }

    #[inline(always)]
    pub fn energy_loss(&self) -> u32 {
        self.energy_loss
    }

    /// Clears the floor contact count. Called at the start of the collision pass.
    pub fn begin_step(&mut self) {
        self.floor_contacts = 0;
    }

    /// Records a particle resting on the floor.
    pub fn touch_floor(&mut self) {
        self.floor_contacts += 1;
        self.phase = Phase::Grounded;
    }

    /// Updates the state at the end of a step and returns whether the relaunch fires now.
    pub fn advance(&mut self, particle_count: usize, params: &RelaunchParams) -> bool {
        if self.floor_contacts == 0 {
            self.phase = Phase::Airborne;
            self.fired = false;
            if !self.latched {
                self.energy_loss += 1;
            }
            self.latched = true;
        }

        let n = particle_count as f64;
        let contacts = self.floor_contacts as f64;
        let (lo, hi) = params.floor_band;

        if contacts > n * lo && contacts < n * hi && self.phase == Phase::Grounded && !self.fired {
            self.latched = false;
            self.fired = true;
            return true;
        }

        false
    }

    /// Upward speed given to particles resting on the floor when the relaunch fires.
    ///
    /// `fill_height` is the height of the bottom of the initial fill volume above the floor.
    pub fn launch_speed(&self, gravity: f64, fill_height: f64, params: &RelaunchParams) -> f64 {
        let energy = gravity * fill_height * params.height_scale * params.energy_loss_ratio.powi(self.energy_loss as i32);
        energy.max(0.0).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: RelaunchParams = RelaunchParams {
        energy_loss_ratio: 0.9,
        height_scale: 10.0,
        floor_band: (0.1, 0.8),
    };

    fn step(state: &mut RelaunchState, contacts: usize, n: usize) -> bool {
        state.begin_step();
        for _ in 0..contacts {
            state.touch_floor();
        }
        state.advance(n, &PARAMS)
    }

    #[test]
    fn starts_airborne() {
        let state = RelaunchState::new();
        assert_eq!(state.phase(), Phase::Airborne);
        assert_eq!(state.energy_loss(), 0);
        assert!(!state.fired());
    }

    #[test]
    fn energy_loss_counts_airborne_stretches_once() {
        let mut state = RelaunchState::new();

        assert!(!step(&mut state, 0, 100));
        assert!(!step(&mut state, 0, 100));
        assert!(!step(&mut state, 0, 100));
        assert_eq!(state.energy_loss(), 1);

        // Contact below the band neither fires nor releases the latch.
        assert!(!step(&mut state, 5, 100));
        assert!(!step(&mut state, 0, 100));
        assert_eq!(state.energy_loss(), 1);
    }

    #[test]
    fn fires_once_per_bounce() {
        let mut state = RelaunchState::new();

        assert!(!step(&mut state, 0, 100));
        assert!(step(&mut state, 50, 100));
        assert!(state.fired());
        assert_eq!(state.phase(), Phase::Grounded);

        // Still grounded: no second relaunch.
        assert!(!step(&mut state, 50, 100));

        // Back in the air re-arms it and counts another energy loss.
        assert!(!step(&mut state, 0, 100));
        assert!(!state.fired());
        assert_eq!(state.energy_loss(), 2);
        assert!(step(&mut state, 30, 100));
    }

    #[test]
    fn band_is_open() {
        let mut state = RelaunchState::new();
        assert!(!step(&mut state, 10, 100));
        assert!(!step(&mut state, 80, 100));
        assert!(step(&mut state, 11, 100));
    }

    #[test]
    fn launch_speed_decays_with_energy_loss() {
        let mut state = RelaunchState::new();
        let g = 9.80665;

        let fresh = state.launch_speed(g, 5.0, &PARAMS);
        assert!((fresh - (g * 5.0 * 10.0f64).sqrt()).abs() < 1e-12);

        step(&mut state, 0, 100);
        let tired = state.launch_speed(g, 5.0, &PARAMS);
        assert!((tired - (g * 5.0 * 10.0 * 0.9f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn launch_speed_is_never_nan() {
        let state = RelaunchState::new();
        assert_eq!(state.launch_speed(9.8, -1.0, &PARAMS), 0.0);
    }
}
