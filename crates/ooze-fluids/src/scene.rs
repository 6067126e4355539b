use super::Fluid;

/// Whether a scene advances when ticked.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum RunState {
    Running,
    #[default]
    Stopped,
    /// Final; no further steps are taken.
    Terminated,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Command {
    /// Start stepping on every tick.
    Start,
    /// Stop stepping until started again.
    Stop,
    Terminate,
}

pub struct Scene<F: Fluid> {
    /// The fluid for this scene.
    pub fluid: F,
    /// The parameters for this scene's fluid.
    params: F::Params,
    state: RunState,
    /// The number of completed steps.
    steps: u64,
}

impl<F: Fluid> Scene<F> {
    #[inline(always)]
    pub fn new(fluid: F, params: F::Params) -> Self {
        Self {
            fluid,
            params,
            state: RunState::default(),
            steps: 0,
        }
    }

    #[inline(always)]
    pub fn params(&self) -> &F::Params {
        &self.params
    }

    #[inline(always)]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline(always)]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Applies a control command. A terminated scene ignores every later command.
    pub fn command(&mut self, command: Command) {
        self.state = match (self.state, command) {
            (RunState::Terminated, _) => RunState::Terminated,
            (_, Command::Start) => RunState::Running,
            (_, Command::Stop) => RunState::Stopped,
            (_, Command::Terminate) => RunState::Terminated,
        };
    }

    /// Runs exactly one full step if the scene is running. Returns whether a step was taken.
    pub fn tick(&mut self) -> bool {
        if self.state != RunState::Running {
            return false;
        }

        self.step();
        true
    }

    /// Runs one full step regardless of the run state.
    pub fn step(&mut self) {
        self.fluid.step(&self.params);
        self.steps += 1;
    }
}
