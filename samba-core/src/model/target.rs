#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    #[default]
    Pending,
    Running,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub name: String,
    pub dependencies: Vec<String>,
    /// Raw action lines, split into calls only when the target runs.
    pub actions: Vec<String>,
    pub state: TargetState,
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
            actions: Vec::new(),
            state: TargetState::Pending,
        }
    }

    /// Whether every action of the target has been dispatched.
    #[must_use]
    pub fn is_executed(&self) -> bool {
        self.state == TargetState::Done
    }
}
