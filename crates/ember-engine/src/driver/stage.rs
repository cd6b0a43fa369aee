use std::fmt;

/// Driver progress. Transitions are strictly linear.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Stage {
    Uninit,
    InstanceReady,
    AdapterReady,
    DeviceReady,
    QueueReady,
    Encoded,
    Submitted,
    Draining,
    Released,
    Terminal,
}

impl Stage {
    /// The only stage reachable from `self`.
    pub fn next(self) -> Option<Stage> {
        let next = match self {
            Self::Uninit => Self::InstanceReady,
            Self::InstanceReady => Self::AdapterReady,
            Self::AdapterReady => Self::DeviceReady,
            Self::DeviceReady => Self::QueueReady,
            Self::QueueReady => Self::Encoded,
            Self::Encoded => Self::Submitted,
            Self::Submitted => Self::Draining,
            Self::Draining => Self::Released,
            Self::Released => Self::Terminal,
            Self::Terminal => return None,
        };
        Some(next)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
