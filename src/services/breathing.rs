use std::time::Duration;

use serde::Serialize;
use tokio::{sync::watch, task::JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Technique {
    pub name: &'static str,
    pub inhale_secs: u64,
    pub hold_secs: u64,
    pub exhale_secs: u64,
}

pub const TECHNIQUES: [Technique; 3] = [
    Technique {
        name: "Box Breathing",
        inhale_secs: 4,
        hold_secs: 4,
        exhale_secs: 4,
    },
    Technique {
        name: "4-7-8 Breathing",
        inhale_secs: 4,
        hold_secs: 7,
        exhale_secs: 8,
    },
    Technique {
        name: "Resonant Breathing",
        inhale_secs: 5,
        hold_secs: 0,
        exhale_secs: 5,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Inhale => "Inhale",
            Self::Hold => "Hold",
            Self::Exhale => "Exhale",
        }
    }

    pub fn duration(self, technique: &Technique) -> Duration {
        Duration::from_secs(match self {
            Self::Inhale => technique.inhale_secs,
            Self::Hold => technique.hold_secs,
            Self::Exhale => technique.exhale_secs,
        })
    }

    /// Inhale -> Hold -> Exhale -> Inhale. Hold is skipped when it lasts 0s.
    pub fn next(self, technique: &Technique) -> Self {
        match self {
            Self::Inhale if technique.hold_secs > 0 => Self::Hold,
            Self::Inhale | Self::Hold => Self::Exhale,
            Self::Exhale => Self::Inhale,
        }
    }
}

impl Technique {
    pub fn by_name(name: &str) -> Option<Self> {
        TECHNIQUES
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
    }

    /// One full cycle as (phase, seconds), zero-length phases omitted.
    pub fn schedule(&self) -> Vec<(Phase, u64)> {
        let mut phase = Phase::Inhale;
        let mut steps = Vec::with_capacity(3);
        loop {
            steps.push((phase, phase.duration(self).as_secs()));
            phase = phase.next(self);
            if phase == Phase::Inhale {
                break;
            }
        }
        steps
    }

    pub fn cycle_secs(&self) -> u64 {
        self.inhale_secs + self.hold_secs + self.exhale_secs
    }
}

/// Runs a technique on a background task, publishing each phase change.
/// Stopped explicitly or when dropped.
pub struct Pacer {
    phase_rx: watch::Receiver<Phase>,
    task: JoinHandle<()>,
}

impl Pacer {
    pub fn start(technique: Technique) -> Self {
        let (phase_tx, phase_rx) = watch::channel(Phase::Inhale);

        let task = tokio::spawn(async move {
            let mut phase = Phase::Inhale;
            loop {
                tokio::time::sleep(phase.duration(&technique)).await;
                phase = phase.next(&technique);
                if phase_tx.send(phase).is_err() {
                    break;
                }
                tracing::trace!(
                    technique = technique.name,
                    phase = phase.label(),
                    "Breathing phase"
                );
            }
        });

        Self { phase_rx, task }
    }

    pub fn phase(&self) -> Phase {
        *self.phase_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase_rx.clone()
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for Pacer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
