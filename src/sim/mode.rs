//! Force model / integrator selection
//!
//! The active `Mode` is the (model, integrator, timestep, max TTL) tuple. It only
//! changes through `ModeController::apply`, between ticks.

use serde::{Deserialize, Serialize};

use super::integrate::Scheme;
use super::pool::ParticlePool;
use crate::consts::{DEFAULT_MAX_TTL, DEFAULT_TIME_STEP};
use crate::settings::PointSizeStep;

/// Force model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Model {
    /// Nothing moves or ages
    #[default]
    Frozen,
    /// Uniform downward pull
    Gravity,
    /// Inverse-square pull toward the origin
    Attractor,
}

/// Numerical scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Integrator {
    #[default]
    Euler,
    Rk4,
}

impl Integrator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Integrator::Euler => "Euler",
            Integrator::Rk4 => "RK4",
        }
    }
}

/// Named mode presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    SmallGravityEuler,
    LargeGravityEuler,
    SmallAttractorEuler,
    LargeAttractorEuler,
    SmallGravityRk4,
    LargeGravityRk4,
    SmallAttractorRk4,
    LargeAttractorRk4,
}

impl Preset {
    pub const ALL: [Preset; 8] = [
        Preset::SmallGravityEuler,
        Preset::LargeGravityEuler,
        Preset::SmallAttractorEuler,
        Preset::LargeAttractorEuler,
        Preset::SmallGravityRk4,
        Preset::LargeGravityRk4,
        Preset::SmallAttractorRk4,
        Preset::LargeAttractorRk4,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Preset::SmallGravityEuler => "small-gravity-euler",
            Preset::LargeGravityEuler => "large-gravity-euler",
            Preset::SmallAttractorEuler => "small-attractor-euler",
            Preset::LargeAttractorEuler => "large-attractor-euler",
            Preset::SmallGravityRk4 => "small-gravity-rk4",
            Preset::LargeGravityRk4 => "large-gravity-rk4",
            Preset::SmallAttractorRk4 => "small-attractor-rk4",
            Preset::LargeAttractorRk4 => "large-attractor-rk4",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == s)
    }

    pub fn model(&self) -> Model {
        match self {
            Preset::SmallGravityEuler
            | Preset::LargeGravityEuler
            | Preset::SmallGravityRk4
            | Preset::LargeGravityRk4 => Model::Gravity,
            Preset::SmallAttractorEuler
            | Preset::LargeAttractorEuler
            | Preset::SmallAttractorRk4
            | Preset::LargeAttractorRk4 => Model::Attractor,
        }
    }

    pub fn integrator(&self) -> Integrator {
        match self {
            Preset::SmallGravityEuler
            | Preset::LargeGravityEuler
            | Preset::SmallAttractorEuler
            | Preset::LargeAttractorEuler => Integrator::Euler,
            Preset::SmallGravityRk4
            | Preset::LargeGravityRk4
            | Preset::SmallAttractorRk4
            | Preset::LargeAttractorRk4 => Integrator::Rk4,
        }
    }

    /// Large presets trade accuracy for speed with a bigger step
    pub fn is_large(&self) -> bool {
        matches!(
            self,
            Preset::LargeGravityEuler
                | Preset::LargeAttractorEuler
                | Preset::LargeGravityRk4
                | Preset::LargeAttractorRk4
        )
    }

    pub fn time_step(&self) -> f32 {
        match (self.model(), self.is_large()) {
            (Model::Attractor, false) => 0.0018,
            (Model::Attractor, true) => 0.01,
            (_, false) => 0.005,
            (_, true) => 0.02,
        }
    }

    /// Max TTL, tuned so particles cover a similar distance at either step size
    pub fn max_ttl(&self) -> f64 {
        match (self.model(), self.is_large()) {
            (Model::Attractor, false) => 70.0,
            (Model::Attractor, true) => 50.0,
            (_, false) => 15.0,
            (_, true) => 5.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Preset::SmallGravityEuler => "Gravity - Small Time Step - Euler Integration",
            Preset::LargeGravityEuler => "Gravity - Big Time Step - Euler Integration",
            Preset::SmallAttractorEuler => "Black Hole - Small Time Step - Euler Integration",
            Preset::LargeAttractorEuler => "Black Hole - Big Time Step - Euler Integration",
            Preset::SmallGravityRk4 => "Gravity - Small Time Step - Runge-Kutta Integration",
            Preset::LargeGravityRk4 => "Gravity - Big Time Step - Runge-Kutta Integration",
            Preset::SmallAttractorRk4 => "Black Hole - Small Time Step - Runge-Kutta Integration",
            Preset::LargeAttractorRk4 => "Black Hole - Big Time Step - Runge-Kutta Integration",
        }
    }

    pub fn mode(&self) -> Mode {
        Mode {
            model: self.model(),
            integrator: self.integrator(),
            time_step: self.time_step(),
            max_ttl: self.max_ttl(),
        }
    }
}

/// Active simulation mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    pub model: Model,
    pub integrator: Integrator,
    pub time_step: f32,
    pub max_ttl: f64,
}

impl Default for Mode {
    fn default() -> Self {
        Self {
            model: Model::Frozen,
            integrator: Integrator::Euler,
            time_step: DEFAULT_TIME_STEP,
            max_ttl: DEFAULT_MAX_TTL,
        }
    }
}

impl Mode {
    pub fn is_frozen(&self) -> bool {
        self.model == Model::Frozen
    }

    /// Step scheme for this mode (None while frozen)
    pub fn scheme(&self) -> Option<Scheme> {
        Scheme::new(self.model, self.integrator)
    }

    /// Same tuple with motion stopped
    pub fn frozen(self) -> Self {
        Self {
            model: Model::Frozen,
            ..self
        }
    }
}

/// Discrete commands from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeCommand {
    Freeze,
    Preset(Preset),
    Clear,
    /// Rendering-only; the controller ignores it
    PointSize(PointSizeStep),
}

impl ModeCommand {
    /// Keyboard mapping: lowercase = small step, uppercase = large step
    pub fn from_key(key: char) -> Option<Self> {
        let command = match key {
            's' | 'S' => ModeCommand::Freeze,
            'g' => ModeCommand::Preset(Preset::SmallGravityEuler),
            'G' => ModeCommand::Preset(Preset::LargeGravityEuler),
            'b' => ModeCommand::Preset(Preset::SmallAttractorEuler),
            'B' => ModeCommand::Preset(Preset::LargeAttractorEuler),
            'r' => ModeCommand::Preset(Preset::SmallGravityRk4),
            'R' => ModeCommand::Preset(Preset::LargeGravityRk4),
            'k' => ModeCommand::Preset(Preset::SmallAttractorRk4),
            'K' => ModeCommand::Preset(Preset::LargeAttractorRk4),
            'o' | 'O' => ModeCommand::Clear,
            '+' => ModeCommand::PointSize(PointSizeStep::Grow),
            '-' => ModeCommand::PointSize(PointSizeStep::Shrink),
            _ => return None,
        };
        Some(command)
    }

    /// Parse a textual command: a preset id, "frozen", "clear", "grow" or "shrink"
    pub fn from_id(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "frozen" | "freeze" | "stop" => Some(ModeCommand::Freeze),
            "clear" => Some(ModeCommand::Clear),
            "grow" => Some(ModeCommand::PointSize(PointSizeStep::Grow)),
            "shrink" => Some(ModeCommand::PointSize(PointSizeStep::Shrink)),
            other => Preset::from_id(other).map(ModeCommand::Preset),
        }
    }

    /// Description emitted when the core accepts the command
    pub fn label(&self) -> Option<&'static str> {
        match self {
            ModeCommand::Freeze => Some("Simulation Stopped"),
            ModeCommand::Preset(preset) => Some(preset.label()),
            ModeCommand::Clear => Some("Particles Cleared"),
            ModeCommand::PointSize(_) => None,
        }
    }
}

/// Owns the active mode and applies commands to it
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Apply a command. Returns the logged label, or None if it was ignored.
    pub fn apply(&mut self, command: ModeCommand, pool: &mut ParticlePool) -> Option<&'static str> {
        match command {
            ModeCommand::Freeze => self.transition(self.mode.frozen(), pool),
            ModeCommand::Preset(preset) => self.transition(preset.mode(), pool),
            ModeCommand::Clear => pool.clear(),
            ModeCommand::PointSize(_) => return None,
        }

        let label = command.label()?;
        log::info!("{}", label);
        Some(label)
    }

    fn transition(&mut self, target: Mode, pool: &mut ParticlePool) {
        // Frozen -> Frozen keeps everything as is
        if target.is_frozen() && self.mode.is_frozen() {
            return;
        }
        pool.rescale_ttl(self.mode.max_ttl, target.max_ttl);
        log::debug!(
            "Mode {:?}/{} dt={} max_ttl={} -> {:?}/{} dt={} max_ttl={}",
            self.mode.model,
            self.mode.integrator.as_str(),
            self.mode.time_step,
            self.mode.max_ttl,
            target.model,
            target.integrator.as_str(),
            target.time_step,
            target.max_ttl
        );
        self.mode = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_preset_table() {
        let expected = [
            ("small-gravity-euler", Model::Gravity, Integrator::Euler, 0.005, 15.0),
            ("large-gravity-euler", Model::Gravity, Integrator::Euler, 0.02, 5.0),
            ("small-attractor-euler", Model::Attractor, Integrator::Euler, 0.0018, 70.0),
            ("large-attractor-euler", Model::Attractor, Integrator::Euler, 0.01, 50.0),
            ("small-gravity-rk4", Model::Gravity, Integrator::Rk4, 0.005, 15.0),
            ("large-gravity-rk4", Model::Gravity, Integrator::Rk4, 0.02, 5.0),
            ("small-attractor-rk4", Model::Attractor, Integrator::Rk4, 0.0018, 70.0),
            ("large-attractor-rk4", Model::Attractor, Integrator::Rk4, 0.01, 50.0),
        ];

        for (preset, (id, model, integrator, dt, max_ttl)) in Preset::ALL.iter().zip(expected) {
            assert_eq!(preset.id(), id);
            assert_eq!(Preset::from_id(id), Some(*preset));
            let mode = preset.mode();
            assert_eq!(mode.model, model);
            assert_eq!(mode.integrator, integrator);
            assert_eq!(mode.time_step, dt);
            assert_eq!(mode.max_ttl, max_ttl);
        }
    }

    #[test]
    fn test_preset_serde_uses_ids() {
        let json = serde_json::to_string(&Preset::LargeAttractorRk4).unwrap();
        assert_eq!(json, "\"large-attractor-rk4\"");
        let back: Preset = serde_json::from_str("\"small-gravity-euler\"").unwrap();
        assert_eq!(back, Preset::SmallGravityEuler);
    }

    #[test]
    fn test_from_key() {
        assert_eq!(ModeCommand::from_key('s'), Some(ModeCommand::Freeze));
        assert_eq!(ModeCommand::from_key('S'), Some(ModeCommand::Freeze));
        assert_eq!(
            ModeCommand::from_key('k'),
            Some(ModeCommand::Preset(Preset::SmallAttractorRk4))
        );
        assert_eq!(
            ModeCommand::from_key('G'),
            Some(ModeCommand::Preset(Preset::LargeGravityEuler))
        );
        assert_eq!(ModeCommand::from_key('O'), Some(ModeCommand::Clear));
        assert_eq!(ModeCommand::from_key('x'), None);
        assert_eq!(ModeCommand::from_key(' '), None);
    }

    #[test]
    fn test_from_id() {
        assert_eq!(ModeCommand::from_id("Frozen"), Some(ModeCommand::Freeze));
        assert_eq!(ModeCommand::from_id("clear"), Some(ModeCommand::Clear));
        assert_eq!(
            ModeCommand::from_id("large-gravity-rk4"),
            Some(ModeCommand::Preset(Preset::LargeGravityRk4))
        );
        assert_eq!(ModeCommand::from_id("warp"), None);
    }

    #[test]
    fn test_apply_preset_rescales_live_ttl() {
        let mut pool = ParticlePool::default();
        let mut controller = ModeController::default();
        pool.spawn(Vec2::ZERO, Vec2::ZERO);
        pool.age(0.1);

        let label = controller.apply(ModeCommand::Preset(Preset::SmallAttractorEuler), &mut pool);
        assert_eq!(label, Some("Black Hole - Small Time Step - Euler Integration"));
        assert_eq!(controller.mode().max_ttl, 70.0);
        assert_eq!(pool.max_ttl(), 70.0);
        assert!((pool.get(0).unwrap().ttl - 14.9 * 70.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_freeze_keeps_tuple() {
        let mut pool = ParticlePool::default();
        let mut controller = ModeController::default();
        controller.apply(ModeCommand::Preset(Preset::LargeGravityRk4), &mut pool);
        pool.spawn(Vec2::ZERO, Vec2::ZERO);

        let label = controller.apply(ModeCommand::Freeze, &mut pool);
        assert_eq!(label, Some("Simulation Stopped"));
        let mode = controller.mode();
        assert!(mode.is_frozen());
        assert_eq!(mode.integrator, Integrator::Rk4);
        assert_eq!(mode.time_step, 0.02);
        assert_eq!(mode.max_ttl, 5.0);
        assert_eq!(pool.get(0).unwrap().ttl, 5.0);
        assert_eq!(mode.scheme(), None);

        // Freezing again is accepted and changes nothing
        assert_eq!(controller.apply(ModeCommand::Freeze, &mut pool), Some("Simulation Stopped"));
        assert_eq!(controller.mode(), &Preset::LargeGravityRk4.mode().frozen());
    }

    #[test]
    fn test_clear_leaves_mode() {
        let mut pool = ParticlePool::default();
        let mut controller = ModeController::default();
        controller.apply(ModeCommand::Preset(Preset::SmallGravityEuler), &mut pool);
        pool.spawn(Vec2::ZERO, Vec2::ZERO);

        let before = *controller.mode();
        let label = controller.apply(ModeCommand::Clear, &mut pool);
        assert_eq!(label, Some("Particles Cleared"));
        assert_eq!(controller.mode(), &before);
        assert!(pool.snapshot(before.integrator).is_empty());
    }

    #[test]
    fn test_point_size_is_ignored() {
        let mut pool = ParticlePool::default();
        let mut controller = ModeController::default();
        pool.spawn(Vec2::ZERO, Vec2::ZERO);

        let label = controller.apply(ModeCommand::PointSize(PointSizeStep::Grow), &mut pool);
        assert_eq!(label, None);
        assert_eq!(controller.mode(), &Mode::default());
        assert_eq!(pool.live_count(), 1);
    }

    #[test]
    fn test_every_running_mode_has_a_scheme() {
        for preset in Preset::ALL {
            let scheme = preset.mode().scheme().unwrap();
            assert_eq!(scheme.model(), preset.model());
            assert_eq!(scheme.integrator(), preset.integrator());
        }
        assert_eq!(Mode::default().scheme(), None);
    }
}
