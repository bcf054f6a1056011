use serde::Deserialize;
use std::path::Path;

/// Engine configuration loaded from inkdrift.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EngineConfig {
    /// Bounded simulation region and clock
    #[serde(default)]
    pub world: WorldConfig,

    /// Material constants applied to every spawned body
    #[serde(default)]
    pub material: MaterialConfig,

    /// Pointer interaction tuning
    #[serde(default)]
    pub interaction: InteractionConfig,

    /// Camera zoom limits and step
    #[serde(default)]
    pub camera: CameraConfig,
}

/// Size of the simulated region and the fixed tick rate.
#[derive(Debug, Deserialize, Clone)]
pub struct WorldConfig {
    /// Side length of the square world in world units
    #[serde(default = "default_world_size")]
    pub size: f32,

    /// Thickness of the four boundary walls in world units.
    /// Thick relative to the world so fast bodies cannot tunnel
    /// through in a single step.
    #[serde(default = "default_wall_thickness")]
    pub wall_thickness: f32,

    /// Simulation ticks per second
    #[serde(default = "default_tick_hz")]
    pub tick_hz: u32,
}

fn default_world_size() -> f32 {
    10_000.0
}

fn default_wall_thickness() -> f32 {
    500.0
}

fn default_tick_hz() -> u32 {
    60
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: default_world_size(),
            wall_thickness: default_wall_thickness(),
            tick_hz: default_tick_hz(),
        }
    }
}

/// Material constants for dynamic bodies.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct MaterialConfig {
    /// Bounciness of collisions (0 = inelastic, 1 = perfectly elastic)
    #[serde(default = "default_restitution")]
    pub restitution: f32,

    /// Contact friction applied to tangential velocity during collisions
    #[serde(default = "default_friction")]
    pub friction: f32,

    /// Per-tick velocity decay so unforced motion dies out
    #[serde(default = "default_air_friction")]
    pub air_friction: f32,
}

fn default_restitution() -> f32 {
    0.9
}

fn default_friction() -> f32 {
    0.1
}

fn default_air_friction() -> f32 {
    0.05
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            restitution: default_restitution(),
            friction: default_friction(),
            air_friction: default_air_friction(),
        }
    }
}

/// Pointer interaction tuning.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct InteractionConfig {
    /// Magnitude of the zero-mean random impulse applied on spawn
    #[serde(default = "default_spawn_impulse")]
    pub spawn_impulse: f32,

    /// Downward impulse applied when a drag is released
    #[serde(default = "default_drop_impulse")]
    pub drop_impulse: f32,

    /// Fallback delay before attaching a body when the host cannot
    /// report a measurement event, in milliseconds
    #[serde(default = "default_attach_delay_ms")]
    pub attach_delay_ms: u64,
}

fn default_spawn_impulse() -> f32 {
    0.05
}

fn default_drop_impulse() -> f32 {
    0.02
}

fn default_attach_delay_ms() -> u64 {
    50
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            spawn_impulse: default_spawn_impulse(),
            drop_impulse: default_drop_impulse(),
            attach_delay_ms: default_attach_delay_ms(),
        }
    }
}

/// Camera zoom limits and the per-gesture zoom step.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct CameraConfig {
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f32,

    #[serde(default = "default_max_zoom")]
    pub max_zoom: f32,

    /// Multiplicative step per zoom gesture
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,
}

fn default_min_zoom() -> f32 {
    0.1
}

fn default_max_zoom() -> f32 {
    8.0
}

fn default_zoom_step() -> f32 {
    1.08
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            zoom_step: default_zoom_step(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file, falling back to defaults.
    ///
    /// A missing or malformed file is not fatal; the engine runs with
    /// built-in defaults and logs what happened.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file specified, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        world_size = config.world.size,
                        tick_hz = config.world.tick_hz,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Commented default configuration written by `inkdrift init`.
    pub const TEMPLATE: &'static str = "\
# Inkdrift engine configuration. Every key is optional; omitted keys
# use the built-in defaults shown here.

world:
  size: 10000.0           # side length of the square simulation region
  wall_thickness: 500.0   # boundary wall thickness
  tick_hz: 60             # simulation ticks per second

material:
  restitution: 0.9        # collision bounciness
  friction: 0.1           # contact friction
  air_friction: 0.05      # per-tick drift decay

interaction:
  spawn_impulse: 0.05     # random drift applied to new bodies
  drop_impulse: 0.02      # downward kick when a drag releases
  attach_delay_ms: 50     # fallback delay before body creation

camera:
  min_zoom: 0.1
  max_zoom: 8.0
  zoom_step: 1.08         # multiplicative step per zoom gesture
";
}
