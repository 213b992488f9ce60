//! Single-pole balancing evaluator — spec.md section 4.7.
//!
//! The classic NEAT benchmark task: a cart on a bounded track carries an
//! unstable pole, and a controller must keep both the cart's position and
//! the pole's angle within bounds for as long as possible by pushing the
//! cart with a continuous force at each timestep. Fitness rewards both
//! survival time and, on failure, how centered the cart stayed.

use crate::activation::blackbox::BlackBox;

/// Physical constants and trial limits for the simulation. Defaults match
/// the standard single-pole-balancing parameterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleBalanceConfig {
    pub gravity: f32,
    pub cart_mass: f32,
    pub pole_mass: f32,
    pub half_pole_length: f32,
    pub force_magnitude: f32,
    pub time_step: f32,
    pub track_limit: f32,
    pub angle_limit_radians: f32,
    pub max_steps: u32,
}

impl Default for PoleBalanceConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            cart_mass: 1.0,
            pole_mass: 0.1,
            half_pole_length: 0.5,
            force_magnitude: 10.0,
            time_step: 0.02,
            track_limit: 2.4,
            angle_limit_radians: std::f32::consts::PI / 15.0,
            max_steps: 200_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CartPoleState {
    cart_position: f32,
    cart_velocity: f32,
    pole_angle: f32,
    pole_angular_velocity: f32,
}

impl CartPoleState {
    fn is_within_bounds(&self, cfg: &PoleBalanceConfig) -> bool {
        self.cart_position.abs() <= cfg.track_limit && self.pole_angle.abs() <= cfg.angle_limit_radians
    }

    /// `[bias, cartPos/trackLen, cartVel, poleAngle/angleLimit, poleAngVel]`.
    /// Only position and angle are scaled against their failure threshold;
    /// the velocities are passed through unscaled.
    fn to_inputs(self, cfg: &PoleBalanceConfig) -> [f32; 5] {
        [
            1.0,
            self.cart_position / cfg.track_limit,
            self.cart_velocity,
            self.pole_angle / cfg.angle_limit_radians,
            self.pole_angular_velocity,
        ]
    }
}

pub struct PoleBalanceEvaluator {
    config: PoleBalanceConfig,
}

impl PoleBalanceEvaluator {
    pub fn new(config: PoleBalanceConfig) -> Self {
        Self { config }
    }

    /// Runs one trial starting from the cart centered, the pole upright,
    /// and zero velocities. Fitness is `timestepsElapsed + (trackLimit -
    /// |finalCartPosition|) * 5.0`: mostly a reward for survival time, with
    /// a tie-breaker favoring controllers that end up closer to center.
    pub fn evaluate(&self, phenome: &mut dyn BlackBox) -> f32 {
        debug_assert_eq!(phenome.input_count(), 5);
        debug_assert_eq!(phenome.output_count(), 1);

        let mut state = CartPoleState {
            cart_position: 0.0,
            cart_velocity: 0.0,
            pole_angle: 0.0,
            pole_angular_velocity: 0.0,
        };

        let mut steps_survived = 0u32;
        while steps_survived < self.config.max_steps && state.is_within_bounds(&self.config) {
            let output = phenome.activate(&state.to_inputs(&self.config));
            let force = (output[0] - 0.5).clamp(-1.0, 1.0) * self.config.force_magnitude;
            state = self.step(state, force);
            steps_survived += 1;
        }

        steps_survived as f32 + (self.config.track_limit - state.cart_position.abs()) * 5.0
    }

    /// One Euler-integrated timestep of the standard single-pole cart-pole
    /// dynamics.
    fn step(&self, state: CartPoleState, force: f32) -> CartPoleState {
        let cfg = &self.config;

        let cos_theta = state.pole_angle.cos();
        let sin_theta = state.pole_angle.sin();
        let total_mass = cfg.cart_mass + cfg.pole_mass;
        let pole_mass_length = cfg.pole_mass * cfg.half_pole_length;

        let temp = (force + pole_mass_length * state.pole_angular_velocity.powi(2) * sin_theta) / total_mass;
        let angular_accel = (cfg.gravity * sin_theta - cos_theta * temp)
            / (cfg.half_pole_length * (4.0 / 3.0 - cfg.pole_mass * cos_theta.powi(2) / total_mass));
        let linear_accel = temp - pole_mass_length * angular_accel * cos_theta / total_mass;

        CartPoleState {
            cart_position: state.cart_position + cfg.time_step * state.cart_velocity,
            cart_velocity: state.cart_velocity + cfg.time_step * linear_accel,
            pole_angle: state.pole_angle + cfg.time_step * state.pole_angular_velocity,
            pole_angular_velocity: state.pole_angular_velocity + cfg.time_step * angular_accel,
        }
    }
}
