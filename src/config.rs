use thiserror::Error;

/// Which fixed-step scheme advances a field line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Integrator {
    #[default]
    Euler,
    Midpoint,
    Rk4,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("max_steps must be at least 1")]
    NoSteps,
    #[error("sign range [{min}, {max}] is empty or excludes the initial sign {initial}")]
    SignRange { min: i32, max: i32, initial: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionConfig {
    /// Press within this many pixels of a charge grabs it.
    pub hit_radius: f64,
    /// Secondary press removes the nearest charge within this radius.
    pub remove_radius: f64,
    pub min_sign: i32,
    pub max_sign: i32,
    pub initial_sign: i32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hit_radius: 16.0,
            remove_radius: 20.0,
            min_sign: -10,
            max_sign: 10,
            initial_sign: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub width: f64,
    pub height: f64,
    /// Coulomb scaling; changes magnitude (and so color), never direction.
    pub k: f64,
    /// Added in quadrature to every distance. Bounds the peak near a charge.
    pub softening: f64,
    pub grid_spacing: f64,
    pub arrow_length: f64,
    pub arrow_head: f64,
    pub arrow_width: f64,
    pub line_width: f64,
    /// `Some(p)` maps normalized magnitude through `t^p` before coloring.
    pub color_curve: Option<f64>,
    pub step_length: f64,
    pub max_steps: usize,
    pub seed_radius: f64,
    pub charge_radius: f64,
    pub integrator: Integrator,
    pub interaction: InteractionConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            k: 1000.0,
            softening: 100.0,
            grid_spacing: 25.0,
            arrow_length: 25.0,
            arrow_head: 5.0,
            arrow_width: 2.0,
            line_width: 1.0,
            color_curve: Some(0.4),
            step_length: 4.0,
            max_steps: 1500,
            seed_radius: 12.0,
            charge_radius: 7.0,
            integrator: Integrator::Euler,
            interaction: InteractionConfig::default(),
        }
    }
}

impl FieldConfig {
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("width", self.width),
            ("height", self.height),
            ("k", self.k),
            ("softening", self.softening),
            ("grid_spacing", self.grid_spacing),
            ("arrow_length", self.arrow_length),
            ("step_length", self.step_length),
            ("seed_radius", self.seed_radius),
            ("hit_radius", self.interaction.hit_radius),
            ("remove_radius", self.interaction.remove_radius),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if let Some(p) = self.color_curve
            && !(p.is_finite() && p > 0.0)
        {
            return Err(ConfigError::NotPositive {
                name: "color_curve",
                value: p,
            });
        }
        if self.max_steps == 0 {
            return Err(ConfigError::NoSteps);
        }
        let ic = &self.interaction;
        if ic.min_sign > ic.max_sign || !(ic.min_sign..=ic.max_sign).contains(&ic.initial_sign) {
            return Err(ConfigError::SignRange {
                min: ic.min_sign,
                max: ic.max_sign,
                initial: ic.initial_sign,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preset_is_valid() {
        assert_eq!(FieldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_spacing() {
        let cfg = FieldConfig {
            grid_spacing: 0.0,
            ..FieldConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NotPositive {
                name: "grid_spacing",
                value: 0.0
            })
        );
    }

    #[test]
    fn rejects_nan_softening_and_zero_steps() {
        let cfg = FieldConfig {
            softening: f64::NAN,
            ..FieldConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotPositive { name: "softening", .. })
        ));

        let cfg = FieldConfig {
            max_steps: 0,
            ..FieldConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoSteps));
    }

    #[test]
    fn rejects_initial_sign_outside_range() {
        let mut cfg = FieldConfig::default();
        cfg.interaction.initial_sign = 11;
        assert!(matches!(cfg.validate(), Err(ConfigError::SignRange { .. })));
    }
}
