//! Named easing curves.
//!
//! Curves are plain values so a tween can carry one around by copy. Names
//! come in two families: the timeline style (`"power2.out"`, `"back.out(1.7)"`)
//! and CSS-like aliases (`"ease-out-back"`, `"ease-out-quad"`). A curve the
//! names do not cover plugs in as [`Ease::Custom`], under a name of its own.

const DEFAULT_BACK_OVERSHOOT: f64 = 1.70158;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    In,
    Out,
    InOut,
}

impl Mode {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            "inOut" | "inout" | "in-out" => Some(Self::InOut),
            _ => None,
        }
    }

    fn shape(self, t: f64, curve: impl Fn(f64) -> f64) -> f64 {
        match self {
            Self::In => curve(t),
            Self::Out => 1.0 - curve(1.0 - t),
            Self::InOut => {
                if t < 0.5 {
                    curve(t * 2.0) / 2.0
                } else {
                    1.0 - curve((1.0 - t) * 2.0) / 2.0
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Ease {
    Linear,
    /// `t^(degree + 1)`, so `power1` is quadratic and `power2` cubic.
    Power { degree: u8, mode: Mode },
    Sine { mode: Mode },
    /// Overshoots the target before settling on it.
    Back { overshoot: f64, mode: Mode },
    /// Custom curves are told apart by name.
    Custom {
        name: &'static str,
        curve: fn(f64) -> f64,
    },
}

impl PartialEq for Ease {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Linear, Self::Linear) => true,
            (
                Self::Power { degree, mode },
                Self::Power {
                    degree: other_degree,
                    mode: other_mode,
                },
            ) => degree == other_degree && mode == other_mode,
            (Self::Sine { mode }, Self::Sine { mode: other_mode }) => mode == other_mode,
            (
                Self::Back { overshoot, mode },
                Self::Back {
                    overshoot: other_overshoot,
                    mode: other_mode,
                },
            ) => overshoot == other_overshoot && mode == other_mode,
            (Self::Custom { name, .. }, Self::Custom { name: other_name, .. }) => {
                name == other_name
            }
            _ => false,
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Self::power_out(1)
    }
}

impl Ease {
    pub const fn power_out(degree: u8) -> Self {
        Self::Power {
            degree,
            mode: Mode::Out,
        }
    }

    pub const fn power_in_out(degree: u8) -> Self {
        Self::Power {
            degree,
            mode: Mode::InOut,
        }
    }

    pub const fn back_out(overshoot: f64) -> Self {
        Self::Back {
            overshoot,
            mode: Mode::Out,
        }
    }

    /// Maps linear progress in `[0, 1]` onto eased progress. The result may
    /// leave `[0, 1]` for overshooting curves; the endpoints are exact.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Self::Linear => t,
            Self::Power { degree, mode } => {
                let exponent = i32::from(degree) + 1;
                mode.shape(t, |x| x.powi(exponent))
            }
            Self::Sine { mode } => {
                mode.shape(t, |x| 1.0 - (x * std::f64::consts::FRAC_PI_2).cos())
            }
            Self::Back { overshoot, mode } => {
                mode.shape(t, |x| x * x * ((overshoot + 1.0) * x - overshoot))
            }
            Self::Custom { curve, .. } => curve(t),
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();

        match name {
            "none" | "linear" => return Some(Self::Linear),
            "ease-in-quad" => return Some(Self::Power { degree: 1, mode: Mode::In }),
            "ease-out-quad" => return Some(Self::power_out(1)),
            "ease-in-out-quad" => return Some(Self::power_in_out(1)),
            "ease-out-cubic" => return Some(Self::power_out(2)),
            "ease-in-out-cubic" => return Some(Self::power_in_out(2)),
            "ease-in-out-sine" => return Some(Self::Sine { mode: Mode::InOut }),
            "ease-out-back" => return Some(Self::back_out(DEFAULT_BACK_OVERSHOOT)),
            _ => {}
        }

        let (family, rest) = name.split_once('.')?;
        let (mode, argument) = match rest.split_once('(') {
            Some((mode, argument)) => (mode, Some(argument.strip_suffix(')')?)),
            None => (rest, None),
        };
        let mode = Mode::parse(mode)?;

        match family {
            "power0" => Some(Self::Linear),
            "power1" | "quad" => Some(Self::Power { degree: 1, mode }),
            "power2" | "cubic" => Some(Self::Power { degree: 2, mode }),
            "power3" | "quart" => Some(Self::Power { degree: 3, mode }),
            "power4" | "quint" => Some(Self::Power { degree: 4, mode }),
            "sine" => Some(Self::Sine { mode }),
            "back" => {
                let overshoot = match argument {
                    Some(value) => value.trim().parse::<f64>().ok()?,
                    None => DEFAULT_BACK_OVERSHOOT,
                };
                Some(Self::Back { overshoot, mode })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn every_curve_pins_its_endpoints() {
        let curves = [
            Ease::Linear,
            Ease::power_out(2),
            Ease::power_in_out(1),
            Ease::Sine { mode: Mode::InOut },
            Ease::back_out(1.7),
            Ease::back_out(2.0),
        ];

        for curve in curves {
            assert!(close(curve.apply(0.0), 0.0), "{curve:?} at 0");
            assert!(close(curve.apply(1.0), 1.0), "{curve:?} at 1");
        }
    }

    #[test]
    fn back_out_overshoots_then_settles() {
        let curve = Ease::back_out(1.7);
        let peak = (1..100)
            .map(|step| curve.apply(f64::from(step) / 100.0))
            .fold(f64::MIN, f64::max);

        assert!(peak > 1.05, "expected overshoot, peak was {peak}");
        assert!(close(curve.apply(1.0), 1.0));
    }

    #[test]
    fn power_out_decelerates_and_in_out_is_symmetric() {
        assert!(Ease::power_out(2).apply(0.5) > 0.5);
        assert!(close(Ease::power_in_out(1).apply(0.5), 0.5));
        assert!(Ease::power_in_out(1).apply(0.25) < 0.25);
    }

    #[test]
    fn parses_timeline_and_css_names() {
        assert_eq!(Ease::parse("none"), Some(Ease::Linear));
        assert_eq!(Ease::parse("power2.out"), Some(Ease::power_out(2)));
        assert_eq!(Ease::parse("power1.inOut"), Some(Ease::power_in_out(1)));
        assert_eq!(Ease::parse("back.out(1.7)"), Some(Ease::back_out(1.7)));
        assert_eq!(Ease::parse("ease-out-quad"), Some(Ease::power_out(1)));
        assert_eq!(
            Ease::parse("ease-out-back"),
            Some(Ease::back_out(DEFAULT_BACK_OVERSHOOT))
        );
        assert_eq!(Ease::parse("back.out(abc)"), None);
        assert_eq!(Ease::parse("wobble.out"), None);
    }

    #[test]
    fn custom_curves_apply_and_compare_by_name() {
        fn step(t: f64) -> f64 {
            if t < 0.5 {
                0.0
            } else {
                1.0
            }
        }
        fn late_step(t: f64) -> f64 {
            if t < 0.9 {
                0.0
            } else {
                1.0
            }
        }

        let curve = Ease::Custom {
            name: "step",
            curve: step,
        };
        assert!(close(curve.apply(0.4), 0.0));
        assert!(close(curve.apply(0.6), 1.0));

        let renamed = Ease::Custom {
            name: "late-step",
            curve: late_step,
        };
        assert_ne!(curve, renamed);
        assert_eq!(
            curve,
            Ease::Custom {
                name: "step",
                curve: step,
            }
        );
        assert_ne!(curve, Ease::Linear);
        assert_ne!(Ease::power_out(1), Ease::power_out(2));
    }
}
