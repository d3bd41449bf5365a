/// Easing curve mapping progress in `[0, 1]` to a factor in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tween {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    SmoothStep,
}

impl Tween {
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Tween::Linear => t,
            Tween::EaseIn => t * t,
            Tween::EaseOut => t * (2.0 - t),
            Tween::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Tween::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}
