/// Progress at which the exponential decay hands over to the linear run-out.
pub const SPIN_EASE_KNEE: f64 = 0.9;

/// Exponential decay rate of the spin easing, in powers of two per unit of progress.
pub const SPIN_EASE_DECAY: f64 = 10.0;

/// Blend weight for the carousel scroll at normalized `progress`.
///
/// `1.0` means "still at the starting offset", `0.0` means "landed on the target". The curve is
/// `2^(-10 p)` up to the knee, then the value reached at the knee falls linearly to zero at
/// `p = 1`. It is continuous; only its derivative jumps at the knee.
pub fn spin_easing(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    let e = if p < SPIN_EASE_KNEE {
        (-SPIN_EASE_DECAY * p).exp2()
    } else {
        let at_knee = (-SPIN_EASE_DECAY * SPIN_EASE_KNEE).exp2();
        at_knee * (1.0 - (p - SPIN_EASE_KNEE) / (1.0 - SPIN_EASE_KNEE))
    };
    e.clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
