//! # Runge-Kutta Integration
//!
//! Classical fourth-order Runge-Kutta over a flat, fixed-size `f32` state.
//! The right-hand side is an arbitrary closure, so the same stepper serves any
//! ODE whose state fits in `[f32; N]`.

/// Advance `y` from `t` to `t + h` with one RK4 step.
///
/// `f(t, y)` must return `dy/dt` for the given state. The step size is fixed
/// by the caller; there is no error estimate and no step control.
#[must_use]
pub fn rk4<const N: usize, F>(t: f32, h: f32, y: &[f32; N], mut f: F) -> [f32; N]
where
    F: FnMut(f32, &[f32; N]) -> [f32; N],
{
    let half = 0.5 * h;

    let k1 = f(t, y);
    let k2 = f(t + half, &offset(y, &k1, half));
    let k3 = f(t + half, &offset(y, &k2, half));
    let k4 = f(t + h, &offset(y, &k3, h));

    let mut next = *y;
    let sixth = h / 6.0;
    for (i, n) in next.iter_mut().enumerate() {
        *n += sixth * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
    }
    next
}

/// `y + scale * k`, component-wise.
fn offset<const N: usize>(y: &[f32; N], k: &[f32; N], scale: f32) -> [f32; N] {
    let mut out = *y;
    for (o, d) in out.iter_mut().zip(k) {
        *o += scale * d;
    }
    out
}
