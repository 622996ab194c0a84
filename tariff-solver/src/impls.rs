/// Implementation using a damped Newton (secant-slope) iteration
mod newton;
pub use newton::{NewtonRaphson, NewtonSettings};

/// Implementation using bracket expansion followed by bisection
mod bisection;
pub use bisection::{Bisection, BisectionSettings};
