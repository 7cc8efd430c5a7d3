/// Logistic activation, range (0, 1).
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid written in terms of its *output* `y = sigmoid(x)`.
///
/// Both backprop error terms are computed from values that already went
/// through the activation, so this is `y * (1 - y)` rather than
/// `sigmoid(x) * (1 - sigmoid(x))`.
pub fn sigmoid_prime_from_output(y: f64) -> f64 {
    y * (1.0 - y)
}
