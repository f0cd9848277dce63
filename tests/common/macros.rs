/// Asserts that the environment holds exactly the expected number of cells.
#[macro_export]
macro_rules! assert_population {
    ($ecm:expr, $count:expr) => {
        assert_eq!($ecm.count(), $count, "Population count mismatch");
    };
}

/// Asserts two floats agree to a relative tolerance of 1e-9.
#[macro_export]
macro_rules! assert_close {
    ($a:expr, $b:expr) => {
        let (a, b): (f64, f64) = ($a, $b);
        let scale = a.abs().max(b.abs()).max(1.0);
        assert!(
            (a - b).abs() <= 1e-9 * scale,
            "{} and {} differ beyond tolerance",
            a,
            b
        );
    };
}
