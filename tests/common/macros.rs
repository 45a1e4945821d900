/// Asserts that the total population count matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!($world.population(), $count, "Population count mismatch");
    };
}

/// Asserts that an ant with the given ID is NOT present in the world.
#[macro_export]
macro_rules! assert_ant_dead {
    ($world:expr, $id:expr) => {
        let exists = $world.ant_snapshots().iter().any(|a| a.id == $id);
        assert!(!exists, "Ant {} should be dead but was found alive", $id);
    };
}

/// Asserts that an ant with the given ID is in the given macro-state.
#[macro_export]
macro_rules! assert_ant_state {
    ($world:expr, $id:expr, $state:expr) => {
        let ant = $world.ant($id).expect("Ant not found in world");
        assert_eq!(ant.state, $state, "Ant {} is in the wrong state", $id);
    };
}

/// Asserts that two floats agree within a tolerance.
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!((l - r).abs() <= $tol, "{} is not within {} of {}", l, $tol, r);
    };
}
