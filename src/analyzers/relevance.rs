use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Directional segments of the Drammen - Oslo S - Oslo Lufthavn commuter corridor.
pub static CORRIDOR_PAIRS: [(&str, &str); 10] = [
    // Drammen -> Oslo
    ("Drammen", "Sandvika"),
    ("Sandvika", "Asker"),
    ("Asker", "Oslo S"),
    // Oslo -> Drammen
    ("Oslo S", "Asker"),
    ("Asker", "Sandvika"),
    ("Sandvika", "Drammen"),
    // Oslo -> Gardermoen
    ("Oslo S", "Lillestrøm"),
    ("Lillestrøm", "Oslo Lufthavn"),
    // Gardermoen -> Oslo
    ("Oslo Lufthavn", "Lillestrøm"),
    ("Lillestrøm", "Oslo S"),
];

/// from_stop -> set of to_stop, keyed so lookups borrow plain `&str`.
static CORRIDOR: LazyLock<HashMap<&'static str, HashSet<&'static str>>> = LazyLock::new(|| {
    let mut corridor: HashMap<&'static str, HashSet<&'static str>> = HashMap::new();
    for (from, to) in CORRIDOR_PAIRS {
        corridor.entry(from).or_default().insert(to);
    }
    corridor
});

/// Whether `from -> to` is one of the corridor's ten directional segments.
pub fn is_relevant(from: &str, to: &str) -> bool {
    CORRIDOR.get(from).is_some_and(|targets| targets.contains(to))
}
