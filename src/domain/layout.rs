//! The built-in mansion map.

use crate::domain::builder::RoomSpec;

/// (room, left, right) rows of the default mansion. The first row is the entrance.
const MANSION: &[(&str, Option<&str>, Option<&str>)] = &[
    ("Hall de entrada", Some("Sala de estar"), Some("Jardim")),
    ("Sala de estar", Some("Cozinha"), Some("Biblioteca")),
    ("Jardim", Some("Garagem"), Some("Escritório")),
    ("Cozinha", None, None),
    ("Biblioteca", None, Some("Sala secreta")),
    ("Garagem", None, None),
    ("Escritório", None, None),
    ("Sala secreta", None, None),
];

/// Room table of the default mansion.
pub fn mansion() -> Vec<RoomSpec> {
    MANSION
        .iter()
        .map(|&(name, left, right)| RoomSpec::new(name, left, right))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::MapBuilder;

    #[test]
    fn mansion_has_eight_rooms_and_four_dead_ends() {
        let map = MapBuilder::build(&mansion()).unwrap();
        assert_eq!(map.len(), 8);
        assert_eq!(map.depth(), 4);
        assert_eq!(
            map.leaf_names(),
            vec!["Cozinha", "Sala secreta", "Garagem", "Escritório"]
        );
    }
}
