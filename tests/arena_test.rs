//! Tree store: construction and post-order release.

use rstest::rstest;

use mansion::domain::{layout, MapArena, MapBuilder, Side};
use mansion::util::testing;

#[rstest]
fn given_mansion_when_released_then_every_room_freed_once_in_post_order() {
    testing::init_test_setup();
    let map = MapBuilder::build(&layout::mansion()).unwrap();
    assert_eq!(map.len(), 8);

    let released = map.release();

    assert_eq!(
        released,
        vec![
            "Cozinha",
            "Sala secreta",
            "Biblioteca",
            "Sala de estar",
            "Garagem",
            "Escritório",
            "Jardim",
            "Hall de entrada",
        ]
    );
}

#[rstest]
fn given_release_order_then_children_precede_parents() {
    let rooms = layout::mansion();
    let released = MapBuilder::build(&rooms).unwrap().release();
    let position = |name: &str| released.iter().position(|r| r == name).unwrap();

    for spec in &rooms {
        for child in [&spec.left, &spec.right].into_iter().flatten() {
            assert!(
                position(child.as_str()) < position(spec.name.as_str()),
                "{child} must be released before {}",
                spec.name
            );
        }
    }
}

#[rstest]
fn given_manually_linked_rooms_when_released_then_detached_rooms_are_freed_too() {
    let mut map = MapArena::new();
    let hall = map.create_node("Hall").unwrap();
    let porao = map.create_node("Porão").unwrap();
    let _sotao = map.create_node("Sótão").unwrap();
    map.link(hall, Side::Left, porao).unwrap();
    map.set_root(hall).unwrap();

    let released = map.release();

    assert_eq!(released, vec!["Porão", "Hall", "Sótão"]);
}

#[rstest]
fn given_empty_map_when_released_then_nothing_freed() {
    assert!(MapArena::new().release().is_empty());
}

#[rstest]
#[case("Hall de entrada")]
#[case("Escritório")]
#[case("x")]
fn given_name_when_creating_node_then_name_set_and_children_absent(#[case] name: &str) {
    let mut map = MapArena::new();
    let idx = map.create_node(name).unwrap();
    let room = map.room(idx).unwrap();

    assert_eq!(room.name(), name);
    assert_eq!(room.child(Side::Left), None);
    assert_eq!(room.child(Side::Right), None);
}
